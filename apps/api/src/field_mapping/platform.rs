use reqwest::Url;

/// Platform label used when a URL cannot be parsed or has no host.
pub const UNKNOWN_PLATFORM: &str = "unknown";

/// Second-level domain label of the URL's host: "greenhouse" for
/// `https://boards.greenhouse.io/acme`. Never fails.
pub fn extract_platform(url: &str) -> String {
    let Some(host) = parse_host(url) else {
        return UNKNOWN_PLATFORM.to_string();
    };
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let parts: Vec<&str> = host.split('.').filter(|p| !p.is_empty()).collect();
    match parts.len() {
        0 => UNKNOWN_PLATFORM.to_string(),
        1 => parts[0].to_string(),
        n => parts[n - 2].to_string(),
    }
}

/// Host of the URL, recorded on new mappings; the raw URL when there is none.
pub fn url_pattern(url: &str) -> String {
    parse_host(url).unwrap_or_else(|| url.trim().to_string())
}

fn parse_host(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .filter(|h| !h.is_empty())
}
