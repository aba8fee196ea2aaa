use std::collections::HashSet;

/// Function words dropped from question keywords, plus the framing verbs
/// ("tell", "describe", "explain") that every essay prompt starts with.
#[rustfmt::skip]
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "must", "shall", "can", "to", "of", "in",
    "for", "on", "with", "at", "by", "from", "as", "into", "through",
    "during", "before", "after", "above", "below", "up", "down", "out",
    "off", "over", "under", "again", "further", "then", "once", "here",
    "there", "when", "where", "why", "how", "all", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "just", "and", "but", "if", "or",
    "because", "until", "while", "about", "your", "you", "us", "we", "our",
    "tell", "describe", "explain",
];

const MIN_KEYWORD_LEN: usize = 3;

/// Lowercases, drops everything but ASCII letters, digits and whitespace,
/// and collapses runs of whitespace. Idempotent.
pub fn normalize_question(question: &str) -> String {
    let kept: String = question
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_ascii_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace tokens of an already normalized pattern, duplicates kept.
pub fn pattern_words(pattern: &str) -> Vec<&str> {
    pattern.split_whitespace().collect()
}

/// Distinct, meaningful tokens of a question in first-seen order.
pub fn extract_keywords(question: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    normalize_question(question)
        .split_whitespace()
        .filter(|w| w.len() >= MIN_KEYWORD_LEN)
        .filter(|w| !STOP_WORDS.contains(w))
        .filter(|w| seen.insert(w.to_string()))
        .map(str::to_string)
        .collect()
}
