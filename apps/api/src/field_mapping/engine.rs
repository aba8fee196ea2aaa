//! FieldMappingEngine: per-platform learned field rules with an AI and
//! heuristic fallback.
//!
//! Flow for `map_fields`:
//! 1. url → platform label (never fails; "unknown" on bad input)
//! 2. trusted mapping (confidence > 0.8) → apply stored rules, done
//! 3. AI assistant, bounded by a timeout
//! 4. keyword heuristics when the assistant is absent, errors or times out
//! 5. resolve attributes against the profile, keyed by field id or name
//! 6. persist the inferred associations as rules for next time
//!
//! Nothing here returns an error to the caller: storage and AI failures are
//! logged and the request degrades to best-effort output.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::field_mapping::ai::AiAssistant;
use crate::field_mapping::heuristics::infer_attribute;
use crate::field_mapping::platform::{extract_platform, url_pattern};
use crate::models::form::FormField;
use crate::models::mapping::{FieldRule, PlatformMapping};
use crate::models::profile::{Profile, ProfileAttribute};
use crate::store::{MappingStore, StoreError};

/// Platforms scoring above this skip inference and replay their stored rules.
pub const FAST_PATH_THRESHOLD: f64 = 0.8;
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(5);

type Association<'a> = (&'a FormField, ProfileAttribute);

#[derive(Clone)]
pub struct FieldMappingEngine {
    store: Arc<dyn MappingStore>,
    ai: Option<Arc<dyn AiAssistant>>,
    ai_timeout: Duration,
}

impl FieldMappingEngine {
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self {
            store,
            ai: None,
            ai_timeout: DEFAULT_AI_TIMEOUT,
        }
    }

    pub fn with_ai(mut self, ai: Arc<dyn AiAssistant>, timeout: Duration) -> Self {
        self.ai = Some(ai);
        self.ai_timeout = timeout;
        self
    }

    /// Returns `identifier -> value` for every field that can be filled from the profile.
    pub async fn map_fields(
        &self,
        url: &str,
        fields: &[FormField],
        profile: &Profile,
    ) -> HashMap<String, String> {
        if fields.is_empty() {
            debug!("No form fields supplied for {url}");
            return HashMap::new();
        }

        let platform = extract_platform(url);
        info!("Analyzing {} form fields for platform: {platform}", fields.len());

        let (existing, loaded) = match self.store.find_mapping(&platform).await {
            Ok(mapping) => (mapping, true),
            Err(e) => {
                warn!("Could not load mapping for {platform}, inferring without it: {e}");
                (None, false)
            }
        };

        if let Some(mapping) = existing
            .as_ref()
            .filter(|m| m.confidence_score > FAST_PATH_THRESHOLD)
        {
            info!(
                "Using existing high-confidence mapping for {platform} (confidence: {})",
                mapping.confidence_score
            );
            return apply_rules(mapping, fields, profile);
        }

        let associations = match self.ai_associations(fields, profile, &platform).await {
            Some(associations) => associations,
            None => heuristic_associations(fields),
        };

        let result = resolve(&associations, profile);
        info!("Mapped {} fields for platform {platform}", result.len());

        // A failed load must not be followed by a blind overwrite.
        if loaded {
            if let Err(e) = self.learn(existing, &platform, url, &associations).await {
                warn!("Failed to persist learned rules for {platform}: {e}");
            }
        }

        result
    }

    /// The user submitted an autofilled form without changes.
    pub async fn record_success(&self, url: &str) {
        let platform = extract_platform(url);
        let outcome = async {
            let Some(mut mapping) = self.store.find_mapping(&platform).await? else {
                debug!("No mapping for {platform}; success not recorded");
                return Ok::<_, StoreError>(());
            };
            mapping.record_success();
            self.store.save_mapping(&mapping).await?;
            info!(
                "Recorded success for platform: {platform}, new confidence: {}",
                mapping.confidence_score
            );
            Ok(())
        }
        .await;

        if let Err(e) = outcome {
            warn!("Failed to record success for {platform}: {e}");
        }
    }

    /// The user changed an autofilled field; `attribute` is what it should have been.
    pub async fn record_correction(&self, url: &str, field_id: &str, attribute: ProfileAttribute) {
        let platform = extract_platform(url);
        let outcome = async {
            let Some(mut mapping) = self.store.find_mapping(&platform).await? else {
                debug!("No mapping for {platform}; correction not recorded");
                return Ok::<_, StoreError>(());
            };
            if !mapping.record_correction(field_id, attribute) {
                debug!("No rule for field {field_id} on {platform}");
            }
            self.store.save_mapping(&mapping).await?;
            info!("Recorded correction for platform: {platform}, field: {field_id} -> {attribute}");
            Ok(())
        }
        .await;

        if let Err(e) = outcome {
            warn!("Failed to record correction for {platform}: {e}");
        }
    }

    /// The learned mapping for the URL's platform, if one exists.
    pub async fn mapping_for_url(&self, url: &str) -> Result<Option<PlatformMapping>, StoreError> {
        self.store.find_mapping(&extract_platform(url)).await
    }

    /// `None` means "use heuristics": no assistant, unavailable, failed or timed out.
    async fn ai_associations<'a>(
        &self,
        fields: &'a [FormField],
        profile: &Profile,
        platform: &str,
    ) -> Option<Vec<Association<'a>>> {
        let ai = self.ai.as_ref()?;
        if !ai.is_available() {
            debug!("AI assistant not available, using heuristic mapping");
            return None;
        }

        match tokio::time::timeout(self.ai_timeout, ai.map_fields(fields, profile, platform)).await
        {
            Ok(Ok(raw)) => {
                info!("AI assistant proposed {} associations for {platform}", raw.len());
                Some(interpret_ai_mapping(fields, &raw))
            }
            Ok(Err(e)) => {
                warn!("AI assistant failed, using heuristic mapping: {e}");
                None
            }
            Err(_) => {
                warn!(
                    "AI assistant timed out after {}ms, using heuristic mapping",
                    self.ai_timeout.as_millis()
                );
                None
            }
        }
    }

    async fn learn(
        &self,
        existing: Option<PlatformMapping>,
        platform: &str,
        url: &str,
        associations: &[Association<'_>],
    ) -> Result<(), StoreError> {
        let rules: Vec<FieldRule> = associations
            .iter()
            .filter(|(field, _)| field.identifier().is_some())
            .map(|(field, attribute)| FieldRule::inferred(field, *attribute))
            .collect();

        let (mut mapping, created) = match existing {
            Some(mapping) => (mapping, false),
            None => (PlatformMapping::new(platform, url_pattern(url)), true),
        };

        let learned = mapping.merge_rules(rules);
        if learned == 0 && !created {
            debug!("Nothing new learned for {platform}");
            return Ok(());
        }
        self.store.save_mapping(&mapping).await?;
        info!("Saved {learned} field rules for platform: {platform}");
        Ok(())
    }
}

fn apply_rules(
    mapping: &PlatformMapping,
    fields: &[FormField],
    profile: &Profile,
) -> HashMap<String, String> {
    let mut result = HashMap::new();
    for rule in &mapping.field_rules {
        let Some(field) = fields.iter().find(|f| rule.matches_field(f)) else {
            continue;
        };
        if let (Some(id), Some(value)) = (
            field.identifier(),
            profile.get_attribute(rule.profile_attribute),
        ) {
            result.insert(id.to_string(), value);
        }
    }
    result
}

fn heuristic_associations(fields: &[FormField]) -> Vec<Association<'_>> {
    fields
        .iter()
        .filter_map(|f| infer_attribute(f).map(|a| (f, a)))
        .collect()
}

/// Keeps only identifiers that were sent and attribute names in the vocabulary.
fn interpret_ai_mapping<'a>(
    fields: &'a [FormField],
    raw: &HashMap<String, String>,
) -> Vec<Association<'a>> {
    fields
        .iter()
        .filter_map(|field| {
            let name = raw.get(field.identifier()?)?;
            match name.parse::<ProfileAttribute>() {
                Ok(attribute) => Some((field, attribute)),
                Err(e) => {
                    debug!("Discarding AI suggestion: {e}");
                    None
                }
            }
        })
        .collect()
}

fn resolve(associations: &[Association<'_>], profile: &Profile) -> HashMap<String, String> {
    associations
        .iter()
        .filter_map(|(field, attribute)| {
            let id = field.identifier()?;
            let value = profile.get_attribute(*attribute)?;
            Some((id.to_string(), value))
        })
        .collect()
}
