use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::{clamp_confidence, RULE_CONFIDENCE_FLOOR};
use crate::models::form::{non_empty, FormField};
use crate::models::profile::ProfileAttribute;

/// Platform confidence before any feedback has been recorded.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;
/// Confidence assigned to a freshly inferred field rule.
pub const INFERRED_RULE_CONFIDENCE: f64 = 0.7;
const CORRECTION_PENALTY: f64 = 0.1;

/// A learned association between one form field and a profile attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field_id: Option<String>,
    pub field_name: Option<String>,
    pub field_label: Option<String>,
    pub field_type: Option<String>,
    pub placeholder: Option<String>,
    pub profile_attribute: ProfileAttribute,
    pub confidence: f64,
}

impl FieldRule {
    pub fn inferred(field: &FormField, attribute: ProfileAttribute) -> Self {
        Self {
            field_id: field.id.clone(),
            field_name: field.name.clone(),
            field_label: field.label.clone(),
            field_type: field.field_type.clone(),
            placeholder: field.placeholder.clone(),
            profile_attribute: attribute,
            confidence: INFERRED_RULE_CONFIDENCE,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        non_empty(&self.field_id).or_else(|| non_empty(&self.field_name))
    }

    /// True when `key` is this rule's field id or field name.
    pub fn matches_key(&self, key: &str) -> bool {
        self.field_id.as_deref() == Some(key) || self.field_name.as_deref() == Some(key)
    }

    /// True when the observed field carries this rule's id or name.
    pub fn matches_field(&self, field: &FormField) -> bool {
        let id_hit = non_empty(&self.field_id).is_some() && self.field_id == field.id;
        let name_hit = non_empty(&self.field_name).is_some() && self.field_name == field.name;
        id_hit || name_hit
    }
}

/// Everything learned about one hosting platform's forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformMapping {
    pub platform: String,
    pub url_pattern: String,
    pub field_rules: Vec<FieldRule>,
    pub success_count: u32,
    pub correction_count: u32,
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlatformMapping {
    pub fn new(platform: impl Into<String>, url_pattern: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            platform: platform.into(),
            url_pattern: url_pattern.into(),
            field_rules: Vec::new(),
            success_count: 0,
            correction_count: 0,
            confidence_score: NEUTRAL_CONFIDENCE,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_success(&mut self) {
        self.success_count = self.success_count.saturating_add(1);
        self.recompute_confidence();
        self.updated_at = Utc::now();
    }

    /// Counts a correction and reassigns the matching rule, if any.
    /// Returns whether a rule was rewritten.
    pub fn record_correction(&mut self, field_key: &str, attribute: ProfileAttribute) -> bool {
        self.correction_count = self.correction_count.saturating_add(1);

        let rewritten = match self.field_rules.iter_mut().find(|r| r.matches_key(field_key)) {
            Some(rule) => {
                rule.profile_attribute = attribute;
                rule.confidence =
                    clamp_confidence(rule.confidence - CORRECTION_PENALTY, RULE_CONFIDENCE_FLOOR, 1.0);
                true
            }
            None => false,
        };

        self.recompute_confidence();
        self.updated_at = Utc::now();
        rewritten
    }

    /// Appends rules for identifiers not seen before. A rule already on the
    /// mapping wins, so corrections are not undone by later inference.
    /// Returns how many rules were added.
    pub fn merge_rules(&mut self, rules: Vec<FieldRule>) -> usize {
        let mut added = 0;
        for rule in rules {
            let known = rule.identifier().is_some_and(|id| {
                self.field_rules
                    .iter()
                    .any(|r| r.identifier() == Some(id))
            });
            if !known {
                self.field_rules.push(rule);
                added += 1;
            }
        }
        if added > 0 {
            self.updated_at = Utc::now();
        }
        added
    }

    /// success / (success + corrections); left untouched while both are zero.
    fn recompute_confidence(&mut self) {
        let total = self.success_count as f64 + self.correction_count as f64;
        if total > 0.0 {
            self.confidence_score = (self.success_count as f64 / total).clamp(0.0, 1.0);
        }
    }
}
