//! Ordered phrase tables and bounded confidence arithmetic.
//!
//! Both the question classifier and the heuristic field matcher are
//! "first substring hit wins" lookups over an ordered list of
//! `(label, phrases)` pairs. `PhraseTable` is that lookup; the tables
//! themselves stay declarative in the modules that own them.

/// Lower bound for every learned answer's confidence.
pub const ANSWER_CONFIDENCE_FLOOR: f64 = 0.3;
/// Lower bound for a field rule's confidence after corrections.
pub const RULE_CONFIDENCE_FLOOR: f64 = 0.3;

/// An ordered list of `(label, phrases)` pairs evaluated top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct PhraseTable<L: Copy + 'static> {
    entries: &'static [(L, &'static [&'static str])],
}

impl<L: Copy + 'static> PhraseTable<L> {
    pub const fn new(entries: &'static [(L, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    /// Returns the label of the first entry with any phrase contained in `haystack`.
    ///
    /// Matching is case-sensitive; callers lowercase the haystack, and all
    /// table phrases are written in lowercase.
    pub fn first_match(&self, haystack: &str) -> Option<L> {
        self.entries
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| haystack.contains(p)))
            .map(|(label, _)| *label)
    }
}

/// Clamps a confidence update into `[min, max]` and rounds it to 3 decimals.
pub fn clamp_confidence(value: f64, min: f64, max: f64) -> f64 {
    round_confidence(value.clamp(min, max))
}

/// Rounds to 3 decimal places so repeated ±0.05 steps do not drift.
pub fn round_confidence(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
