use serde::{Deserialize, Serialize};

/// A raw form-field descriptor as observed in the applicant's browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormField {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
}

impl FormField {
    /// The key the caller fills by: `id` when present, else `name`.
    pub fn identifier(&self) -> Option<&str> {
        non_empty(&self.id).or_else(|| non_empty(&self.name))
    }

    /// Label, name, id and placeholder joined and lowercased for keyword matching.
    pub fn descriptor_text(&self) -> String {
        [&self.label, &self.name, &self.id, &self.placeholder]
            .iter()
            .map(|part| part.as_deref().unwrap_or("").trim().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Textareas and long labels are treated as essay-style questions.
    pub fn is_essay_like(&self) -> bool {
        let is_textarea = self
            .field_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("textarea"));
        let long_label = self
            .label
            .as_deref()
            .is_some_and(|l| l.chars().count() > 30);
        is_textarea || long_label
    }

    /// The text to look up as a question: the label, falling back to the placeholder.
    pub fn question_text(&self) -> Option<&str> {
        non_empty(&self.label).or_else(|| non_empty(&self.placeholder))
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
