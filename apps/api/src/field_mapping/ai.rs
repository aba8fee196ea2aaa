//! The optional AI assistant consulted before heuristics.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::field_mapping::prompts::FIELD_MAPPING_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::form::FormField;
use crate::models::profile::{Profile, ProfileAttribute};

/// Infers `field identifier -> attribute name` associations.
///
/// Carried by the engine as `Option<Arc<dyn AiAssistant>>`. Results are
/// advisory: the engine discards identifiers it did not send and attribute
/// names outside the vocabulary.
#[async_trait]
pub trait AiAssistant: Send + Sync {
    fn is_available(&self) -> bool;

    async fn map_fields(
        &self,
        fields: &[FormField],
        profile: &Profile,
        platform: &str,
    ) -> Result<HashMap<String, String>, LlmError>;
}

/// Claude-backed assistant. Only attribute names and whether they are filled
/// leave the service; profile values are never sent.
pub struct LlmFieldMapper {
    llm: LlmClient,
}

impl LlmFieldMapper {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AiAssistant for LlmFieldMapper {
    fn is_available(&self) -> bool {
        self.llm.has_api_key()
    }

    async fn map_fields(
        &self,
        fields: &[FormField],
        profile: &Profile,
        platform: &str,
    ) -> Result<HashMap<String, String>, LlmError> {
        let prompt = build_mapping_prompt(fields, profile, platform);
        self.llm.call_json(&prompt, JSON_ONLY_SYSTEM).await
    }
}

fn build_mapping_prompt(fields: &[FormField], profile: &Profile, platform: &str) -> String {
    let attributes = ProfileAttribute::ALL
        .iter()
        .map(|a| {
            let state = if profile.get_attribute(*a).is_some() {
                "has value"
            } else {
                "empty"
            };
            format!("- {a}: {state}")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let fields = fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            format!(
                "{}. id='{}', name='{}', label='{}', placeholder='{}', type='{}'",
                i + 1,
                f.id.as_deref().unwrap_or(""),
                f.name.as_deref().unwrap_or(""),
                f.label.as_deref().unwrap_or(""),
                f.placeholder.as_deref().unwrap_or(""),
                f.field_type.as_deref().unwrap_or(""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    FIELD_MAPPING_PROMPT_TEMPLATE
        .replace("{platform}", platform)
        .replace("{attributes}", &attributes)
        .replace("{fields}", &fields)
}
