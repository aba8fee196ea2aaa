//! Autofill orchestration: profile values for ordinary fields, learned
//! answers for essay-style questions.

pub mod handlers;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::answers::AnswerLearningEngine;
use crate::field_mapping::platform::extract_platform;
use crate::field_mapping::FieldMappingEngine;
use crate::models::form::FormField;
use crate::models::profile::Profile;

/// Learned answers must beat this confidence to be filled in automatically.
const ANSWER_FILL_MIN_CONFIDENCE: f64 = 0.5;
/// Reported for any non-empty result.
const FILLED_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Deserialize)]
pub struct AutofillRequest {
    pub url: String,
    pub user_email: String,
    #[serde(default)]
    pub form_fields: Vec<FormField>,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct AutofillResponse {
    pub mapping: HashMap<String, String>,
    pub confidence: f64,
    pub detected_platform: String,
    pub message: String,
}

pub async fn autofill(
    mappings: &FieldMappingEngine,
    answers: &AnswerLearningEngine,
    req: &AutofillRequest,
) -> AutofillResponse {
    info!(
        "Autofill request for URL: {} with {} fields from user: {}",
        req.url,
        req.form_fields.len(),
        req.user_email
    );

    let mut mapping = mappings
        .map_fields(&req.url, &req.form_fields, &req.profile)
        .await;

    for field in req.form_fields.iter().filter(|f| f.is_essay_like()) {
        let (Some(question), Some(id)) = (field.question_text(), field.identifier()) else {
            continue;
        };
        match answers.find_best_answer(&req.user_email, question).await {
            Ok(Some(found)) if found.confidence > ANSWER_FILL_MIN_CONFIDENCE => {
                info!("Found learned answer for question: {question}");
                mapping.insert(id.to_string(), found.answer);
            }
            Ok(_) => {}
            Err(e) => warn!("Answer lookup failed for '{question}': {e}"),
        }
    }

    let filled = mapping.len();
    info!("Returning {filled} field mappings");
    AutofillResponse {
        confidence: if mapping.is_empty() { 0.0 } else { FILLED_CONFIDENCE },
        mapping,
        detected_platform: extract_platform(&req.url),
        message: format!("Found {filled} fields to autofill."),
    }
}
