use crate::answers::AnswerLearningEngine;
use crate::config::Config;
use crate::field_mapping::FieldMappingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mappings: FieldMappingEngine,
    pub answers: AnswerLearningEngine,
}
