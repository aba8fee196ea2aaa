use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::mapping::PlatformMapping;
use crate::models::profile::ProfileAttribute;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

#[derive(Deserialize)]
pub struct SuccessFeedback {
    pub url: String,
}

#[derive(Deserialize)]
pub struct CorrectionFeedback {
    pub url: String,
    pub field_id: String,
    pub attribute: String,
}

/// GET /api/v1/mappings?url=
pub async fn handle_get_mapping(
    State(state): State<AppState>,
    Query(params): Query<UrlQuery>,
) -> Result<Json<PlatformMapping>, AppError> {
    let mapping = state.mappings.mapping_for_url(&params.url).await?;
    mapping
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No mapping learned for {}", params.url)))
}

/// POST /api/v1/mappings/feedback/success
pub async fn handle_record_success(
    State(state): State<AppState>,
    Json(req): Json<SuccessFeedback>,
) -> StatusCode {
    state.mappings.record_success(&req.url).await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/mappings/feedback/correction
pub async fn handle_record_correction(
    State(state): State<AppState>,
    Json(req): Json<CorrectionFeedback>,
) -> Result<StatusCode, AppError> {
    if req.field_id.trim().is_empty() {
        return Err(AppError::Validation("field_id must not be empty".to_string()));
    }
    let attribute = req
        .attribute
        .parse::<ProfileAttribute>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .mappings
        .record_correction(&req.url, &req.field_id, attribute)
        .await;
    Ok(StatusCode::NO_CONTENT)
}
