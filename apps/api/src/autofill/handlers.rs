use axum::{extract::State, Json};

use crate::autofill::{autofill, AutofillRequest, AutofillResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/autofill
pub async fn handle_autofill(
    State(state): State<AppState>,
    Json(req): Json<AutofillRequest>,
) -> Result<Json<AutofillResponse>, AppError> {
    if req.user_email.trim().is_empty() {
        return Err(AppError::Validation("user_email must not be empty".to_string()));
    }
    Ok(Json(autofill(&state.mappings, &state.answers, &req).await))
}
