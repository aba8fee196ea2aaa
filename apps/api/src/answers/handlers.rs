use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answers::AnswerMatch;
use crate::errors::AppError;
use crate::models::answer::{LearnedAnswer, QuestionCategory};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user: String,
}

#[derive(Deserialize)]
pub struct SuggestQuery {
    pub user: String,
    pub question: String,
}

#[derive(Deserialize)]
pub struct QuestionQuery {
    pub question: String,
}

#[derive(Deserialize)]
pub struct LearnAnswerRequest {
    pub user_email: String,
    pub question: String,
    pub answer: String,
    pub platform: Option<String>,
    pub job_title: Option<String>,
}

#[derive(Deserialize)]
pub struct EditedAnswer {
    pub answer: String,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub found: bool,
    pub suggestion: Option<AnswerMatch>,
    /// The match's category, or the question's likely category when nothing matched.
    pub category: QuestionCategory,
}

#[derive(Serialize)]
pub struct CategorizeResponse {
    pub question: String,
    pub category: QuestionCategory,
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// POST /api/v1/answers
pub async fn handle_learn_answer(
    State(state): State<AppState>,
    Json(req): Json<LearnAnswerRequest>,
) -> Result<Json<LearnedAnswer>, AppError> {
    require(&req.user_email, "user_email")?;
    require(&req.question, "question")?;
    require(&req.answer, "answer")?;

    let learned = state
        .answers
        .learn_answer(
            &req.user_email,
            &req.question,
            &req.answer,
            req.platform.as_deref(),
            req.job_title.as_deref(),
        )
        .await?;
    Ok(Json(learned))
}

/// GET /api/v1/answers?user=
pub async fn handle_get_user_answers(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<LearnedAnswer>>, AppError> {
    require(&params.user, "user")?;
    Ok(Json(state.answers.get_user_answers(&params.user).await?))
}

/// GET /api/v1/answers/category/:category?user=
pub async fn handle_get_answers_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<LearnedAnswer>>, AppError> {
    require(&params.user, "user")?;
    let category = category
        .parse::<QuestionCategory>()
        .map_err(AppError::Validation)?;
    let answers = state
        .answers
        .get_answers_by_category(&params.user, category)
        .await?;
    Ok(Json(answers))
}

/// GET /api/v1/answers/suggest?user=&question=
pub async fn handle_suggest_answer(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Result<Json<SuggestResponse>, AppError> {
    require(&params.user, "user")?;

    let suggestion = state
        .answers
        .find_best_answer(&params.user, &params.question)
        .await?;
    let category = match &suggestion {
        Some(m) => m.category,
        None => state.answers.categorize_question(&params.question),
    };

    Ok(Json(SuggestResponse {
        found: suggestion.is_some(),
        suggestion,
        category,
    }))
}

/// POST /api/v1/answers/:id/used
pub async fn handle_answer_used(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.answers.record_answer_used(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/answers/:id/edited
pub async fn handle_answer_edited(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EditedAnswer>,
) -> Result<StatusCode, AppError> {
    require(&req.answer, "answer")?;
    state.answers.record_answer_edited(id, &req.answer).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/questions/categorize?question=
pub async fn handle_categorize_question(
    State(state): State<AppState>,
    Query(params): Query<QuestionQuery>,
) -> Json<CategorizeResponse> {
    let category = state.answers.categorize_question(&params.question);
    Json(CategorizeResponse {
        question: params.question,
        category,
    })
}
