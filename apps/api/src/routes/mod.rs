pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::answers::handlers as answers;
use crate::autofill::handlers as autofill;
use crate::field_mapping::handlers as mappings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/autofill", post(autofill::handle_autofill))
        // Field mapping feedback
        .route("/api/v1/mappings", get(mappings::handle_get_mapping))
        .route(
            "/api/v1/mappings/feedback/success",
            post(mappings::handle_record_success),
        )
        .route(
            "/api/v1/mappings/feedback/correction",
            post(mappings::handle_record_correction),
        )
        // Learned answers
        .route(
            "/api/v1/answers",
            get(answers::handle_get_user_answers).post(answers::handle_learn_answer),
        )
        .route(
            "/api/v1/answers/category/:category",
            get(answers::handle_get_answers_by_category),
        )
        .route("/api/v1/answers/suggest", get(answers::handle_suggest_answer))
        .route("/api/v1/answers/:id/used", post(answers::handle_answer_used))
        .route(
            "/api/v1/answers/:id/edited",
            post(answers::handle_answer_edited),
        )
        .route(
            "/api/v1/questions/categorize",
            get(answers::handle_categorize_question),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::answers::AnswerLearningEngine;
    use crate::config::Config;
    use crate::field_mapping::FieldMappingEngine;
    use crate::store::InMemoryStore;

    fn app() -> Router {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState {
            config: Config {
                database_url: None,
                anthropic_api_key: None,
                ai_timeout: Duration::from_secs(5),
                port: 0,
                rust_log: "info".to_string(),
            },
            mappings: FieldMappingEngine::new(store.clone()),
            answers: AnswerLearningEngine::new(store),
        };
        build_router(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "autofill-api");
        assert_eq!(body["storage"], "memory");
        assert_eq!(body["ai_assistant"], false);
    }

    #[tokio::test]
    async fn test_autofill_then_feedback_round() {
        let app = app();
        let url = "https://acme.workday.com/apply";

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/autofill",
            Some(json!({
                "url": url,
                "user_email": "jane@example.com",
                "form_fields": [
                    {"id": "fn", "type": "text", "label": "First Name"},
                    {"name": "mail", "type": "email", "label": "Email"}
                ],
                "profile": {"first_name": "Jane", "email": "jane@example.com"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mapping"]["fn"], "Jane");
        assert_eq!(body["mapping"]["mail"], "jane@example.com");
        assert_eq!(body["detected_platform"], "workday");
        assert_eq!(body["message"], "Found 2 fields to autofill.");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/mappings/feedback/success",
            Some(json!({"url": url})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/mappings/feedback/correction",
            Some(json!({"url": url, "field_id": "fn", "attribute": "lastName"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let uri = format!("/api/v1/mappings?url={url}");
        let (status, mapping) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mapping["success_count"], 1);
        assert_eq!(mapping["correction_count"], 1);
        assert_eq!(mapping["confidence_score"], 0.5);
        assert_eq!(mapping["field_rules"][0]["profile_attribute"], "lastName");
    }

    #[tokio::test]
    async fn test_unknown_mapping_is_404() {
        let (status, body) = send(
            &app(),
            Method::GET,
            "/api/v1/mappings?url=https://jobs.lever.co/acme",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_correction_with_unknown_attribute_is_rejected() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/v1/mappings/feedback/correction",
            Some(json!({"url": "https://x.workday.com", "field_id": "a", "attribute": "shoeSize"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_answer_lifecycle() {
        let app = app();

        let (status, learned) = send(
            &app,
            Method::POST,
            "/api/v1/answers",
            Some(json!({
                "user_email": "jane@example.com",
                "question": "Why do you want to work here?",
                "answer": "I love building products",
                "platform": "greenhouse",
                "job_title": "SWE"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(learned["category"], "MOTIVATION");
        let id = learned["id"].as_str().unwrap().to_string();

        let (status, suggestion) = send(
            &app,
            Method::GET,
            "/api/v1/answers/suggest?user=jane@example.com&question=Why%20do%20you%20want%20to%20work%20here%3F",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(suggestion["found"], true);
        assert_eq!(suggestion["suggestion"]["answer"], "I love building products");
        assert_eq!(suggestion["suggestion"]["confidence"], 0.6);

        let (status, _) = send(&app, Method::POST, &format!("/api/v1/answers/{id}/used"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/v1/answers/{id}/edited"),
            Some(json!({"answer": "I love shipping products"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, all) = send(&app, Method::GET, "/api/v1/answers?user=jane@example.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all[0]["answer"], "I love shipping products");
        assert_eq!(all[0]["use_count"], 1);
        assert_eq!(all[0]["confidence"], 0.6);

        let (status, motivation) = send(
            &app,
            Method::GET,
            "/api/v1/answers/category/motivation?user=jane@example.com",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(motivation.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_feedback_on_unknown_answer_is_idempotent() {
        let uri = format!("/api/v1/answers/{}/used", uuid::Uuid::new_v4());
        let (status, _) = send(&app(), Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_learning_requires_answer_text() {
        let (status, _) = send(
            &app(),
            Method::POST,
            "/api/v1/answers",
            Some(json!({"user_email": "jane@example.com", "question": "Why?", "answer": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_suggest_without_match_reports_likely_category() {
        let (status, body) = send(
            &app(),
            Method::GET,
            "/api/v1/answers/suggest?user=jane@example.com&question=What%20are%20your%20salary%20expectations",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["found"], false);
        assert_eq!(body["suggestion"], Value::Null);
        assert_eq!(body["category"], "SALARY");
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let (status, _) = send(
            &app(),
            Method::GET,
            "/api/v1/answers/category/hobbies?user=jane@example.com",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_categorize_question() {
        let (status, body) = send(
            &app(),
            Method::GET,
            "/api/v1/questions/categorize?question=When%20can%20you%20start",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "AVAILABILITY");
    }
}
