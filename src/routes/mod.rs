//! Router assembly: HTTP endpoints, static UI, CORS, and HTTP tracing.

use std::{path::Path, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - `POST /tutor`, `POST /quiz`, `GET /quiz-html/:subject/:level/:num_questions`, `GET /health`
/// - Static UI from `static_dir` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let static_service = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(http::http_health))
        .route("/tutor", post(http::http_post_tutor))
        .route("/quiz", post(http::http_post_quiz))
        .route(
            "/quiz-html/:subject/:level/:num_questions",
            get(http::http_get_quiz_html),
        )
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::test_support::{state_with, ScriptedCompletion};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const GOOD_QUIZ: &str = r#"```json
[{"question":"2+2?","options":["3","4","5","6"],"correct_answer":"4","explanation":"Basic sum"}]
```"#;

    fn app(client: Arc<ScriptedCompletion>) -> Router {
        build_router(Arc::new(state_with(client)), Path::new("./static"))
    }

    async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn as_json(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, body) = call(app(ScriptedCompletion::ok("")), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!({ "status": "Healthy" }));
    }

    #[tokio::test]
    async fn tutor_returns_response() {
        let body = json!({
            "subject": "Math", "level": "Beginner",
            "question": "What is a prime?", "learning_style": "Text-Based"
        });
        let (status, out) = call(app(ScriptedCompletion::ok("A prime has two divisors.")), Method::POST, "/tutor", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&out), json!({ "response": "A prime has two divisors." }));
    }

    #[tokio::test]
    async fn tutor_failure_is_500_with_detail() {
        let body = json!({
            "subject": "Math", "level": "Beginner",
            "question": "?", "learning_style": "visual"
        });
        let (status, out) = call(app(ScriptedCompletion::failing("timeout")), Method::POST, "/tutor", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = as_json(&out)["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("Error generating tutoring response:"));
        assert!(detail.contains("timeout"));
    }

    #[tokio::test]
    async fn quiz_reveal_includes_formatted_quiz() {
        let body = json!({ "subject": "Math", "level": "Beginner", "num_questions": 1 });
        let (status, out) = call(app(ScriptedCompletion::ok(GOOD_QUIZ)), Method::POST, "/quiz", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let v = as_json(&out);
        assert_eq!(v["quiz"][0]["correct_answer"], "4");
        assert_eq!(v["quiz"][0]["explanation"], "Basic sum");
        assert!(v["formatted_quiz"].as_str().unwrap().contains("<b>B. 4 ✅</b>"));
    }

    #[tokio::test]
    async fn quiz_hidden_answers_omit_formatted_quiz() {
        let body = json!({ "subject": "Science", "level": "Beginner", "num_questions": 4, "reveal_answer": false });
        let (status, out) = call(app(ScriptedCompletion::ok("no json here")), Method::POST, "/quiz", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let v = as_json(&out);
        assert!(v.get("formatted_quiz").is_none());
        assert_eq!(v["quiz"].as_array().unwrap().len(), 4);
        assert_eq!(v["quiz"][3]["question"], "Sample Science question 4");
    }

    #[tokio::test]
    async fn quiz_count_out_of_range_is_rejected() {
        for n in [0, 11] {
            let body = json!({ "subject": "Math", "level": "Beginner", "num_questions": n });
            let client = ScriptedCompletion::ok(GOOD_QUIZ);
            let (status, out) = call(app(client.clone()), Method::POST, "/quiz", Some(body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(as_json(&out)["detail"].as_str().unwrap().contains("num_questions"));
            assert!(client.prompts.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn quiz_completion_failure_is_500() {
        let body = json!({ "subject": "Math", "level": "Beginner" });
        let (status, out) = call(app(ScriptedCompletion::failing("401")), Method::POST, "/quiz", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(as_json(&out)["detail"].as_str().unwrap().starts_with("Error creating quiz:"));
    }

    #[tokio::test]
    async fn quiz_html_route_returns_rendered_fragment() {
        let (status, out) = call(app(ScriptedCompletion::ok(GOOD_QUIZ)), Method::GET, "/quiz-html/Math/Beginner/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(out).unwrap();
        assert!(html.starts_with("<h4>Q1. 2+2?</h4>"));
    }

    #[tokio::test]
    async fn quiz_html_route_checks_count() {
        let (status, _) = call(app(ScriptedCompletion::ok(GOOD_QUIZ)), Method::GET, "/quiz-html/Math/Beginner/42", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn mistyped_quiz_body_is_rejected_with_detail() {
        let client = ScriptedCompletion::ok(GOOD_QUIZ);
        let body = json!({ "subject": "Math", "level": "Beginner", "num_questions": -1 });
        let (status, out) = call(app(client.clone()), Method::POST, "/quiz", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(as_json(&out)["detail"].as_str().unwrap().contains("num_questions"));

        let body = json!({ "subject": "Math", "level": "Beginner", "num_questions": "five" });
        let (status, out) = call(app(client.clone()), Method::POST, "/quiz", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(as_json(&out)["detail"].is_string());
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_tutor_field_is_rejected_with_detail() {
        let body = json!({ "subject": "Math", "level": "Beginner", "learning_style": "visual" });
        let (status, out) = call(app(ScriptedCompletion::ok("")), Method::POST, "/tutor", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(as_json(&out)["detail"].as_str().unwrap().contains("question"));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_with_detail() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/quiz")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"subject\": \"Math\","))
            .unwrap();
        let res = app(ScriptedCompletion::ok(GOOD_QUIZ)).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(as_json(&bytes)["detail"].is_string());
    }
}
