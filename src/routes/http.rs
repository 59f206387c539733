//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and maps failures to `{ "detail": ... }` bodies.

use std::sync::Arc;

use axum::{
  extract::{rejection::JsonRejection, FromRequest, Path, State},
  http::StatusCode,
  response::{Html, IntoResponse, Response},
  Json,
};
use tracing::{error, info, instrument, warn};

use crate::domain::{question_count_in_range, MAX_QUESTIONS, MIN_QUESTIONS};
use crate::logic::{create_quiz, generate_tutoring_response};
use crate::protocol::*;
use crate::state::AppState;

#[derive(Debug)]
pub struct ApiError {
  status: StatusCode,
  detail: String,
}

impl ApiError {
  fn internal(detail: String) -> Self {
    Self { status: StatusCode::INTERNAL_SERVER_ERROR, detail }
  }

  fn unprocessable(detail: String) -> Self {
    Self { status: StatusCode::UNPROCESSABLE_ENTITY, detail }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(ErrorOut { detail: self.detail })).into_response()
  }
}

/// Malformed or mistyped bodies keep the `{ "detail": ... }` shape and axum's status.
impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    warn!(target: "tutor_backend", status = %rejection.status(), error = %rejection.body_text(), "Rejected request body");
    Self { status: rejection.status(), detail: rejection.body_text() }
  }
}

/// `Json` extractor whose rejections are reported as `ApiError`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

fn check_question_count(n: usize) -> Result<(), ApiError> {
  if question_count_in_range(n) {
    Ok(())
  } else {
    Err(ApiError::unprocessable(format!(
      "num_questions must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}, got {n}"
    )))
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { status: "Healthy" })
}

#[instrument(level = "info", skip(state, body), fields(subject = %body.subject, question_len = body.question.len()))]
pub async fn http_post_tutor(
  State(state): State<Arc<AppState>>,
  ApiJson(body): ApiJson<TutorIn>,
) -> Result<Json<TutorOut>, ApiError> {
  match generate_tutoring_response(&state, &body).await {
    Ok(response) => Ok(Json(TutorOut { response })),
    Err(e) => {
      error!(target: "tutor", error = %e, "Error generating tutoring response");
      Err(ApiError::internal(format!("Error generating tutoring response: {e}")))
    }
  }
}

#[instrument(level = "info", skip(state, body), fields(subject = %body.subject, level = %body.level, num_questions = body.num_questions, reveal = body.reveal_answer))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  ApiJson(body): ApiJson<QuizIn>,
) -> Result<Json<QuizOut>, ApiError> {
  check_question_count(body.num_questions)?;
  let result = create_quiz(&state, &body.subject, &body.level, body.num_questions, body.reveal_answer)
    .await
    .map_err(|e| {
      error!(target: "quiz", error = %e, "Error creating quiz");
      ApiError::internal(format!("Error creating quiz: {e}"))
    })?;
  info!(target: "quiz", count = result.questions.len(), "HTTP quiz served");
  Ok(Json(QuizOut { quiz: result.questions, formatted_quiz: result.rendered_html }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_quiz_html(
  State(state): State<Arc<AppState>>,
  Path((subject, level, num_questions)): Path<(String, String, usize)>,
) -> Result<Html<String>, ApiError> {
  check_question_count(num_questions)?;
  let result = create_quiz(&state, &subject, &level, num_questions, true)
    .await
    .map_err(|e| {
      error!(target: "quiz", error = %e, "Error creating quiz");
      ApiError::internal(format!("Error creating quiz: {e}"))
    })?;
  Ok(Html(result.rendered_html.unwrap_or_default()))
}
