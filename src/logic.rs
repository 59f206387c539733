//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Tutoring answers (prompt, completion, learning-style note)
//!   - Quiz generation (prompt, completion, extraction with fallback, optional rendering)
//!
//! Completion failures are returned to the caller. Unusable quiz output is not:
//! the extraction pipeline absorbs it and serves placeholder questions instead.

use tracing::{info, instrument};

use crate::domain::QuizResult;
use crate::formatter::format_tutoring_response;
use crate::openai::CompletionError;
use crate::prompt::{build_quiz_prompt, build_tutor_prompt, TutorContext};
use crate::protocol::TutorIn;
use crate::quiz::{extract, render_quiz_html};
use crate::state::AppState;

#[instrument(level = "info", skip(state, req), fields(subject = %req.subject, level = %req.level, question_len = req.question.len()))]
pub async fn generate_tutoring_response(state: &AppState, req: &TutorIn) -> Result<String, CompletionError> {
  let ctx = TutorContext {
    subject: &req.subject,
    level: &req.level,
    question: &req.question,
    learning_style: &req.learning_style,
    background: &req.background,
    language: &req.language,
  };
  let prompt = build_tutor_prompt(&state.prompts, &ctx);
  let raw = state.completion.complete(&prompt).await?;
  info!(target: "tutor", response_len = raw.len(), "Tutoring response generated");
  Ok(format_tutoring_response(&raw, &req.learning_style))
}

#[instrument(level = "info", skip(state))]
pub async fn create_quiz(
  state: &AppState,
  subject: &str,
  level: &str,
  num_questions: usize,
  reveal_answer: bool,
) -> Result<QuizResult, CompletionError> {
  let prompt = build_quiz_prompt(&state.prompts, subject, level, num_questions);
  let raw = state.completion.complete(&prompt).await?;

  let extraction = extract(&raw, subject, num_questions);
  info!(target: "quiz", %subject, count = extraction.questions().len(), fallback = extraction.is_fallback(), "Quiz ready");
  let questions = extraction.into_questions();

  let rendered_html = reveal_answer.then(|| render_quiz_html(&questions));
  Ok(QuizResult { questions, rendered_html })
}
