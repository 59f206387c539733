//! Domain models used by the backend: quiz questions, quiz results and request bounds.

use serde::{Deserialize, Serialize};

/// Smallest number of questions a quiz request may ask for.
pub const MIN_QUESTIONS: usize = 1;
/// Largest number of questions a quiz request may ask for.
pub const MAX_QUESTIONS: usize = 10;
/// Used when the client does not say how many questions it wants.
pub const DEFAULT_QUESTIONS: usize = 5;

/// One multiple-choice question, in the wire shape the model is asked to emit.
///
/// `correct_answer` is expected to be one of `options` but nothing enforces it;
/// the renderer copes with a mismatch by marking the first option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: String,
  pub explanation: String,
}

/// Outcome of one quiz request.
/// `rendered_html` is present iff the caller asked for answers to be revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResult {
  pub questions: Vec<QuizQuestion>,
  pub rendered_html: Option<String>,
}

/// True if `n` is an acceptable question count for a quiz request.
pub fn question_count_in_range(n: usize) -> bool {
  (MIN_QUESTIONS..=MAX_QUESTIONS).contains(&n)
}
