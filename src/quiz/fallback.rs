//! Placeholder quiz served when the model output cannot be turned into questions.

use crate::domain::QuizQuestion;

pub const FALLBACK_OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];
pub const FALLBACK_CORRECT: &str = "Option A";
pub const FALLBACK_EXPLANATION: &str = "This is a fallback explanation for the question.";

/// Exactly `count` questions, numbered from 1.
pub fn fallback_quiz(subject: &str, count: usize) -> Vec<QuizQuestion> {
  (1..=count)
    .map(|i| QuizQuestion {
      question: format!("Sample {subject} question {i}"),
      options: FALLBACK_OPTIONS.iter().map(|o| o.to_string()).collect(),
      correct_answer: FALLBACK_CORRECT.to_string(),
      explanation: FALLBACK_EXPLANATION.to_string(),
    })
    .collect()
}
