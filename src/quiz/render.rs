//! HTML rendering of a quiz with the correct answers marked, and export to disk.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::domain::QuizQuestion;
use crate::util::html_escape;

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Error)]
#[error("failed to export quiz to {}: {source}", .path.display())]
pub struct ExportError {
  pub path: PathBuf,
  #[source]
  pub source: std::io::Error,
}

/// Label for the option at `pos`: a letter for the first four, then its 1-based number.
fn option_label(pos: usize) -> String {
  OPTION_LETTERS
    .get(pos)
    .map(|c| c.to_string())
    .unwrap_or_else(|| (pos + 1).to_string())
}

/// Position of the option to mark as correct. Falls back to 0 when
/// `correct_answer` is not one of the options.
pub fn correct_index(q: &QuizQuestion) -> usize {
  q.options.iter().position(|o| *o == q.correct_answer).unwrap_or(0)
}

/// One `<h4>` block per question, in order. All model text is escaped.
pub fn render_quiz_html(questions: &[QuizQuestion]) -> String {
  let mut html = String::new();
  for (i, q) in questions.iter().enumerate() {
    let _ = write!(html, "<h4>Q{}. {}</h4><ul>", i + 1, html_escape(&q.question));
    let correct = correct_index(q);
    for (j, option) in q.options.iter().enumerate() {
      let label = option_label(j);
      let option = html_escape(option);
      if j == correct {
        let _ = write!(html, "<li><b>{label}. {option} ✅</b></li>");
      } else {
        let _ = write!(html, "<li>{label}. {option}</li>");
      }
    }
    let _ = write!(html, "</ul><p><i>Explanation: {}</i></p><hr>", html_escape(&q.explanation));
  }
  html
}

/// Write the rendered quiz to `path`, replacing any existing file.
#[allow(dead_code)]
#[instrument(level = "info", skip(questions, path), fields(count = questions.len(), path = %path.as_ref().display()))]
pub(crate) async fn export_quiz_html(questions: &[QuizQuestion], path: impl AsRef<Path>) -> Result<(), ExportError> {
  let path = path.as_ref();
  match tokio::fs::write(path, render_quiz_html(questions)).await {
    Ok(()) => {
      info!(target: "quiz", path = %path.display(), "Quiz exported");
      Ok(())
    }
    Err(source) => {
      error!(target: "quiz", path = %path.display(), error = %source, "Quiz export failed");
      Err(ExportError { path: path.to_path_buf(), source })
    }
  }
}
