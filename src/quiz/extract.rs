//! Recovering a question list from free-form model output.
//!
//! Candidate payloads are located by an ordered chain of strategies:
//!   1) a ```json fenced block holding an array
//!   2) the largest `[ { ... } ]` span in the text
//!   3) the whole text
//! The first strategy that yields a candidate wins; the candidate is then parsed
//! and validated. Any failure ends in the placeholder quiz from `fallback`, and
//! the outcome says which path was taken.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::QuizQuestion;
use crate::quiz::fallback::fallback_quiz;
use crate::util::trunc_for_log;

static FENCED_ARRAY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"```json\s*(\[[\s\S]*?\])\s*```").expect("fenced-array regex"));

static BARE_ARRAY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("bare-array regex"));

/// Why a candidate payload was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
  #[error("payload is not valid JSON: {0}")]
  Parse(String),
  #[error("quiz data must be a list")]
  NotAList,
  #[error("quiz data is an empty list")]
  Empty,
  #[error("question {index} is not an object")]
  NotAnObject { index: usize },
  #[error("question {index} is missing the '{key}' key")]
  MissingKey { index: usize, key: &'static str },
  #[error("question {index}: '{key}' must be {expected}")]
  WrongType { index: usize, key: &'static str, expected: &'static str },
}

/// Result of running the pipeline over one model response.
#[derive(Debug, PartialEq)]
pub enum Extraction {
  /// Questions recovered from the response, truncated and backfilled.
  Parsed(Vec<QuizQuestion>),
  /// Placeholder questions, and the reason the response was unusable.
  Fallback { reason: ExtractError, questions: Vec<QuizQuestion> },
}

impl Extraction {
  pub fn questions(&self) -> &[QuizQuestion] {
    match self {
      Extraction::Parsed(q) => q,
      Extraction::Fallback { questions, .. } => questions,
    }
  }

  pub fn into_questions(self) -> Vec<QuizQuestion> {
    match self {
      Extraction::Parsed(q) => q,
      Extraction::Fallback { questions, .. } => questions,
    }
  }

  pub fn fallback_reason(&self) -> Option<&ExtractError> {
    match self {
      Extraction::Parsed(_) => None,
      Extraction::Fallback { reason, .. } => Some(reason),
    }
  }

  pub fn is_fallback(&self) -> bool {
    self.fallback_reason().is_some()
  }
}

type Strategy = fn(&str) -> Option<&str>;

/// Tried in order; `whole_text` always yields, so the chain never comes up empty.
const STRATEGIES: &[(&str, Strategy)] = &[
  ("fenced_block", fenced_block),
  ("bare_array", bare_array),
  ("whole_text", whole_text),
];

pub fn fenced_block(raw: &str) -> Option<&str> {
  FENCED_ARRAY.captures(raw).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub fn bare_array(raw: &str) -> Option<&str> {
  BARE_ARRAY.find(raw).map(|m| m.as_str())
}

pub fn whole_text(raw: &str) -> Option<&str> {
  Some(raw)
}

/// First candidate payload produced by the strategy chain, with the strategy name.
pub fn locate_candidate(raw: &str) -> (&'static str, &str) {
  STRATEGIES
    .iter()
    .find_map(|(name, strategy)| strategy(raw).map(|c| (*name, c)))
    .unwrap_or(("whole_text", raw))
}

/// Locate, parse, validate and normalize. No fallback here.
pub fn parse_quiz(raw: &str, requested: usize) -> Result<Vec<QuizQuestion>, ExtractError> {
  let (strategy, candidate) = locate_candidate(raw);
  debug!(target: "quiz", strategy, candidate_len = candidate.len(), "Candidate payload located");

  let value: Value = serde_json::from_str(candidate).map_err(|e| ExtractError::Parse(e.to_string()))?;
  let items = validate(&value)?;

  Ok(items.into_iter().take(requested).map(into_question).collect())
}

/// Run the full pipeline. Never fails: unusable output yields `Extraction::Fallback`.
#[instrument(level = "info", skip(raw), fields(raw_len = raw.len()))]
pub fn extract(raw: &str, subject: &str, requested: usize) -> Extraction {
  match parse_quiz(raw, requested) {
    Ok(questions) => Extraction::Parsed(questions),
    Err(reason) => {
      warn!(
        target: "quiz",
        %subject,
        count = requested,
        %reason,
        preview = %trunc_for_log(raw, 120),
        "Using fallback quiz"
      );
      Extraction::Fallback { questions: fallback_quiz(subject, requested), reason }
    }
  }
}

/// Shape checks. `explanation` may be absent; when present it must be a string.
/// Option element types and `correct_answer` membership are not checked.
fn validate(value: &Value) -> Result<Vec<&Map<String, Value>>, ExtractError> {
  let list = value.as_array().ok_or(ExtractError::NotAList)?;
  if list.is_empty() {
    return Err(ExtractError::Empty);
  }

  list
    .iter()
    .enumerate()
    .map(|(index, item)| {
      let obj = item.as_object().ok_or(ExtractError::NotAnObject { index })?;
      expect_kind(obj, index, "question", "a string", Value::is_string)?;
      expect_kind(obj, index, "options", "a list", Value::is_array)?;
      expect_kind(obj, index, "correct_answer", "a string", Value::is_string)?;
      if let Some(exp) = obj.get("explanation") {
        if !exp.is_string() {
          return Err(ExtractError::WrongType { index, key: "explanation", expected: "a string" });
        }
      }
      Ok(obj)
    })
    .collect()
}

fn expect_kind(
  obj: &Map<String, Value>,
  index: usize,
  key: &'static str,
  expected: &'static str,
  check: fn(&Value) -> bool,
) -> Result<(), ExtractError> {
  match obj.get(key) {
    None => Err(ExtractError::MissingKey { index, key }),
    Some(v) if !check(v) => Err(ExtractError::WrongType { index, key, expected }),
    Some(_) => Ok(()),
  }
}

/// Build a question from a validated object, backfilling a missing or blank explanation.
fn into_question(obj: &Map<String, Value>) -> QuizQuestion {
  let text = |key: &str| obj.get(key).and_then(Value::as_str).unwrap_or_default().to_string();

  let options = obj
    .get("options")
    .and_then(Value::as_array)
    .map(|opts| opts.iter().map(option_text).collect())
    .unwrap_or_default();

  let correct_answer = text("correct_answer");
  let explanation = match obj.get("explanation").and_then(Value::as_str) {
    Some(e) if !e.trim().is_empty() => e.to_string(),
    _ => format!("The correct answer is {correct_answer}"),
  };

  QuizQuestion { question: text("question"), options, correct_answer, explanation }
}

/// Non-string options are kept in their JSON text form.
fn option_text(v: &Value) -> String {
  match v {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}
