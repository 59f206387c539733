//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{QuizQuestion, DEFAULT_QUESTIONS};

fn default_background() -> String {
    "Unknown".into()
}

fn default_language() -> String {
    "English".into()
}

fn default_num_questions() -> usize {
    DEFAULT_QUESTIONS
}

fn default_reveal() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct TutorIn {
    pub subject: String,
    pub level: String,
    pub question: String,
    pub learning_style: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct TutorOut {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizIn {
    pub subject: String,
    pub level: String,
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,
    #[serde(default = "default_reveal")]
    pub reveal_answer: bool,
}

/// `formatted_quiz` is omitted entirely when answers are not revealed.
#[derive(Debug, Serialize)]
pub struct QuizOut {
    pub quiz: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_quiz: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tutor_defaults_fill_optional_fields() {
        let t: TutorIn = serde_json::from_str(
            r#"{"subject":"Math","level":"Beginner","question":"2+2?","learning_style":"visual"}"#,
        )
        .unwrap();
        assert_eq!(t.background, "Unknown");
        assert_eq!(t.language, "English");
    }

    #[test]
    fn quiz_defaults() {
        let q: QuizIn = serde_json::from_str(r#"{"subject":"Math","level":"Beginner"}"#).unwrap();
        assert_eq!(q.num_questions, 5);
        assert!(q.reveal_answer);
    }

    #[test]
    fn quiz_out_omits_formatted_quiz_when_hidden() {
        let out = QuizOut { quiz: vec![], formatted_quiz: None };
        let v = serde_json::to_value(&out).unwrap();
        assert!(v.get("formatted_quiz").is_none());
        assert!(v["quiz"].as_array().unwrap().is_empty());
    }
}
