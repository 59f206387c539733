//! Service configuration: completion-service settings from the environment and
//! prompt templates from an optional TOML file.
//!
//! See `Config` and `Prompts` for the expected schema.

use std::{fmt, path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
  #[error("OPENAI_API_KEY not found in environment variables")]
  MissingApiKey,
  #[error("invalid value for {key}: {value:?} ({reason})")]
  Invalid { key: &'static str, value: String, reason: String },
}

/// Everything the service needs to talk to the completion service and to serve HTTP.
#[derive(Clone)]
pub struct Config {
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
  pub timeout: Duration,
  pub port: u16,
  pub static_dir: PathBuf,
  pub prompts: Prompts,
}

impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("api_key", &"<redacted>")
      .field("base_url", &self.base_url)
      .field("model", &self.model)
      .field("temperature", &self.temperature)
      .field("timeout", &self.timeout)
      .field("port", &self.port)
      .field("static_dir", &self.static_dir)
      .finish()
  }
}

impl Config {
  /// Build the configuration from process environment variables.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  /// Same as `from_env`, but reads variables through `get` so callers can supply their own source.
  pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let api_key = get("OPENAI_API_KEY")
      .filter(|k| !k.trim().is_empty())
      .ok_or(ConfigError::MissingApiKey)?;

    let temperature = match get("OPENAI_TEMPERATURE") {
      Some(raw) => {
        let t: f32 = raw.trim().parse().map_err(|e: std::num::ParseFloatError| ConfigError::Invalid {
          key: "OPENAI_TEMPERATURE",
          value: raw.clone(),
          reason: e.to_string(),
        })?;
        if !(0.0..=2.0).contains(&t) {
          return Err(ConfigError::Invalid {
            key: "OPENAI_TEMPERATURE",
            value: raw,
            reason: "must be within 0.0..=2.0".into(),
          });
        }
        t
      }
      None => DEFAULT_TEMPERATURE,
    };

    let timeout_secs = parse_or("OPENAI_TIMEOUT_SECS", get("OPENAI_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?;
    let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;

    let prompts = get("PROMPTS_CONFIG_PATH")
      .and_then(|path| load_prompts_from_path(&path))
      .unwrap_or_default();

    Ok(Self {
      api_key,
      base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
      model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
      temperature,
      timeout: Duration::from_secs(timeout_secs),
      port,
      static_dir: get("STATIC_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("./static")),
      prompts,
    })
  }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
  T: std::str::FromStr,
  T::Err: fmt::Display,
{
  match raw {
    Some(v) => v.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
      key,
      value: v.clone(),
      reason: e.to_string(),
    }),
    None => Ok(default),
  }
}

/// Top-level shape of the optional TOML file.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct PromptsFile {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompt templates sent to the completion service.
/// Placeholders: `{subject}`, `{level}`, `{question}`, `{learning_style}`,
/// `{background}`, `{language}`, `{num_questions}`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Prompts {
  pub tutor_template: String,
  pub quiz_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      tutor_template: "You are an expert tutor in {subject} for {level} level students.
The student's learning style is: {learning_style}
Their background knowledge: {background}
Preferred language: {language}

Please provide a clear and helpful response to this question:
{question}

Please structure your response in a way that:
1. Addresses the question directly
2. Provides step-by-step explanations
3. Includes relevant examples
4. Uses appropriate difficulty level for the student
".into(),
      quiz_template: r#"You are an expert tutor in {subject} for {level} level students.
Please create a quiz with {num_questions} questions.
The quiz questions should be in level {level} of difficulty.

Format your response as a JSON array:
[
    {
        "question": "question 1",
        "options": ["option 1", "option 2", "option 3", "option 4"],
        "correct_answer": "correct answer",
        "explanation": "explanation of the correct answer"
    }
]
Do not include any other text in your response.
"#.into(),
    }
  }
}

/// Attempt to load `Prompts` from a TOML file. On any parsing/IO error, returns None.
pub fn load_prompts_from_path(path: &str) -> Option<Prompts> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<PromptsFile>(&s) {
      Ok(cfg) => {
        info!(target: "tutor_backend", %path, "Loaded prompt templates (TOML)");
        Some(cfg.prompts)
      }
      Err(e) => {
        error!(target: "tutor_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "tutor_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
