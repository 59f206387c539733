//! Completion-service client.
//!
//! `CompletionClient` is the seam the rest of the backend talks to: one prompt in,
//! one block of text out. `OpenAI` implements it on top of chat.completions.
//! Calls are instrumented and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key. No retries happen here; a failed call is reported once.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::util::trunc_for_log;

#[derive(Debug, Error)]
pub enum CompletionError {
  #[error("request to completion service failed: {0}")]
  Transport(String),
  #[error("completion service returned HTTP {status}: {message}")]
  Status { status: u16, message: String },
  #[error("could not decode completion response: {0}")]
  Decode(String),
  #[error("completion service returned no text")]
  Empty,
}

/// A hosted text-completion model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Clone)]
pub struct OpenAI {
  client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
  pub timeout: Duration,
}

impl OpenAI {
  pub fn new(cfg: &Config) -> Result<Self, CompletionError> {
    let client = reqwest::Client::builder()
      .timeout(cfg.timeout)
      .build()
      .map_err(|e| CompletionError::Transport(e.to_string()))?;

    Ok(Self {
      client,
      api_key: cfg.api_key.clone(),
      base_url: cfg.base_url.trim_end_matches('/').to_string(),
      model: cfg.model.clone(),
      temperature: cfg.temperature,
      timeout: cfg.timeout,
    })
  }
}

#[async_trait]
impl CompletionClient for OpenAI {
  /// Single-message chat completion returning the first choice's text.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: &self.model,
      messages: vec![ChatMessageReq { role: "user", content: prompt }],
      temperature: self.temperature,
    };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, concat!("tutor-backend/", env!("CARGO_PKG_VERSION")))
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await
      .map_err(|e| {
        error!(elapsed = ?start.elapsed(), error = %e, "Completion request failed");
        CompletionError::Transport(e.to_string())
      })?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      error!(elapsed = ?start.elapsed(), %status, "Completion service returned an error");
      return Err(CompletionError::Status { status: status.as_u16(), message });
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| CompletionError::Decode(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }

    let text = first_choice_text(body).ok_or(CompletionError::Empty)?;
    info!(elapsed = ?start.elapsed(), response_len = text.len(), "Model response received");
    debug!(preview = %trunc_for_log(&text, 200), "Model response preview");
    Ok(text)
  }
}

fn first_choice_text(body: ChatCompletionResponse) -> Option<String> {
  body.choices
    .into_iter()
    .next()
    .and_then(|c| c.message.content)
    .map(|t| t.trim().to_string())
    .filter(|t| !t.is_empty())
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessageReq<'a>>,
  temperature: f32,
}
#[derive(Serialize)]
struct ChatMessageReq<'a> { role: &'a str, content: &'a str }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
