//! Application state shared by all handlers: the completion client and prompt templates.
//!
//! Nothing here is mutable; every request runs its own independent pipeline.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{Config, Prompts};
use crate::openai::{CompletionClient, CompletionError, OpenAI};

#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<dyn CompletionClient>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from configuration with the OpenAI-backed completion client.
    #[instrument(level = "info", skip_all)]
    pub fn from_config(cfg: &Config) -> Result<Self, CompletionError> {
        let openai = OpenAI::new(cfg)?;
        info!(
            target: "tutor_backend",
            base_url = %openai.base_url,
            model = %openai.model,
            temperature = openai.temperature,
            timeout = ?openai.timeout,
            "OpenAI completion client ready."
        );
        Ok(Self::new(Arc::new(openai), cfg.prompts.clone()))
    }

    pub fn new(completion: Arc<dyn CompletionClient>, prompts: Prompts) -> Self {
        Self { completion, prompts }
    }
}
