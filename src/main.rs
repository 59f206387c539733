//! AI Tutor · Backend
//!
//! - Axum HTTP API for tutoring answers and generated quizzes
//! - OpenAI chat.completions as the text-completion service
//! - Static UI fallback (./static/index.html)
//!
//! Important env variables:
//!   OPENAI_API_KEY      : required; the service refuses to start without it
//!   OPENAI_BASE_URL     : default "https://api.openai.com/v1"
//!   OPENAI_MODEL        : default "gpt-4o-mini"
//!   OPENAI_TEMPERATURE  : default 0.5
//!   OPENAI_TIMEOUT_SECS : default 60
//!   PORT                : u16 (default 8000)
//!   STATIC_DIR          : default "./static"
//!   PROMPTS_CONFIG_PATH : path to TOML file overriding prompt templates
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod config;
mod domain;
mod formatter;
mod logic;
mod openai;
mod prompt;
mod protocol;
mod quiz;
mod routes;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = Config::from_env().map_err(|e| {
    error!(target: "tutor_backend", error = %e, "Invalid configuration; refusing to start");
    e
  })?;
  info!(target: "tutor_backend", ?cfg, "Configuration loaded");

  let state = Arc::new(AppState::from_config(&cfg)?);
  let app = build_router(state, &cfg.static_dir);

  let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "tutor_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "tutor_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(target: "tutor_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "tutor_backend", "Shutdown signal received");
}
