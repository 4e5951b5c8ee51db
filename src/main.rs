//! Oms BSE Odisha Mock Test · Question Paper Backend
//!
//! - Axum HTTP API that generates Class X General Science pre-board papers (Odia medium)
//!   through the Gemini `generateContent` endpoint
//! - Server-side rendering: paper HTML, plain text, Word (.doc), OMR sheet, answer key
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                 : u16 (default 3000)
//!   GEMINI_API_KEY       : API key (falls back to API_KEY)
//!   CREDENTIAL_SOURCE    : "select" lets the user supply the key from the UI
//!   GEMINI_BASE_URL      : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL         : default "gemini-2.5-flash"
//!   MOCKTEST_CONFIG_PATH : path to TOML config (branding, years/sets, distributions)
//!   LOG_LEVEL            : tracing filter, overrides [logging].filter
//!   LOG_FORMAT           : "pretty" or "json", overrides [logging].format

mod telemetry;
mod util;
mod domain;
mod blueprint;
mod syllabus;
mod prompt;
mod config;
mod credentials;
mod gemini;
mod generator;
mod validate;
mod state;
mod protocol;
mod render;
mod routes;
#[cfg(test)]
mod fixtures;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let loaded = AppConfig::load();
  telemetry::init_tracing(&loaded.config.logging);
  loaded.report();

  // Credential provider, Gemini client, empty workspace.
  let state = Arc::new(AppState::from_config(loaded.config)?);

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "mocktest_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
