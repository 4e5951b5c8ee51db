//! Subscriber setup from the `[logging]` config (LOG_LEVEL / LOG_FORMAT already applied).
//!
//! Targets are part of the output: `paper` for generation/validation/export events,
//! `mocktest_backend` for startup and credentials, `gemini` for outbound calls.

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingCfg, DEFAULT_LOG_FILTER};

/// Directives that fail to parse fall back to the default and are reported once
/// the subscriber is installed.
pub fn init_tracing(cfg: &LoggingCfg) {
  let (filter, rejected) = match EnvFilter::try_new(&cfg.filter) {
    Ok(filter) => (filter, None),
    Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
  };

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  match cfg.format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }

  if let Some(e) = rejected {
    warn!(target: "mocktest_backend", filter = %cfg.filter, error = %e, "Invalid log filter; using the default");
  }
}
