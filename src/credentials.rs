//! Credential providers for the generation service.
//!
//! One provider is chosen at startup and injected everywhere a key is needed:
//!   - `EnvCredentials`: key from GEMINI_API_KEY (or API_KEY), fixed for the process.
//!   - `SelectedCredentials`: key chosen interactively through the UI; it can be
//!     replaced and is dropped when the service reports it as no longer valid.

use std::fmt;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::{info, warn};

/// An API key. Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
  /// Trimmed key, or None when nothing is left.
  pub fn new(raw: impl Into<String>) -> Option<Self> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
  }

  pub fn expose(&self) -> &str { &self.0 }
}

impl fmt::Debug for ApiKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ApiKey(***{} chars)", self.0.chars().count())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
  #[error("API Key is missing")]
  Missing,
  #[error("this deployment reads its key from the environment; interactive selection is unavailable")]
  SelectionUnsupported,
  #[error("an empty key cannot be selected")]
  EmptyKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialSource {
  Environment,
  Selected,
}

impl CredentialSource {
  pub fn as_str(self) -> &'static str {
    match self {
      CredentialSource::Environment => "environment",
      CredentialSource::Selected => "selected",
    }
  }
}

pub trait CredentialProvider: Send + Sync {
  fn source(&self) -> CredentialSource;

  /// The key to use for the next request.
  fn api_key(&self) -> Result<ApiKey, CredentialError>;

  fn has_key(&self) -> bool { self.api_key().is_ok() }

  /// Whether the user can pick a (new) key interactively.
  fn supports_selection(&self) -> bool;

  fn select(&self, raw: &str) -> Result<(), CredentialError>;

  /// Forget `rejected` after the service refused it. A key selected since then is kept.
  fn invalidate(&self, rejected: &ApiKey);
}

pub struct EnvCredentials {
  key: Option<ApiKey>,
}

impl EnvCredentials {
  pub fn new(key: Option<ApiKey>) -> Self { Self { key } }

  pub fn from_env() -> Self {
    let key = std::env::var("GEMINI_API_KEY")
      .ok()
      .and_then(ApiKey::new)
      .or_else(|| std::env::var("API_KEY").ok().and_then(ApiKey::new));
    Self { key }
  }
}

impl CredentialProvider for EnvCredentials {
  fn source(&self) -> CredentialSource { CredentialSource::Environment }

  fn api_key(&self) -> Result<ApiKey, CredentialError> {
    self.key.clone().ok_or(CredentialError::Missing)
  }

  fn supports_selection(&self) -> bool { false }

  fn select(&self, _raw: &str) -> Result<(), CredentialError> {
    Err(CredentialError::SelectionUnsupported)
  }

  // A key baked into the environment cannot be re-selected, so it is kept.
  fn invalidate(&self, _rejected: &ApiKey) {}
}

#[derive(Default)]
pub struct SelectedCredentials {
  key: RwLock<Option<ApiKey>>,
}

impl SelectedCredentials {
  pub fn new(initial: Option<ApiKey>) -> Self {
    Self { key: RwLock::new(initial) }
  }
}

impl CredentialProvider for SelectedCredentials {
  fn source(&self) -> CredentialSource { CredentialSource::Selected }

  fn api_key(&self) -> Result<ApiKey, CredentialError> {
    let guard = self.key.read().unwrap_or_else(|e| e.into_inner());
    guard.clone().ok_or(CredentialError::Missing)
  }

  fn supports_selection(&self) -> bool { true }

  fn select(&self, raw: &str) -> Result<(), CredentialError> {
    let key = ApiKey::new(raw).ok_or(CredentialError::EmptyKey)?;
    *self.key.write().unwrap_or_else(|e| e.into_inner()) = Some(key);
    info!(target: "mocktest_backend", "API key selected");
    Ok(())
  }

  fn invalidate(&self, rejected: &ApiKey) {
    let mut guard = self.key.write().unwrap_or_else(|e| e.into_inner());
    if guard.as_ref() == Some(rejected) {
      *guard = None;
      warn!(target: "mocktest_backend", "Selected API key invalidated");
    } else {
      info!(target: "mocktest_backend", "Rejected API key was already replaced; keeping the current one");
    }
  }
}

/// Pick the provider once at startup. CREDENTIAL_SOURCE=select enables the
/// interactive flow; anything else reads the environment.
pub fn provider_from_env() -> Arc<dyn CredentialProvider> {
  match std::env::var("CREDENTIAL_SOURCE").as_deref() {
    Ok("select") => Arc::new(SelectedCredentials::default()),
    _ => Arc::new(EnvCredentials::from_env()),
  }
}
