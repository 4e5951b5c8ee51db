//! Paper request service: credential → prompt + schema → model → parsed, stamped paper.
//!
//! Every call is an independent request. No retry, no caching: the model may return a
//! different paper for identical inputs.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::blueprint::GeneratorConfig;
use crate::config::GenerationCfg;
use crate::credentials::{ApiKey, CredentialError, CredentialProvider};
use crate::domain::QuestionPaper;
use crate::gemini::{GenerateRequest, ModelBackend, ServiceError, JSON_MIME};
use crate::prompt::{build_instructions, paper_schema};

#[derive(Debug, Error)]
pub enum PaperError {
  #[error("API Key is missing")]
  MissingCredential,
  #[error("Session expired or invalid key. Please select your API key again.")]
  CredentialExpired,
  #[error("Failed to generate the question paper. Please check your API key and try again.")]
  GenerationFailed(#[source] ServiceError),
}

impl PaperError {
  /// Stable machine-readable kind for the HTTP layer and the UI.
  pub fn kind(&self) -> &'static str {
    match self {
      PaperError::MissingCredential => "missing_credential",
      PaperError::CredentialExpired => "credential_expired",
      PaperError::GenerationFailed(_) => "generation_failed",
    }
  }
}

impl From<CredentialError> for PaperError {
  fn from(_: CredentialError) -> Self { PaperError::MissingCredential }
}

/// Decide how a service failure surfaces. Credential-not-found only means "your key
/// expired" when the user can pick another key; the key used for the call is then dropped.
pub fn classify_failure(err: ServiceError, creds: &dyn CredentialProvider, used: &ApiKey) -> PaperError {
  if err.is_credential_not_found() && creds.supports_selection() {
    creds.invalidate(used);
    PaperError::CredentialExpired
  } else {
    PaperError::GenerationFailed(err)
  }
}

/// Parse the model's raw text and apply the client-side corrections.
pub fn parse_paper(raw: &str, year: &str, set: &str) -> Result<QuestionPaper, ServiceError> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(ServiceError::EmptyResponse);
  }
  let mut paper: QuestionPaper =
    serde_json::from_str(raw).map_err(|e| ServiceError::Malformed(e.to_string()))?;
  paper.stamp(year, set);
  paper.fill_missing_ids();
  Ok(paper)
}

pub struct PaperService {
  backend: Arc<dyn ModelBackend>,
  creds: Arc<dyn CredentialProvider>,
  model: String,
  temperature: f32,
  distribution: GeneratorConfig,
}

impl PaperService {
  pub fn new(
    backend: Arc<dyn ModelBackend>,
    creds: Arc<dyn CredentialProvider>,
    generation: &GenerationCfg,
    distribution: GeneratorConfig,
  ) -> Self {
    Self {
      backend,
      creds,
      model: generation.model.clone(),
      temperature: generation.temperature,
      distribution,
    }
  }

  pub fn credentials(&self) -> &Arc<dyn CredentialProvider> { &self.creds }

  pub fn request_for(&self, year: &str) -> GenerateRequest {
    GenerateRequest {
      model: self.model.clone(),
      instructions: build_instructions(&self.distribution, year),
      response_mime_type: JSON_MIME.into(),
      response_schema: paper_schema(),
      temperature: self.temperature,
    }
  }

  #[instrument(level = "info", skip(self), fields(model = %self.model))]
  pub async fn generate(&self, year: &str, set: &str) -> Result<QuestionPaper, PaperError> {
    let key = self.creds.api_key().map_err(|e| {
      warn!(target: "paper", %year, %set, "Generation refused: no API key");
      PaperError::from(e)
    })?;

    let req = self.request_for(year);
    let result = match self.backend.generate(&key, &req).await {
      Ok(raw) => parse_paper(&raw, year, set),
      Err(e) => Err(e),
    };

    match result {
      Ok(paper) => {
        info!(
          target: "paper",
          %year, %set,
          mcqs = paper.mcq_count(),
          subjective = paper.subjective_count(),
          "Question paper generated"
        );
        Ok(paper)
      }
      Err(e) => {
        error!(target: "paper", %year, %set, error = %e, "Question paper generation failed");
        Err(classify_failure(e, self.creds.as_ref(), &key))
      }
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;

  use futures::future::BoxFuture;

  use super::*;
  use crate::credentials::{ApiKey, EnvCredentials, SelectedCredentials};
  use crate::fixtures::model_response_json;

  /// Backend that replays a canned answer and counts calls.
  pub struct FakeBackend {
    pub reply: Mutex<Option<Result<String, ServiceError>>>,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<GenerateRequest>>,
  }

  impl FakeBackend {
    pub fn ok(body: String) -> Self {
      Self { reply: Mutex::new(Some(Ok(body))), calls: AtomicUsize::new(0), last_request: Mutex::new(None) }
    }

    pub fn failing(err: ServiceError) -> Self {
      Self { reply: Mutex::new(Some(Err(err))), calls: AtomicUsize::new(0), last_request: Mutex::new(None) }
    }
  }

  impl ModelBackend for FakeBackend {
    fn generate<'a>(
      &'a self,
      _key: &'a ApiKey,
      req: &'a GenerateRequest,
    ) -> BoxFuture<'a, Result<String, ServiceError>> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      *self.last_request.lock().expect("lock") = Some(req.clone());
      let reply = self.reply.lock().expect("lock").take()
        .unwrap_or(Err(ServiceError::EmptyResponse));
      Box::pin(async move { reply })
    }
  }

  fn not_found() -> ServiceError {
    ServiceError::Api {
      code: 404,
      status: Some("NOT_FOUND".into()),
      message: "Requested entity was not found.".into(),
      reason: None,
    }
  }

  fn service(backend: Arc<FakeBackend>, creds: Arc<dyn CredentialProvider>) -> PaperService {
    PaperService::new(backend, creds, &GenerationCfg::default(), GeneratorConfig::default())
  }

  fn env_key() -> Arc<dyn CredentialProvider> {
    Arc::new(EnvCredentials::new(ApiKey::new("test-key")))
  }

  #[tokio::test]
  async fn stamps_year_and_set_over_model_values() {
    let backend = Arc::new(FakeBackend::ok(model_response_json()));
    let paper = service(backend.clone(), env_key()).generate("2027", "B").await.expect("paper");
    assert_eq!(paper.year, "2027");
    assert_eq!(paper.set, "B");
    assert_eq!(paper.mcq_count(), 50);

    let req = backend.last_request.lock().expect("lock").clone().expect("request");
    assert_eq!(req.model, "gemini-2.5-flash");
    assert_eq!(req.response_mime_type, "application/json");
    assert_eq!(req.temperature, 0.5);
    assert!(req.instructions.contains("**2027**"));
  }

  #[tokio::test]
  async fn missing_credential_fails_before_any_call() {
    let backend = Arc::new(FakeBackend::ok(model_response_json()));
    let creds: Arc<dyn CredentialProvider> = Arc::new(EnvCredentials::new(None));
    let err = service(backend.clone(), creds).generate("2026", "A").await.unwrap_err();
    assert!(matches!(err, PaperError::MissingCredential));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn empty_or_invalid_json_is_a_generic_failure() {
    for body in ["", "   ", "{not json", "[1, 2]"] {
      let backend = Arc::new(FakeBackend::ok(body.to_string()));
      let err = service(backend, env_key()).generate("2026", "A").await.unwrap_err();
      assert_eq!(err.kind(), "generation_failed", "body {body:?}");
    }
  }

  #[tokio::test]
  async fn not_found_with_selector_means_expired() {
    let creds = Arc::new(SelectedCredentials::new(ApiKey::new("picked")));
    let backend = Arc::new(FakeBackend::failing(not_found()));
    let err = service(backend, creds.clone()).generate("2026", "A").await.unwrap_err();
    assert!(matches!(err, PaperError::CredentialExpired));
    assert!(err.to_string().contains("select your API key again"));
    assert!(!creds.has_key());
  }

  #[tokio::test]
  async fn not_found_without_selector_is_generic() {
    let creds = env_key();
    let backend = Arc::new(FakeBackend::failing(not_found()));
    let err = service(backend, creds.clone()).generate("2026", "A").await.unwrap_err();
    assert!(matches!(err, PaperError::GenerationFailed(_)));
    assert!(creds.has_key());
  }

  #[tokio::test]
  async fn unknown_model_keeps_the_selected_key() {
    let creds = Arc::new(SelectedCredentials::new(ApiKey::new("good-key")));
    let backend = Arc::new(FakeBackend::failing(ServiceError::Api {
      code: 404,
      status: Some("NOT_FOUND".into()),
      message: "models/gemini-2.5-flsh is not found for API version v1beta".into(),
      reason: None,
    }));
    let err = service(backend, creds.clone()).generate("2026", "A").await.unwrap_err();
    assert_eq!(err.kind(), "generation_failed");
    assert!(creds.has_key());
  }

  #[tokio::test]
  async fn other_service_errors_keep_the_selected_key() {
    let creds = Arc::new(SelectedCredentials::new(ApiKey::new("picked")));
    let backend = Arc::new(FakeBackend::failing(ServiceError::Api {
      code: 503,
      status: Some("UNAVAILABLE".into()),
      message: "overloaded".into(),
      reason: None,
    }));
    let err = service(backend, creds.clone()).generate("2026", "A").await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to generate the question paper"));
    assert!(creds.has_key());
  }

  #[test]
  fn parse_fills_missing_ids() {
    let paper = parse_paper(
      r#"{"sectionA":{"physicalScience":[{"questionText":"q","subject":"Physical Science"}]}}"#,
      "2029",
      "C",
    ).expect("parse");
    assert!(!paper.section_a.physical_science[0].id.is_empty());
    assert_eq!(paper.year, "2029");
    assert!(paper.section_b.life_science.is_empty());
  }
}
