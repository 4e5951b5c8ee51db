//! Minimal Gemini `generateContent` client.
//!
//! One call shape only: a single user turn, JSON response MIME type, a response schema
//! and a temperature. Calls log model name, latency and sizes, never prompt/response
//! contents or the key.

use std::time::Instant;

use futures::future::BoxFuture;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::credentials::ApiKey;
use crate::util::trunc_for_log;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const JSON_MIME: &str = "application/json";

/// Everything one generation call carries.
#[derive(Clone, Debug)]
pub struct GenerateRequest {
  pub model: String,
  pub instructions: String,
  pub response_mime_type: String,
  pub response_schema: Value,
  pub temperature: f32,
}

#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("could not build HTTP client: {0}")]
  Client(String),
  #[error("request to generation service failed: {0}")]
  Transport(String),
  #[error("generation service HTTP {code}: {message}")]
  Api {
    code: u16,
    /// Google RPC status, e.g. "NOT_FOUND" or "PERMISSION_DENIED".
    status: Option<String>,
    message: String,
    /// `ErrorInfo.reason` from the error details, e.g. "API_KEY_INVALID".
    reason: Option<String>,
  },
  #[error("No response from AI")]
  EmptyResponse,
  #[error("response is not a valid question paper: {0}")]
  Malformed(String),
}

impl ServiceError {
  /// The service could not find the entity behind the credential; in the
  /// interactive flow this means the selected key is gone or expired.
  ///
  /// Requires the RPC status NOT_FOUND. A bare HTTP 404 (wrong base URL) does not
  /// count, and neither does a missing `models/...` resource (wrong model name).
  pub fn is_credential_not_found(&self) -> bool {
    let ServiceError::Api { status, message, reason, .. } = self else { return false };
    if status.as_deref() != Some("NOT_FOUND") {
      return false;
    }
    match reason.as_deref() {
      Some(r) => r.contains("API_KEY") || r.contains("CREDENTIAL"),
      None => !message.contains("models/"),
    }
  }
}

/// The seam between the paper service and the hosted model.
pub trait ModelBackend: Send + Sync {
  /// Returns the raw text of the model's answer.
  fn generate<'a>(
    &'a self,
    key: &'a ApiKey,
    req: &'a GenerateRequest,
  ) -> BoxFuture<'a, Result<String, ServiceError>>;
}

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub base_url: String,
}

impl Gemini {
  pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
    // No request timeout: a full paper can take a long time and the caller waits it out.
    let client = reqwest::Client::builder()
      .build()
      .map_err(|e| ServiceError::Client(e.to_string()))?;
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Ok(Self { client, base_url })
  }

  #[instrument(level = "info", skip(self, key, req), fields(model = %req.model, prompt_len = req.instructions.len()))]
  async fn generate_content(&self, key: &ApiKey, req: &GenerateRequest) -> Result<String, ServiceError> {
    let url = format!("{}/models/{}:generateContent", self.base_url, req.model);
    let body = GenerateContentRequest {
      contents: vec![Content {
        role: "user".into(),
        parts: vec![PartReq { text: req.instructions.clone() }],
      }],
      generation_config: GenerationConfig {
        response_mime_type: req.response_mime_type.clone(),
        response_schema: req.response_schema.clone(),
        temperature: req.temperature,
      },
    };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "mocktest-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", key.expose())
      .json(&body).send().await
      .map_err(|e| ServiceError::Transport(e.to_string()))?;

    if !res.status().is_success() {
      let code = res.status().as_u16();
      let raw = res.text().await.unwrap_or_default();
      let (status, message, reason) = match extract_google_error(&raw) {
        Some(e) => (e.status, e.message, e.reason),
        None => (None, trunc_for_log(&raw, 300), None),
      };
      error!(target: "gemini", elapsed = ?start.elapsed(), code, status = ?status, reason = ?reason, "Gemini call failed");
      return Err(ServiceError::Api { code, status, message, reason });
    }

    let body: GenerateContentResponse = res.json().await
      .map_err(|e| ServiceError::Transport(e.to_string()))?;
    if let Some(usage) = &body.usage_metadata {
      info!(
        target: "gemini",
        prompt_tokens = ?usage.prompt_token_count,
        candidates_tokens = ?usage.candidates_token_count,
        total_tokens = ?usage.total_token_count,
        "Gemini usage"
      );
    }

    let text = body.text();
    info!(target: "gemini", elapsed = ?start.elapsed(), response_len = text.len(), "Model response received");
    Ok(text)
  }
}

impl ModelBackend for Gemini {
  fn generate<'a>(
    &'a self,
    key: &'a ApiKey,
    req: &'a GenerateRequest,
  ) -> BoxFuture<'a, Result<String, ServiceError>> {
    Box::pin(self.generate_content(key, req))
  }
}

// --- generateContent DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
  contents: Vec<Content>,
  generation_config: GenerationConfig,
}
#[derive(Serialize)]
struct Content { role: String, parts: Vec<PartReq> }
#[derive(Serialize)]
struct PartReq { text: String }
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  response_mime_type: String,
  response_schema: Value,
  temperature: f32,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
  #[serde(default)] candidates: Vec<Candidate>,
  #[serde(default)] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate { #[serde(default)] content: Option<CandidateContent> }
#[derive(Deserialize)]
struct CandidateContent { #[serde(default)] parts: Vec<PartResp> }
#[derive(Deserialize)]
struct PartResp { #[serde(default)] text: Option<String> }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
  #[serde(default)] total_token_count: Option<u32>,
}

impl GenerateContentResponse {
  /// Text of the first candidate, parts concatenated.
  fn text(&self) -> String {
    self.candidates.first()
      .and_then(|c| c.content.as_ref())
      .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect::<String>())
      .unwrap_or_default()
  }
}

struct GoogleError { status: Option<String>, message: String, reason: Option<String> }

/// Pull `{ "error": { "status", "message", "details": [{ "reason" }] } }` out of an error body.
fn extract_google_error(body: &str) -> Option<GoogleError> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj {
    #[serde(default)] message: String,
    #[serde(default)] status: Option<String>,
    #[serde(default)] details: Vec<EDetail>,
  }
  #[derive(Deserialize)]
  struct EDetail { #[serde(default)] reason: Option<String> }
  serde_json::from_str::<EWrap>(body).ok().map(|w| GoogleError {
    reason: w.error.details.into_iter().find_map(|d| d.reason),
    status: w.error.status,
    message: w.error.message,
  })
}
