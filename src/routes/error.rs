//! HTTP error mapping. Handlers return `Result<_, ApiError>`; the body is always
//! `{error, message}` with a stable machine-readable `error` kind.

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;

use crate::credentials::CredentialError;
use crate::generator::PaperError;
use crate::protocol::ErrorOut;
use crate::state::Busy;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),
  #[error("No question paper has been generated yet")]
  NoPaper,
  #[error(transparent)]
  Busy(#[from] Busy),
  #[error(transparent)]
  Paper(#[from] PaperError),
  #[error(transparent)]
  Credential(#[from] CredentialError),
  #[error("Internal server error")]
  Internal,
}

impl ApiError {
  fn status_and_kind(&self) -> (StatusCode, &'static str) {
    match self {
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
      ApiError::NoPaper => (StatusCode::NOT_FOUND, "no_paper"),
      ApiError::Busy(_) => (StatusCode::CONFLICT, "busy"),
      ApiError::Paper(e) => match e {
        PaperError::MissingCredential | PaperError::CredentialExpired => (StatusCode::UNAUTHORIZED, e.kind()),
        PaperError::GenerationFailed(_) => (StatusCode::BAD_GATEWAY, e.kind()),
      },
      ApiError::Credential(CredentialError::Missing) => (StatusCode::UNAUTHORIZED, "missing_credential"),
      ApiError::Credential(CredentialError::EmptyKey) => (StatusCode::BAD_REQUEST, "bad_request"),
      ApiError::Credential(CredentialError::SelectionUnsupported) => (StatusCode::CONFLICT, "selection_unsupported"),
      ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error) = self.status_and_kind();
    (status, Json(ErrorOut { error, message: self.to_string() })).into_response()
  }
}
