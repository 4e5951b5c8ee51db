//! HTTP endpoint handlers. These are thin wrappers that forward to the paper
//! service, the workspace and the renderers.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::State,
  http::{header, StatusCode},
  response::{Html, IntoResponse},
  Json,
};
use tracing::{error, info, instrument, warn};

use crate::protocol::*;
use crate::render::{answer_key, html, omr, text, word};
use crate::routes::error::ApiError;
use crate::state::{AppState, GeneratedPaper};
use crate::validate::validate;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let paper_cfg = &state.config.paper;
  Json(SessionOut {
    credential: CredentialOut::of(state.service.credentials().as_ref()),
    state: state.workspace.status().await,
    years: paper_cfg.years.clone(),
    sets: paper_cfg.sets.clone(),
    default_year: paper_cfg.default_year.clone(),
    default_set: paper_cfg.default_set.clone(),
    brand: paper_cfg.brand.clone(),
    subtitle: paper_cfg.subtitle.clone(),
    pattern: PatternOut::current(),
  })
}

#[instrument(level = "info", skip(state, body), fields(key_len = body.api_key.len()))]
pub async fn http_post_key(
  State(state): State<Arc<AppState>>,
  Json(body): Json<KeyIn>,
) -> Result<Json<CredentialOut>, ApiError> {
  let creds = state.service.credentials();
  creds.select(&body.api_key)?;
  Ok(Json(CredentialOut::of(creds.as_ref())))
}

/// Generate a paper for (year, set) and make it the current one.
///
/// The model call runs on its own task: once begun, a generation always lands in
/// the workspace (or restores it) even if the client goes away.
#[instrument(level = "info", skip(state, body), fields(year = %body.year, set = %body.set))]
pub async fn http_post_paper(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> Result<Json<PaperOut>, ApiError> {
  let year = body.year.trim().to_string();
  let set = body.set.trim().to_string();
  if !state.config.paper.allows(&year, &set) {
    warn!(target: "paper", %year, %set, "Rejected year/set outside the configured choices");
    return Err(ApiError::BadRequest(format!("Unsupported year/set: {year}/{set}")));
  }

  let ticket = state.workspace.begin().await?;
  let service = state.service.clone();
  let workspace = state.workspace.clone();
  let task = tokio::spawn(async move {
    match service.generate(&year, &set).await {
      Ok(paper) => {
        let issues = validate(&paper);
        for issue in &issues {
          warn!(target: "paper", %year, %set, %issue, "Paper deviates from the blueprint");
        }
        let generated = GeneratedPaper { paper, issues };
        if !workspace.complete(ticket, generated.clone()).await {
          info!(target: "paper", %year, %set, "Generated paper arrived after the workspace was cleared");
        }
        Ok(generated)
      }
      Err(e) => {
        workspace.fail(ticket).await;
        Err(e)
      }
    }
  });

  let generated = match task.await {
    Ok(result) => result?,
    Err(join) => {
      error!(target: "paper", error = %join, "Generation task aborted");
      state.workspace.fail(ticket).await;
      return Err(ApiError::Internal);
    }
  };

  let html = html::paper_fragment(&generated.paper, &state.config.paper.brand);
  info!(target: "paper", warnings = generated.issues.len(), html_len = html.len(), "HTTP paper served");
  Ok(Json(PaperOut::new(generated, html)))
}

async fn stored(state: &AppState) -> Result<GeneratedPaper, ApiError> {
  state.workspace.current().await.ok_or(ApiError::NoPaper)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_paper(State(state): State<Arc<AppState>>) -> Result<Json<PaperOut>, ApiError> {
  let generated = stored(&state).await?;
  let html = html::paper_fragment(&generated.paper, &state.config.paper.brand);
  Ok(Json(PaperOut::new(generated, html)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_paper(State(state): State<Arc<AppState>>) -> StatusCode {
  state.workspace.clear().await;
  info!(target: "paper", "Workspace cleared");
  StatusCode::NO_CONTENT
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_paper_text(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
  let generated = stored(&state).await?;
  let body = text::paper_text(&generated.paper, &state.config.paper.brand);
  Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], body))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_paper_word(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
  let generated = stored(&state).await?;
  let paper_cfg = &state.config.paper;
  let fragment = html::paper_fragment(&generated.paper, &paper_cfg.brand);
  let filename = word::word_filename(&paper_cfg.file_prefix, &generated.paper);
  info!(target: "paper", %filename, "Word export");
  let headers = [
    (header::CONTENT_TYPE, format!("{};charset=utf-8", word::WORD_MIME)),
    (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
  ];
  Ok((headers, word::word_document(&fragment)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_paper_omr(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
  let generated = stored(&state).await?;
  Ok(Html(omr::omr_sheet_for(&generated.paper)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_paper_print(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
  let generated = stored(&state).await?;
  Ok(Html(html::printable_page(&generated.paper, &state.config.paper.brand)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_answer_key(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
  let generated = stored(&state).await?;
  Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], answer_key::answer_key(&generated.paper)))
}
