//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  services::{ServeDir, ServeFile},
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod error;
pub mod http;

/// Build the application router with:
/// - JSON API under `/api/v1/...`
/// - exports of the current paper under `/api/v1/paper/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
  let static_service = ServeDir::new("./static")
    .append_index_html_on_directories(true)
    .not_found_service(ServeFile::new("./static/index.html"));

  Router::new()
    .route("/api/v1/health", get(http::http_health))
    .route("/api/v1/session", get(http::http_get_session))
    .route("/api/v1/key", post(http::http_post_key))
    .route(
      "/api/v1/paper",
      get(http::http_get_paper).post(http::http_post_paper).delete(http::http_delete_paper),
    )
    .route("/api/v1/paper/text", get(http::http_get_paper_text))
    .route("/api/v1/paper/word", get(http::http_get_paper_word))
    .route("/api/v1/paper/omr", get(http::http_get_paper_omr))
    .route("/api/v1/paper/print", get(http::http_get_paper_print))
    .route("/api/v1/paper/answer-key", get(http::http_get_answer_key))
    .with_state(state)
    .layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    .fallback_service(static_service)
}
