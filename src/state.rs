//! Application state: configuration, the paper service, and the current-paper slot.
//!
//! The slot has exactly one owner (the workspace) and three states:
//!   Empty ──begin──▶ Pending ──complete──▶ Populated
//!   Populated ──begin──▶ Pending (the shown paper is kept until the new one lands)
//!   Pending ──fail──▶ whatever was shown before
//!   Pending / Populated ──clear──▶ Empty
//! Only one generation can be pending. Completions carry the ticket handed out by
//! `begin`; a completion whose ticket no longer matches (cleared or superseded) is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::credentials::{provider_from_env, CredentialProvider};
use crate::domain::QuestionPaper;
use crate::gemini::{Gemini, ServiceError};
use crate::generator::PaperService;
use crate::validate::PaperIssue;

/// A stored paper plus the structural warnings found when it arrived.
#[derive(Clone, Debug)]
pub struct GeneratedPaper {
  pub paper: QuestionPaper,
  pub issues: Vec<PaperIssue>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("a question paper is already being generated")]
pub struct Busy;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
  Empty,
  Pending,
  Populated,
}

enum Slot {
  Empty,
  Pending { ticket: Ticket, previous: Option<GeneratedPaper> },
  Populated(GeneratedPaper),
}

pub struct Workspace {
  slot: RwLock<Slot>,
  next_ticket: AtomicU64,
}

impl Default for Workspace {
  fn default() -> Self {
    Self { slot: RwLock::new(Slot::Empty), next_ticket: AtomicU64::new(1) }
  }
}

impl Workspace {
  /// Enter Pending. Fails while another generation is in flight.
  pub async fn begin(&self) -> Result<Ticket, Busy> {
    let mut slot = self.slot.write().await;
    let previous = match std::mem::replace(&mut *slot, Slot::Empty) {
      Slot::Empty => None,
      Slot::Populated(p) => Some(p),
      pending @ Slot::Pending { .. } => {
        *slot = pending;
        return Err(Busy);
      }
    };
    let ticket = Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed));
    *slot = Slot::Pending { ticket, previous };
    debug!(target: "paper", ticket = ticket.0, "Workspace pending");
    Ok(ticket)
  }

  /// Store a finished paper. Returns false when the ticket is stale.
  pub async fn complete(&self, ticket: Ticket, paper: GeneratedPaper) -> bool {
    let mut slot = self.slot.write().await;
    let current = matches!(&*slot, Slot::Pending { ticket: t, .. } if *t == ticket);
    if current {
      *slot = Slot::Populated(paper);
    } else {
      debug!(target: "paper", ticket = ticket.0, "Dropping stale generation result");
    }
    current
  }

  /// Leave Pending after a failure, restoring what was shown before.
  pub async fn fail(&self, ticket: Ticket) -> bool {
    let mut slot = self.slot.write().await;
    match std::mem::replace(&mut *slot, Slot::Empty) {
      Slot::Pending { ticket: t, previous } if t == ticket => {
        *slot = previous.map(Slot::Populated).unwrap_or(Slot::Empty);
        true
      }
      other => {
        *slot = other;
        false
      }
    }
  }

  pub async fn clear(&self) {
    *self.slot.write().await = Slot::Empty;
  }

  /// The paper to display. While pending, that is the previously shown one, if any.
  pub async fn current(&self) -> Option<GeneratedPaper> {
    match &*self.slot.read().await {
      Slot::Empty => None,
      Slot::Pending { previous, .. } => previous.clone(),
      Slot::Populated(p) => Some(p.clone()),
    }
  }

  pub async fn status(&self) -> SlotStatus {
    match &*self.slot.read().await {
      Slot::Empty => SlotStatus::Empty,
      Slot::Pending { .. } => SlotStatus::Pending,
      Slot::Populated(_) => SlotStatus::Populated,
    }
  }
}

pub struct AppState {
  pub config: AppConfig,
  pub service: Arc<PaperService>,
  pub workspace: Arc<Workspace>,
}

impl AppState {
  /// Build state around a loaded config: credential provider and Gemini client from env.
  #[instrument(level = "info", skip_all)]
  pub fn from_config(config: AppConfig) -> Result<Self, ServiceError> {
    let creds = provider_from_env();
    let gemini = Gemini::new(config.generation.base_url.clone())?;
    info!(
      target: "mocktest_backend",
      base_url = %gemini.base_url,
      model = %config.generation.model,
      credential_source = creds.source().as_str(),
      has_key = creds.has_key(),
      "Gemini client ready"
    );
    Ok(Self::new(config, Arc::new(gemini), creds))
  }

  pub fn new(
    config: AppConfig,
    backend: Arc<dyn crate::gemini::ModelBackend>,
    creds: Arc<dyn CredentialProvider>,
  ) -> Self {
    let service = PaperService::new(
      backend,
      creds,
      &config.generation,
      config.distribution.generator_config(),
    );
    Self { config, service: Arc::new(service), workspace: Arc::new(Workspace::default()) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::full_paper;

  fn generated(year: &str) -> GeneratedPaper {
    let mut paper = full_paper();
    paper.year = year.into();
    GeneratedPaper { paper, issues: vec![] }
  }

  #[tokio::test]
  async fn empty_pending_populated_clear() {
    let ws = Workspace::default();
    assert_eq!(ws.status().await, SlotStatus::Empty);
    let t = ws.begin().await.expect("begin");
    assert_eq!(ws.status().await, SlotStatus::Pending);
    assert!(ws.complete(t, generated("2026")).await);
    assert_eq!(ws.status().await, SlotStatus::Populated);
    assert_eq!(ws.current().await.expect("paper").paper.year, "2026");
    ws.clear().await;
    assert_eq!(ws.status().await, SlotStatus::Empty);
    assert!(ws.current().await.is_none());
  }

  #[tokio::test]
  async fn only_one_generation_in_flight() {
    let ws = Workspace::default();
    let _t = ws.begin().await.expect("begin");
    assert_eq!(ws.begin().await, Err(Busy));
    assert_eq!(ws.status().await, SlotStatus::Pending);
  }

  #[tokio::test]
  async fn failure_restores_previous_paper() {
    let ws = Workspace::default();
    let t1 = ws.begin().await.expect("begin");
    ws.complete(t1, generated("2026")).await;

    let t2 = ws.begin().await.expect("begin again");
    assert_eq!(ws.current().await.expect("still shown").paper.year, "2026");
    assert!(ws.fail(t2).await);
    assert_eq!(ws.status().await, SlotStatus::Populated);

    let t3 = ws.begin().await.expect("third");
    assert!(ws.complete(t3, generated("2027")).await);
    assert_eq!(ws.current().await.expect("replaced").paper.year, "2027");
  }

  #[tokio::test]
  async fn result_after_clear_is_dropped() {
    let ws = Workspace::default();
    let t1 = ws.begin().await.expect("begin");
    ws.clear().await;
    let t2 = ws.begin().await.expect("begin after clear");
    assert!(!ws.complete(t1, generated("2026")).await);
    assert!(!ws.fail(t1).await);
    assert_eq!(ws.status().await, SlotStatus::Pending);
    assert!(ws.complete(t2, generated("2028")).await);
    assert_eq!(ws.current().await.expect("paper").paper.year, "2028");
  }
}
