//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::blueprint::{self, MCQ_PER_SUBJECT, SUBJECTIVE_TIERS};
use crate::credentials::CredentialProvider;
use crate::domain::QuestionPaper;
use crate::state::{GeneratedPaper, SlotStatus};

#[derive(Debug, Deserialize)]
pub struct GenerateIn {
  pub year: String,
  pub set: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyIn {
  #[serde(rename = "apiKey")]
  pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct PaperOut {
  pub paper: QuestionPaper,
  /// Rendered document fragment, ready to insert into the page.
  pub html: String,
  pub warnings: Vec<String>,
}

impl PaperOut {
  pub fn new(generated: GeneratedPaper, html: String) -> Self {
    let warnings = generated.issues.iter().map(ToString::to_string).collect();
    Self { paper: generated.paper, html, warnings }
  }
}

#[derive(Debug, Serialize)]
pub struct CredentialOut {
  pub present: bool,
  pub selectable: bool,
  pub source: &'static str,
}

impl CredentialOut {
  pub fn of(creds: &dyn CredentialProvider) -> Self {
    Self { present: creds.has_key(), selectable: creds.supports_selection(), source: creds.source().as_str() }
  }
}

#[derive(Debug, Serialize)]
pub struct TierOut {
  pub marks: u8,
  pub count: usize,
}

/// Paper pattern summary shown next to the form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternOut {
  pub full_marks: u32,
  pub time: &'static str,
  pub mcq_per_subject: usize,
  pub subjective_per_subject: usize,
  pub subjective_tiers: Vec<TierOut>,
}

impl PatternOut {
  pub fn current() -> Self {
    Self {
      full_marks: blueprint::FULL_MARKS,
      time: blueprint::EXAM_TIME,
      mcq_per_subject: MCQ_PER_SUBJECT,
      subjective_per_subject: blueprint::subjective_per_subject(),
      subjective_tiers: SUBJECTIVE_TIERS.iter().map(|t| TierOut { marks: t.marks, count: t.count }).collect(),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
  pub credential: CredentialOut,
  pub state: SlotStatus,
  pub years: Vec<String>,
  pub sets: Vec<String>,
  pub default_year: String,
  pub default_set: String,
  pub brand: String,
  pub subtitle: String,
  pub pattern: PatternOut,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
  pub error: &'static str,
  pub message: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Subject;
  use crate::fixtures::full_paper;
  use crate::validate::PaperIssue;

  #[test]
  fn warnings_are_readable_messages() {
    let generated = GeneratedPaper {
      paper: full_paper(),
      issues: vec![PaperIssue::McqCount { subject: Subject::LifeScience, expected: 25, found: 24 }],
    };
    let v = serde_json::to_value(PaperOut::new(generated, String::new())).expect("serialize");
    assert_eq!(v["warnings"], serde_json::json!(["Life Science: expected 25 MCQs, got 24"]));
    assert!(v["paper"]["sectionA"].is_object());
  }
}
