//! Domain models: subjects, MCQ/subjective questions, and the question paper aggregate.
//!
//! Wire names are camelCase because the same shapes travel to the model (as the
//! response schema), back from it, and out to the browser.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which half of General Science a question belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Subject {
  #[serde(rename = "Physical Science")]
  PhysicalScience,
  #[serde(rename = "Life Science")]
  LifeScience,
}

impl Subject {
  pub const ALL: [Subject; 2] = [Subject::PhysicalScience, Subject::LifeScience];

  /// Label as it appears on the wire and in the rendered paper.
  pub fn label(self) -> &'static str {
    match self {
      Subject::PhysicalScience => "Physical Science",
      Subject::LifeScience => "Life Science",
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct McqOption {
  pub label: String, // A, B, C, D
  pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McqQuestion {
  #[serde(default)] pub id: String,
  #[serde(default)] pub question_number: u32,
  pub question_text: String,
  #[serde(default)] pub options: Vec<McqOption>,
  /// Label of the right option; used for the answer key only.
  #[serde(default)] pub correct_option: String,
  pub subject: Subject,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectiveQuestion {
  #[serde(default)] pub id: String,
  #[serde(default)] pub question_number: u32,
  pub question_text: String,
  pub marks: u8,
  #[serde(default)] pub has_internal_choice: bool,
  /// The "OR" question. Meaningful only when `has_internal_choice` is set.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub alternative_question_text: Option<String>,
  pub subject: Subject,
}

impl SubjectiveQuestion {
  /// Alternative text to show under an "OR" separator, if any.
  pub fn visible_alternative(&self) -> Option<&str> {
    if !self.has_internal_choice { return None; }
    self.alternative_question_text
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
  }
}

/// A pair of per-subject question lists.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BySubject<T> {
  #[serde(default = "Vec::new")] pub physical_science: Vec<T>,
  #[serde(default = "Vec::new")] pub life_science: Vec<T>,
}

impl<T> Default for BySubject<T> {
  fn default() -> Self {
    Self { physical_science: Vec::new(), life_science: Vec::new() }
  }
}

impl<T> BySubject<T> {
  pub fn get(&self, subject: Subject) -> &[T] {
    match subject {
      Subject::PhysicalScience => &self.physical_science,
      Subject::LifeScience => &self.life_science,
    }
  }

  fn get_mut(&mut self, subject: Subject) -> &mut Vec<T> {
    match subject {
      Subject::PhysicalScience => &mut self.physical_science,
      Subject::LifeScience => &mut self.life_science,
    }
  }
}

/// Aggregate root. One instance per generation request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPaper {
  #[serde(default)] pub title: String,
  #[serde(default)] pub year: String,
  #[serde(default)] pub set: String,
  #[serde(default)] pub full_marks: u32,
  #[serde(default)] pub time: String,
  #[serde(default)] pub section_a: BySubject<McqQuestion>,
  #[serde(default)] pub section_b: BySubject<SubjectiveQuestion>,
}

impl QuestionPaper {
  /// Overwrite the client-controlled metadata. The model's values for these
  /// two fields are never trusted.
  pub fn stamp(&mut self, year: &str, set: &str) {
    self.year = year.to_string();
    self.set = set.to_string();
  }

  /// Give every question without an id a fresh one. Returns how many were filled.
  pub fn fill_missing_ids(&mut self) -> usize {
    let mut filled = 0;
    for subject in Subject::ALL {
      for q in self.section_a.get_mut(subject) {
        if q.id.trim().is_empty() { q.id = Uuid::new_v4().to_string(); filled += 1; }
      }
      for q in self.section_b.get_mut(subject) {
        if q.id.trim().is_empty() { q.id = Uuid::new_v4().to_string(); filled += 1; }
      }
    }
    filled
  }

  pub fn mcq_count(&self) -> usize {
    self.section_a.physical_science.len() + self.section_a.life_science.len()
  }

  pub fn subjective_count(&self) -> usize {
    self.section_b.physical_science.len() + self.section_b.life_science.len()
  }
}
