//! The fixed Pre-Board paper pattern.
//!
//! Syllabus rules, prompt counts, the response schema, the layout engine and the
//! validator all read their numbers from here.

use serde::{Deserialize, Serialize};

pub const EXAM_TITLE: &str = "Class-X (HSC) Pre-Board Examination";
pub const EXAM_TIME: &str = "2 Hours 30 Minutes";
pub const FULL_MARKS: u32 = 100;
pub const SECTION_MARKS: u32 = 50;

/// MCQs per subject in Section A (1 mark each).
pub const MCQ_PER_SUBJECT: usize = 25;
pub const MCQ_OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Share of MCQs that must be competency-based, in percent.
pub const COMPETENCY_PERCENT: u8 = 50;

/// One mark tier of a Section B subject block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
  pub marks: u8,
  pub count: usize,
}

/// Section B tiers per subject, in display order.
pub const SUBJECTIVE_TIERS: [Tier; 3] = [
  Tier { marks: 2, count: 4 },
  Tier { marks: 3, count: 3 },
  Tier { marks: 4, count: 2 },
];

pub fn subjective_per_subject() -> usize {
  SUBJECTIVE_TIERS.iter().map(|t| t.count).sum()
}

pub fn subjective_marks_per_subject() -> u32 {
  SUBJECTIVE_TIERS.iter().map(|t| t.marks as u32 * t.count as u32).sum()
}

pub fn is_tier_mark(marks: u8) -> bool {
  SUBJECTIVE_TIERS.iter().any(|t| t.marks == marks)
}

/// Display number of the first Life Science MCQ; matches the OMR sheet columns.
pub fn life_science_mcq_offset() -> usize {
  MCQ_PER_SUBJECT + 1
}

/// Difficulty and Bloom's-taxonomy targets handed to the model, in percent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
  #[serde(default)] pub difficulty_distribution: DifficultyDistribution,
  #[serde(default)] pub bloom_distribution: BloomDistribution,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      difficulty_distribution: DifficultyDistribution::default(),
      bloom_distribution: BloomDistribution::default(),
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DifficultyDistribution {
  pub easy: u8,
  pub moderate: u8,
  pub difficult: u8,
}

impl Default for DifficultyDistribution {
  fn default() -> Self { Self { easy: 25, moderate: 50, difficult: 25 } }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BloomDistribution {
  pub knowledge: u8,
  pub comprehension: u8,
  pub application: u8,
  pub evaluation: u8,
}

impl Default for BloomDistribution {
  fn default() -> Self { Self { knowledge: 30, comprehension: 40, application: 20, evaluation: 10 } }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sections_add_up_to_full_marks() {
    let section_a = 2 * MCQ_PER_SUBJECT as u32;
    let section_b = 2 * subjective_marks_per_subject();
    assert_eq!(section_a, SECTION_MARKS);
    assert_eq!(section_b, SECTION_MARKS);
    assert_eq!(section_a + section_b, FULL_MARKS);
    assert_eq!(subjective_per_subject(), 9);
  }

  #[test]
  fn default_distributions_are_whole() {
    let d = DifficultyDistribution::default();
    let b = BloomDistribution::default();
    assert_eq!(d.easy + d.moderate + d.difficult, 100);
    assert_eq!(b.knowledge + b.comprehension + b.application + b.evaluation, 100);
  }
}
