//! Structural checks of a generated paper against the blueprint.
//!
//! Findings are warnings. A paper with issues is still stored and rendered; the
//! issues are logged and shown next to it.

use std::collections::HashSet;
use std::fmt;

use crate::blueprint::{self, MCQ_OPTION_LABELS, MCQ_PER_SUBJECT, SUBJECTIVE_TIERS};
use crate::domain::{QuestionPaper, Subject};
use crate::util::odia_ratio;

const ODIA_MIN_RATIO: f32 = 0.5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaperIssue {
  McqCount { subject: Subject, expected: usize, found: usize },
  OptionCount { subject: Subject, index: usize, found: usize },
  OptionLabels { subject: Subject, index: usize },
  CorrectOptionUnknown { subject: Subject, index: usize, correct: String },
  TierCount { subject: Subject, marks: u8, expected: usize, found: usize },
  MarksOutOfTier { subject: Subject, index: usize, marks: u8 },
  MissingAlternative { subject: Subject, index: usize },
  SubjectMismatch { block: Subject, index: usize },
  /// Share of Odia letters in question text, in percent, when below half.
  NotOdia { percent: u8 },
}

impl fmt::Display for PaperIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PaperIssue::McqCount { subject, expected, found } =>
        write!(f, "{}: expected {} MCQs, got {}", subject.label(), expected, found),
      PaperIssue::OptionCount { subject, index, found } =>
        write!(f, "{} MCQ #{}: expected 4 options, got {}", subject.label(), index + 1, found),
      PaperIssue::OptionLabels { subject, index } =>
        write!(f, "{} MCQ #{}: option labels are not A, B, C, D", subject.label(), index + 1),
      PaperIssue::CorrectOptionUnknown { subject, index, correct } =>
        write!(f, "{} MCQ #{}: correct option '{}' matches no option", subject.label(), index + 1, correct),
      PaperIssue::TierCount { subject, marks, expected, found } =>
        write!(f, "{}: expected {} questions of {} marks, got {}", subject.label(), expected, marks, found),
      PaperIssue::MarksOutOfTier { subject, index, marks } =>
        write!(f, "{} subjective #{}: {} marks is not a valid tier", subject.label(), index + 1, marks),
      PaperIssue::MissingAlternative { subject, index } =>
        write!(f, "{} subjective #{}: internal choice without an alternative question", subject.label(), index + 1),
      PaperIssue::SubjectMismatch { block, index } =>
        write!(f, "{} item #{} is tagged with another subject", block.label(), index + 1),
      PaperIssue::NotOdia { percent } =>
        write!(f, "only {}% of the question text is in Odia script", percent),
    }
  }
}

pub fn validate(paper: &QuestionPaper) -> Vec<PaperIssue> {
  let mut issues = Vec::new();
  for subject in Subject::ALL {
    check_mcqs(paper, subject, &mut issues);
    check_subjective(paper, subject, &mut issues);
  }
  check_language(paper, &mut issues);
  issues
}

fn check_language(paper: &QuestionPaper, issues: &mut Vec<PaperIssue>) {
  let mut texts: Vec<&str> = Vec::new();
  for subject in Subject::ALL {
    for q in paper.section_a.get(subject) {
      texts.push(&q.question_text);
      texts.extend(q.options.iter().map(|o| o.text.as_str()));
    }
    for q in paper.section_b.get(subject) {
      texts.push(&q.question_text);
      texts.extend(q.alternative_question_text.as_deref());
    }
  }
  if let Some(ratio) = odia_ratio(texts) {
    if ratio < ODIA_MIN_RATIO {
      issues.push(PaperIssue::NotOdia { percent: (ratio * 100.0).round() as u8 });
    }
  }
}

fn check_mcqs(paper: &QuestionPaper, subject: Subject, issues: &mut Vec<PaperIssue>) {
  let mcqs = paper.section_a.get(subject);
  if mcqs.len() != MCQ_PER_SUBJECT {
    issues.push(PaperIssue::McqCount { subject, expected: MCQ_PER_SUBJECT, found: mcqs.len() });
  }

  for (index, q) in mcqs.iter().enumerate() {
    if q.subject != subject {
      issues.push(PaperIssue::SubjectMismatch { block: subject, index });
    }
    if q.options.len() != MCQ_OPTION_LABELS.len() {
      issues.push(PaperIssue::OptionCount { subject, index, found: q.options.len() });
    }
    let labels: HashSet<&str> = q.options.iter().map(|o| o.label.trim()).collect();
    let expected: HashSet<&str> = MCQ_OPTION_LABELS.iter().copied().collect();
    if q.options.len() == MCQ_OPTION_LABELS.len() && labels != expected {
      issues.push(PaperIssue::OptionLabels { subject, index });
    }
    if !labels.contains(q.correct_option.trim()) {
      issues.push(PaperIssue::CorrectOptionUnknown { subject, index, correct: q.correct_option.clone() });
    }
  }
}

fn check_subjective(paper: &QuestionPaper, subject: Subject, issues: &mut Vec<PaperIssue>) {
  let items = paper.section_b.get(subject);

  for tier in SUBJECTIVE_TIERS {
    let found = items.iter().filter(|q| q.marks == tier.marks).count();
    if found != tier.count {
      issues.push(PaperIssue::TierCount { subject, marks: tier.marks, expected: tier.count, found });
    }
  }

  for (index, q) in items.iter().enumerate() {
    if q.subject != subject {
      issues.push(PaperIssue::SubjectMismatch { block: subject, index });
    }
    if !blueprint::is_tier_mark(q.marks) {
      issues.push(PaperIssue::MarksOutOfTier { subject, index, marks: q.marks });
    }
    if q.has_internal_choice && q.visible_alternative().is_none() {
      issues.push(PaperIssue::MissingAlternative { subject, index });
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::full_paper;

  #[test]
  fn complete_paper_has_no_issues() {
    assert!(validate(&full_paper()).is_empty());
  }

  #[test]
  fn reports_counts_labels_and_choices() {
    let mut paper = full_paper();
    paper.section_a.life_science.pop();
    paper.section_a.physical_science[3].correct_option = "E".into();
    paper.section_a.physical_science[4].options[0].label = "D".into();
    paper.section_a.physical_science[5].options.pop();
    paper.section_b.life_science[0].marks = 5;
    paper.section_b.life_science[2].subject = Subject::PhysicalScience;
    paper.section_b.physical_science[8].alternative_question_text = None;

    let issues = validate(&paper);
    assert!(issues.contains(&PaperIssue::McqCount { subject: Subject::LifeScience, expected: 25, found: 24 }));
    assert!(issues.contains(&PaperIssue::CorrectOptionUnknown {
      subject: Subject::PhysicalScience, index: 3, correct: "E".into(),
    }));
    assert!(issues.contains(&PaperIssue::OptionLabels { subject: Subject::PhysicalScience, index: 4 }));
    assert!(issues.contains(&PaperIssue::OptionCount { subject: Subject::PhysicalScience, index: 5, found: 3 }));
    assert!(!issues.contains(&PaperIssue::OptionLabels { subject: Subject::PhysicalScience, index: 5 }));
    assert!(issues.contains(&PaperIssue::SubjectMismatch { block: Subject::LifeScience, index: 2 }));
    assert!(issues.contains(&PaperIssue::MarksOutOfTier { subject: Subject::LifeScience, index: 0, marks: 5 }));
    assert!(issues.contains(&PaperIssue::TierCount { subject: Subject::LifeScience, marks: 2, expected: 4, found: 3 }));
    assert!(issues.contains(&PaperIssue::MissingAlternative { subject: Subject::PhysicalScience, index: 8 }));
  }

  #[test]
  fn english_paper_is_flagged() {
    let mut paper = full_paper();
    for q in paper.section_a.physical_science.iter_mut().chain(paper.section_a.life_science.iter_mut()) {
      q.question_text = "Which of these is a chemical change?".into();
      for o in &mut q.options { o.text = "burning paper".into(); }
    }
    for q in paper.section_b.physical_science.iter_mut().chain(paper.section_b.life_science.iter_mut()) {
      q.question_text = "Explain rancidity.".into();
      q.alternative_question_text = Some("Define corrosion.".into());
    }
    let issues = validate(&paper);
    assert_eq!(issues, vec![PaperIssue::NotOdia { percent: 0 }]);
  }

  #[test]
  fn issue_messages_are_one_based() {
    let issue = PaperIssue::MissingAlternative { subject: Subject::LifeScience, index: 0 };
    assert_eq!(issue.to_string(), "Life Science subjective #1: internal choice without an alternative question");
  }
}
