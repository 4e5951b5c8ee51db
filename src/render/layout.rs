//! Display numbering and grouping, shared by every renderer.
//!
//! Section A numbers are positional: Physical Science 1..=25, Life Science from 26 on,
//! whatever `questionNumber` the model stored. Section B is regrouped per subject by mark
//! tier; groups are numbered by position (1–3 Physical Science, 4–6 Life Science) even
//! when a group turns out empty.

use crate::blueprint::{life_science_mcq_offset, SUBJECTIVE_TIERS};
use crate::domain::{McqQuestion, QuestionPaper, Subject, SubjectiveQuestion};
use crate::util::sub_item_label;

#[derive(Debug)]
pub struct NumberedMcq<'a> {
  pub number: usize,
  pub question: &'a McqQuestion,
}

#[derive(Debug)]
pub struct SubItem<'a> {
  pub label: String,
  pub question: &'a SubjectiveQuestion,
}

#[derive(Debug)]
pub struct SubjectiveGroup<'a> {
  pub number: usize,
  pub subject: Subject,
  pub marks: u8,
  pub items: Vec<SubItem<'a>>,
}

#[derive(Debug)]
pub struct PaperLayout<'a> {
  pub mcqs: Vec<NumberedMcq<'a>>,
  pub groups: Vec<SubjectiveGroup<'a>>,
}

fn first_mcq_number(subject: Subject) -> usize {
  match subject {
    Subject::PhysicalScience => 1,
    Subject::LifeScience => life_science_mcq_offset(),
  }
}

pub fn mcq_numbers(paper: &QuestionPaper) -> Vec<NumberedMcq<'_>> {
  let mut out = Vec::with_capacity(paper.mcq_count());
  for subject in Subject::ALL {
    let first = first_mcq_number(subject);
    out.extend(
      paper.section_a.get(subject)
        .iter()
        .enumerate()
        .map(|(i, question)| NumberedMcq { number: first + i, question }),
    );
  }
  out
}

pub fn subjective_groups(paper: &QuestionPaper) -> Vec<SubjectiveGroup<'_>> {
  let mut groups = Vec::with_capacity(Subject::ALL.len() * SUBJECTIVE_TIERS.len());
  for (s, subject) in Subject::ALL.into_iter().enumerate() {
    let questions = paper.section_b.get(subject);
    for (t, tier) in SUBJECTIVE_TIERS.iter().enumerate() {
      let mut picked: Vec<&SubjectiveQuestion> =
        questions.iter().filter(|q| q.marks == tier.marks).collect();
      picked.sort_by_key(|q| q.marks);
      groups.push(SubjectiveGroup {
        number: s * SUBJECTIVE_TIERS.len() + t + 1,
        subject,
        marks: tier.marks,
        items: picked
          .into_iter()
          .enumerate()
          .map(|(i, question)| SubItem { label: sub_item_label(i), question })
          .collect(),
      });
    }
  }
  groups
}

pub fn layout(paper: &QuestionPaper) -> PaperLayout<'_> {
  PaperLayout { mcqs: mcq_numbers(paper), groups: subjective_groups(paper) }
}
