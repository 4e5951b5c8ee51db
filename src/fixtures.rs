//! Test fixtures: a complete, blueprint-conformant paper.

use crate::blueprint::{EXAM_TIME, EXAM_TITLE, FULL_MARKS, MCQ_OPTION_LABELS, MCQ_PER_SUBJECT, SUBJECTIVE_TIERS};
use crate::domain::{BySubject, McqOption, McqQuestion, QuestionPaper, Subject, SubjectiveQuestion};

/// Odia subject name, used as question text prefix.
pub fn odia_name(subject: Subject) -> &'static str {
  match subject {
    Subject::PhysicalScience => "ଭୌତିକ ବିଜ୍ଞାନ",
    Subject::LifeScience => "ଜୀବ ବିଜ୍ଞାନ",
  }
}

fn short(subject: Subject) -> &'static str {
  match subject {
    Subject::PhysicalScience => "ps",
    Subject::LifeScience => "ls",
  }
}

pub fn mcqs(subject: Subject) -> Vec<McqQuestion> {
  (0..MCQ_PER_SUBJECT)
    .map(|i| McqQuestion {
      id: format!("{}-mcq-{}", short(subject), i + 1),
      // Deliberately not positional: display numbers must not depend on it.
      question_number: 100 + i as u32,
      question_text: format!("{} ପ୍ରଶ୍ନ {}", odia_name(subject), i + 1),
      options: MCQ_OPTION_LABELS
        .iter()
        .map(|l| McqOption { label: (*l).to_string(), text: format!("ବିକଳ୍ପ {l}") })
        .collect(),
      correct_option: MCQ_OPTION_LABELS[i % 4].to_string(),
      subject,
    })
    .collect()
}

pub fn subjective(subject: Subject) -> Vec<SubjectiveQuestion> {
  let mut out = Vec::new();
  for tier in SUBJECTIVE_TIERS {
    for k in 0..tier.count {
      let n = out.len() + 1;
      out.push(SubjectiveQuestion {
        id: format!("{}-sq-{}", short(subject), n),
        question_number: n as u32,
        question_text: format!("{} {} ନମ୍ବର ପ୍ରଶ୍ନ {}", odia_name(subject), tier.marks, k + 1),
        marks: tier.marks,
        has_internal_choice: true,
        alternative_question_text: Some(format!("{} {} ନମ୍ବର ବିକଳ୍ପ {}", odia_name(subject), tier.marks, k + 1)),
        subject,
      });
    }
  }
  out
}

pub fn full_paper() -> QuestionPaper {
  QuestionPaper {
    title: EXAM_TITLE.into(),
    year: "2026".into(),
    set: "A".into(),
    full_marks: FULL_MARKS,
    time: EXAM_TIME.into(),
    section_a: BySubject {
      physical_science: mcqs(Subject::PhysicalScience),
      life_science: mcqs(Subject::LifeScience),
    },
    section_b: BySubject {
      physical_science: subjective(Subject::PhysicalScience),
      life_science: subjective(Subject::LifeScience),
    },
  }
}

/// What a model might send back: a full paper with its own (wrong) year and set.
pub fn model_response_json() -> String {
  let mut paper = full_paper();
  paper.year = "1999".into();
  paper.set = "Z".into();
  serde_json::to_string(&paper).unwrap_or_default()
}
