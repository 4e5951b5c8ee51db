//! Answer key for Section A, by display number.

use std::fmt::Write as _;

use crate::domain::QuestionPaper;
use crate::render::layout::mcq_numbers;

pub fn answer_key(paper: &QuestionPaper) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Answer Key - {} - SET {}", paper.year, paper.set);
  let _ = writeln!(out, "Section - A (Objective)\n");
  for m in mcq_numbers(paper) {
    let correct = m.question.correct_option.trim();
    let _ = writeln!(out, "{:>2}. {}", m.number, if correct.is_empty() { "-" } else { correct });
  }
  out
}
