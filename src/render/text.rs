//! Plain-text rendering, the same content and order as the HTML document.

use std::fmt::Write as _;

use crate::blueprint::SECTION_MARKS;
use crate::domain::QuestionPaper;
use crate::render::html::{GROUP_PROMPT, OR_SEPARATOR};
use crate::render::layout::layout;

pub fn paper_text(paper: &QuestionPaper, brand: &str) -> String {
  let lay = layout(paper);
  let mut out = String::with_capacity(16 * 1024);

  let _ = writeln!(out, "{}", brand.to_uppercase());
  let _ = writeln!(out, "{}", paper.year);
  out.push_str("CLASS - X (HSC) PRE-BOARD EXAMINATION\n");
  out.push_str("GENERAL SCIENCE\n");
  let _ = writeln!(out, "Time: {}\tFull Marks: {}", paper.time, paper.full_marks);
  let _ = writeln!(out, "SET: {}\n", paper.set);

  let _ = writeln!(out, "SECTION - A (OBJECTIVE) - {SECTION_MARKS} MARKS\n");
  for m in &lay.mcqs {
    let _ = writeln!(out, "{}. {}", m.number, m.question.question_text);
    for opt in &m.question.options {
      let _ = writeln!(out, "   ({}) {}", opt.label, opt.text);
    }
    out.push('\n');
  }

  let _ = writeln!(out, "SECTION - B (SUBJECTIVE) - {SECTION_MARKS} MARKS\n");
  for group in lay.groups.iter().filter(|g| !g.items.is_empty()) {
    let _ = writeln!(out, "{}. {GROUP_PROMPT}", group.number);
    for item in &group.items {
      let q = item.question;
      let _ = writeln!(out, "   {}) {} [{}]", item.label, q.question_text, q.marks);
      if let Some(alt) = q.visible_alternative() {
        let _ = writeln!(out, "      {OR_SEPARATOR}");
        let _ = writeln!(out, "      {alt}");
      }
    }
    out.push('\n');
  }
  out
}
