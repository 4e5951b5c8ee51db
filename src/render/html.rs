//! Printable HTML rendering of a question paper.
//!
//! `paper_fragment` is the document body the UI shows, prints and wraps for Word;
//! `printable_page` is a standalone page around it. Everything coming from the
//! model is escaped.

use std::fmt::Write as _;

use crate::blueprint::SECTION_MARKS;
use crate::render::layout::{layout, NumberedMcq, SubItem, SubjectiveGroup};
use crate::domain::QuestionPaper;
use crate::util::escape_html as esc;

pub const OR_SEPARATOR: &str = "- OR -";
pub const GROUP_PROMPT: &str = "Answer the following questions:";

pub fn paper_fragment(paper: &QuestionPaper, brand: &str) -> String {
  let lay = layout(paper);
  let mut out = String::with_capacity(32 * 1024);

  out.push_str("<div class=\"paper\">\n");
  push_header(&mut out, paper, brand);

  out.push_str("<section class=\"section-a\">\n");
  let _ = writeln!(out, "<div class=\"section-title\">Section - A (Objective) - {SECTION_MARKS} Marks</div>");
  for m in &lay.mcqs {
    push_mcq(&mut out, m);
  }
  out.push_str("</section>\n");

  out.push_str("<div class=\"print-break\"></div>\n");

  out.push_str("<section class=\"section-b\">\n");
  let _ = writeln!(out, "<div class=\"section-title\">Section - B (Subjective) - {SECTION_MARKS} Marks</div>");
  for group in &lay.groups {
    push_group(&mut out, group);
  }
  out.push_str("</section>\n</div>\n");
  out
}

fn push_header(out: &mut String, paper: &QuestionPaper, brand: &str) {
  out.push_str("<div class=\"paper-header\">\n");
  let _ = writeln!(out, "<h2 class=\"brand\">{}</h2>", esc(brand));
  let _ = writeln!(out, "<h3 class=\"year\">{}</h3>", esc(&paper.year));
  out.push_str("<h3 class=\"exam\">CLASS - X (HSC) Pre-Board Examination</h3>\n");
  out.push_str("<h4 class=\"subject\">GENERAL SCIENCE</h4>\n");
  let _ = writeln!(
    out,
    "<div class=\"meta\"><span>Time: {}</span><span>Full Marks: {}</span></div>",
    esc(&paper.time),
    paper.full_marks
  );
  let _ = writeln!(out, "<div class=\"set-box\">SET: {}</div>", esc(&paper.set));
  out.push_str("</div>\n");
}

fn push_mcq(out: &mut String, m: &NumberedMcq<'_>) {
  let q = m.question;
  let _ = write!(
    out,
    "<div class=\"mcq\"><span class=\"num\">{}.</span><div class=\"body\"><p class=\"q\">{}</p><div class=\"options\">",
    m.number,
    esc(&q.question_text)
  );
  for opt in &q.options {
    let _ = write!(
      out,
      "<div class=\"option\"><span class=\"label\">({})</span> <span>{}</span></div>",
      esc(&opt.label),
      esc(&opt.text)
    );
  }
  out.push_str("</div></div></div>\n");
}

fn push_group(out: &mut String, group: &SubjectiveGroup<'_>) {
  if group.items.is_empty() {
    return;
  }
  let _ = writeln!(
    out,
    "<div class=\"group\" data-subject=\"{}\" data-marks=\"{}\"><div class=\"group-head\"><span>{}.</span> <span>{GROUP_PROMPT}</span></div>",
    group.subject.label(), group.marks, group.number
  );
  for item in &group.items {
    push_item(out, item);
  }
  out.push_str("</div>\n");
}

fn push_item(out: &mut String, item: &SubItem<'_>) {
  let q = item.question;
  let _ = write!(
    out,
    "<div class=\"item\"><div class=\"item-row\"><span class=\"sub\">{})</span><span class=\"q\">{}</span><span class=\"marks\">[{}]</span></div>",
    item.label,
    esc(&q.question_text),
    q.marks
  );
  if let Some(alt) = q.visible_alternative() {
    let _ = write!(
      out,
      "<div class=\"or\">{OR_SEPARATOR}</div><div class=\"alt\">{}</div>",
      esc(alt)
    );
  }
  out.push_str("</div>\n");
}

const PAGE_STYLE: &str = r#"
body { font-family: "Noto Sans Oriya", "Kalinga", Arial, sans-serif; margin: 0; padding: 24px; color: #111; }
.paper { max-width: 210mm; margin: 0 auto; }
.paper-header { text-align: center; border-bottom: 2px solid #000; padding-bottom: 16px; margin-bottom: 32px; }
.paper-header .brand { text-transform: uppercase; letter-spacing: .05em; margin: 0 0 8px; }
.paper-header .meta { display: flex; justify-content: space-between; margin-top: 24px; font-weight: bold; border-top: 1px solid #ccc; padding-top: 8px; }
.set-box { margin-top: 16px; display: inline-block; border: 2px solid #000; padding: 4px 24px; font-weight: bold; }
.section-title { background: #f3f4f6; text-align: center; padding: 8px 0; font-weight: bold; border-top: 2px solid #000; border-bottom: 2px solid #000; margin-bottom: 24px; text-transform: uppercase; }
.mcq { display: flex; gap: 8px; margin-bottom: 20px; break-inside: avoid; }
.mcq .num { font-weight: bold; min-width: 24px; }
.mcq .body { width: 100%; }
.options { display: grid; grid-template-columns: 1fr 1fr; gap: 8px 32px; margin-left: 8px; }
.option .label { font-weight: 600; }
.group { margin-bottom: 24px; break-inside: avoid; }
.group-head { font-weight: bold; font-size: 1.1em; margin-bottom: 12px; }
.item { margin: 0 0 16px 8px; break-inside: avoid; }
.item-row { display: flex; gap: 8px; }
.item-row .q { flex: 1; }
.item-row .marks { font-weight: bold; white-space: nowrap; }
.or { text-align: center; font-weight: bold; color: #6b7280; margin: 4px 0; }
.alt { padding-left: 32px; }
.print-break { page-break-after: always; }
@media print { .no-print { display: none; } body { padding: 0; } }
"#;

/// Standalone page for the browser print pipeline.
pub fn printable_page(paper: &QuestionPaper, brand: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{} - {} - SET {}</title>\n<style>{PAGE_STYLE}</style>\n</head>\n<body>\n<div class=\"no-print\" style=\"margin-bottom: 16px;\"><button onclick=\"window.print()\">Print / Save as PDF</button></div>\n{}</body>\n</html>\n",
    esc(brand),
    esc(&paper.year),
    esc(&paper.set),
    paper_fragment(paper, brand),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::full_paper;

  const BRAND: &str = "Oms BSE Odisha Mock Test";

  #[test]
  fn header_shows_year_set_and_marks() {
    let mut paper = full_paper();
    paper.stamp("2027", "B");
    let html = paper_fragment(&paper, BRAND);
    assert!(html.contains("<h3 class=\"year\">2027</h3>"));
    assert!(html.contains("SET: B"));
    assert!(html.contains("Full Marks: 100"));
    assert!(html.contains("Time: 2 Hours 30 Minutes"));
    assert!(html.contains("Section - A (Objective) - 50 Marks"));
  }

  #[test]
  fn mcqs_numbered_one_to_fifty() {
    let html = paper_fragment(&full_paper(), BRAND);
    for n in 1..=50 {
      assert!(html.contains(&format!("<span class=\"num\">{n}.</span>")), "missing {n}");
    }
    assert!(!html.contains("<span class=\"num\">51.</span>"));
    assert_eq!(html.matches("<div class=\"option\">").count(), 200);
  }

  #[test]
  fn or_block_only_with_internal_choice() {
    let mut paper = full_paper();
    let with_choice = paper_fragment(&paper, BRAND);
    assert_eq!(with_choice.matches(OR_SEPARATOR).count(), 18);

    for q in paper.section_b.physical_science.iter_mut().chain(paper.section_b.life_science.iter_mut()) {
      q.has_internal_choice = false;
    }
    let without = paper_fragment(&paper, BRAND);
    assert!(!without.contains(OR_SEPARATOR));
    assert!(!without.contains("ନମ୍ବର ବିକଳ୍ପ"));
  }

  #[test]
  fn or_separator_sits_between_main_and_alternative() {
    let html = paper_fragment(&full_paper(), BRAND);
    let main = html.find("ଭୌତିକ ବିଜ୍ଞାନ 2 ନମ୍ବର ପ୍ରଶ୍ନ 1").expect("main");
    let or = html[main..].find(OR_SEPARATOR).expect("or") + main;
    let alt = html.find("ଭୌତିକ ବିଜ୍ଞାନ 2 ନମ୍ବର ବିକଳ୍ପ 1").expect("alt");
    assert!(main < or && or < alt);
  }

  #[test]
  fn six_group_headings() {
    let html = paper_fragment(&full_paper(), BRAND);
    for n in 1..=6 {
      assert!(html.contains(&format!("<span>{n}.</span> <span>{GROUP_PROMPT}</span>")));
    }
    assert_eq!(html.matches("<span class=\"marks\">[4]</span>").count(), 4);
  }

  #[test]
  fn model_text_is_escaped() {
    let mut paper = full_paper();
    paper.section_a.physical_science[0].question_text = "<script>alert(1)</script>".into();
    let html = paper_fragment(&paper, BRAND);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
  }

  #[test]
  fn empty_paper_degrades_quietly() {
    let paper = QuestionPaper {
      title: String::new(), year: "2026".into(), set: "A".into(), full_marks: 0, time: String::new(),
      section_a: Default::default(), section_b: Default::default(),
    };
    let html = paper_fragment(&paper, BRAND);
    assert!(html.contains("SET: A"));
    assert!(!html.contains("class=\"group\""));
    assert!(printable_page(&paper, BRAND).contains("window.print()"));
  }
}
