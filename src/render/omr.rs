//! Blank OMR answer sheet.
//!
//! Pure function of title, year, set and row count. Rows are split into two columns;
//! with the default 50 rows the second column starts at 26, same as Section A numbering.

use std::fmt::Write as _;

use crate::blueprint::{EXAM_TITLE, MCQ_OPTION_LABELS, MCQ_PER_SUBJECT};
use crate::domain::{QuestionPaper, Subject};
use crate::util::escape_html as esc;

const OMR_STYLE: &str = "
body { font-family: Arial, sans-serif; padding: 20px; text-align: center; }
.omr-header { border-bottom: 2px solid black; padding-bottom: 10px; margin-bottom: 20px; }
.omr-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 30px; max-width: 800px; margin: 0 auto; }
.omr-column { display: flex; flex-direction: column; gap: 10px; }
.omr-row { display: flex; align-items: center; justify-content: space-between; border-bottom: 1px solid #f0f0f0; padding: 5px 0; }
.q-num { font-weight: bold; width: 30px; text-align: left; }
.bubbles { display: flex; gap: 15px; }
.bubble { width: 25px; height: 25px; border-radius: 50%; border: 1px solid black; display: flex; align-items: center; justify-content: center; font-size: 12px; }
.set-box { border: 2px solid black; padding: 5px 15px; font-weight: bold; display: inline-block; margin-top: 10px; }
@media print {
  .no-print { display: none; }
  body { -webkit-print-color-adjust: exact; }
}
";

pub fn omr_sheet(title: &str, year: &str, set: &str, rows: usize) -> String {
  let title = esc(title);
  let mut out = String::with_capacity(16 * 1024);
  let _ = write!(
    out,
    "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>OMR Answer Sheet - {title}</title>\n<style>{OMR_STYLE}</style>\n</head>\n<body>\n"
  );
  out.push_str(
    "<div class=\"no-print\" style=\"margin-bottom: 20px;\">\
<button onclick=\"window.print()\" style=\"padding: 10px 20px; background: #333; color: white; border: none; cursor: pointer;\">Print / Save as PDF</button></div>\n",
  );
  out.push_str("<div class=\"omr-header\">\n<h1>OMR Answer Sheet</h1>\n");
  let _ = writeln!(out, "<h2>{title} - {}</h2>", esc(year));
  let _ = writeln!(out, "<div class=\"set-box\">SET: {}</div>", esc(set));
  out.push_str(
    "<div style=\"display: flex; justify-content: space-around; margin-top: 20px; flex-wrap: wrap; gap: 20px;\">\
<span>Name: _______________________</span>\
<span>Roll No: _______________________</span>\
<span>Date: _______________________</span></div>\n</div>\n",
  );

  let first_column = rows.div_ceil(2);
  out.push_str("<div class=\"omr-grid\">\n");
  push_column(&mut out, 1..=first_column);
  push_column(&mut out, first_column + 1..=rows);
  out.push_str("</div>\n");

  out.push_str(
    "<div style=\"margin-top: 40px; text-align: right; padding-right: 50px;\">\
<p>_______________________</p><p>Candidate's Signature</p></div>\n</body>\n</html>\n",
  );
  out
}

fn push_column(out: &mut String, numbers: std::ops::RangeInclusive<usize>) {
  out.push_str("<div class=\"omr-column\">\n");
  for n in numbers {
    let _ = write!(out, "<div class=\"omr-row\"><span class=\"q-num\">{n}.</span><div class=\"bubbles\">");
    for label in MCQ_OPTION_LABELS {
      let _ = write!(out, "<div class=\"bubble\">{label}</div>");
    }
    out.push_str("</div></div>\n");
  }
  out.push_str("</div>\n");
}

/// Sheet for a stored paper. Row count follows the blueprint, not the paper's items.
pub fn omr_sheet_for(paper: &QuestionPaper) -> String {
  let title = if paper.title.trim().is_empty() { EXAM_TITLE } else { paper.title.as_str() };
  omr_sheet(title, &paper.year, &paper.set, Subject::ALL.len() * MCQ_PER_SUBJECT)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::full_paper;

  #[test]
  fn fifty_rows_in_two_columns() {
    let html = omr_sheet(EXAM_TITLE, "2026", "A", 50);
    assert_eq!(html.matches("class=\"omr-row\"").count(), 50);
    assert_eq!(html.matches("class=\"omr-column\"").count(), 2);
    assert_eq!(html.matches("<div class=\"bubble\">A</div>").count(), 50);
    let second = html.rfind("class=\"omr-column\"").expect("second column");
    let q26 = html.find("<span class=\"q-num\">26.</span>").expect("row 26");
    let q25 = html.find("<span class=\"q-num\">25.</span>").expect("row 25");
    assert!(q25 < second && second < q26);
    assert!(html.contains("<h2>Class-X (HSC) Pre-Board Examination - 2026</h2>"));
    assert!(html.contains("SET: A"));
    assert!(html.contains("Candidate's Signature"));
  }

  #[test]
  fn identical_metadata_gives_identical_sheet() {
    let a = full_paper();
    let mut b = full_paper();
    b.section_a.physical_science.clear();
    b.section_b.life_science.truncate(1);
    assert_eq!(omr_sheet_for(&a), omr_sheet_for(&b));

    b.stamp("2026", "C");
    assert_ne!(omr_sheet_for(&a), omr_sheet_for(&b));
  }

  #[test]
  fn blank_title_falls_back() {
    let mut paper = full_paper();
    paper.title = "  ".into();
    assert!(omr_sheet_for(&paper).contains("<title>OMR Answer Sheet - Class-X (HSC) Pre-Board Examination</title>"));
  }
}
