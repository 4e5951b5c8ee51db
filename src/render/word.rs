//! Word export: the HTML fragment wrapped in the MS-Office namespace header.
//! Word opens such a `.doc` as a regular document.

use crate::domain::QuestionPaper;

pub const WORD_MIME: &str = "application/vnd.ms-word";

const HEADER: &str = "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
xmlns:w='urn:schemas-microsoft-com:office:word' \
xmlns='http://www.w3.org/TR/REC-html40'>\
<head><meta charset='utf-8'><title>Question Paper</title></head><body>";
const FOOTER: &str = "</body></html>";

pub fn word_document(fragment: &str) -> String {
  let mut out = String::with_capacity(HEADER.len() + fragment.len() + FOOTER.len());
  out.push_str(HEADER);
  out.push_str(fragment);
  out.push_str(FOOTER);
  out
}

/// `<prefix>_<year>_Set<set>.doc`, restricted to filename-safe ASCII.
pub fn word_filename(prefix: &str, paper: &QuestionPaper) -> String {
  format!("{}_{}_Set{}.doc", safe(prefix), safe(&paper.year), safe(&paper.set))
}

fn safe(part: &str) -> String {
  part
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
    .collect()
}
