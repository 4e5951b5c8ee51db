//! Small utility helpers used across modules.

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len() + 8);
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Sub-item label for a 0-based index: a, b, …, z, aa, ab, …
pub fn sub_item_label(index: usize) -> String {
  let mut n = index + 1;
  let mut rev = Vec::new();
  while n > 0 {
    n -= 1;
    rev.push((b'a' + (n % 26) as u8) as char);
    n /= 26;
  }
  rev.iter().rev().collect()
}

/// True if the char is in the Odia Unicode block.
pub fn is_odia(ch: char) -> bool {
  ('\u{0B00}'..='\u{0B7F}').contains(&ch)
}

/// Share of Odia chars among Odia + ASCII letters. None when there are no letters.
pub fn odia_ratio<'a>(texts: impl IntoIterator<Item = &'a str>) -> Option<f32> {
  let mut odia = 0usize;
  let mut latin = 0usize;
  for t in texts {
    for ch in t.chars() {
      if is_odia(ch) { odia += 1; }
      else if ch.is_ascii_alphabetic() { latin += 1; }
    }
  }
  let total = odia + latin;
  if total == 0 { None } else { Some(odia as f32 / total as f32) }
}

/// Log-safe truncation for large strings (char boundary aware).
pub fn trunc_for_log(s: &str, max_chars: usize) -> String {
  let count = s.chars().count();
  if count <= max_chars {
    s.to_string()
  } else {
    let head: String = s.chars().take(max_chars).collect();
    format!("{}… ({} chars total)", head, count)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_markup() {
    assert_eq!(escape_html(r#"<b>"x" & 'y'</b>"#), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    assert_eq!(escape_html("ପ୍ରଶ୍ନ"), "ପ୍ରଶ୍ନ");
  }

  #[test]
  fn sub_labels() {
    assert_eq!(sub_item_label(0), "a");
    assert_eq!(sub_item_label(3), "d");
    assert_eq!(sub_item_label(25), "z");
    assert_eq!(sub_item_label(26), "aa");
  }

  #[test]
  fn odia_share() {
    assert_eq!(odia_ratio(["123 ?"]), None);
    assert_eq!(odia_ratio(["ଜୀବ"]), Some(1.0));
    let r = odia_ratio(["ab", "ଜୀ"]).expect("ratio");
    assert!((r - 0.5).abs() < f32::EPSILON);
  }

  #[test]
  fn truncation_respects_chars() {
    assert_eq!(trunc_for_log("ପ୍ରଶ୍ନ", 100), "ପ୍ରଶ୍ନ");
    assert!(trunc_for_log("abcdef", 3).starts_with("abc…"));
  }
}
