//! Markup escaping helpers used when embedding a literal prefix into a
//! matcher for already-encoded text, and when rendering substituted links.

use memchr::memchr3;

/// Weak HTML encoding: only the characters that break out of text context.
pub fn encode_html_weak(text: &str) -> String {
  let bytes = text.as_bytes();
  // Fast path: nothing to encode
  if memchr3(b'<', b'>', b'&', bytes).is_none() && !bytes.contains(&b'"') {
    return text.to_string();
  }

  let mut encoded = String::with_capacity(text.len() + 8);
  for c in text.chars() {
    match c {
      '&' => encoded.push_str("&amp;"),
      '<' => encoded.push_str("&lt;"),
      '>' => encoded.push_str("&gt;"),
      '"' => encoded.push_str("&quot;"),
      _ => encoded.push(c),
    }
  }
  encoded
}

fn is_markdown_special(c: char) -> bool {
  matches!(c, '\\' | '`' | '*' | '_' | '{' | '}' | '[' | ']' | '(' | ')' | '#' | '+' | '-' | '.' | '!' | '<' | '>')
}

/// Backslash-escape markdown metacharacters.
pub fn escape_markdown(text: &str) -> String {
  if !text.chars().any(is_markdown_special) {
    return text.to_string();
  }

  let mut escaped = String::with_capacity(text.len() + 8);
  for c in text.chars() {
    if is_markdown_special(c) {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_encode_html_weak() {
    assert_eq!(encode_html_weak("plain text"), "plain text");
    assert_eq!(encode_html_weak("a < b"), "a &lt; b");
    assert_eq!(encode_html_weak("<tag> & \"quoted\""), "&lt;tag&gt; &amp; &quot;quoted&quot;");
    assert_eq!(encode_html_weak(""), "");
    // apostrophes are deliberately left alone
    assert_eq!(encode_html_weak("it's"), "it's");
  }

  #[test]
  fn test_escape_markdown() {
    assert_eq!(escape_markdown("plain"), "plain");
    assert_eq!(escape_markdown("#123"), "\\#123");
    assert_eq!(escape_markdown("a*b_c"), "a\\*b\\_c");
    assert_eq!(escape_markdown("[link](url)"), "\\[link\\]\\(url\\)");
    assert_eq!(escape_markdown("back\\slash"), "back\\\\slash");
    assert_eq!(escape_markdown(""), "");
  }
}
