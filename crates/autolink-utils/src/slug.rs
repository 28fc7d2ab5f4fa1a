//! Minimal slugification for matching branch-shaped patterns against free
//! text (reference titles). Whitespace runs become a single hyphen and only
//! characters the branch matchers can see are kept.

/// Slugify `text` into a hyphen-separated token string.
pub fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut pending_separator = false;

  for c in text.chars() {
    if c.is_whitespace() {
      if !slug.is_empty() {
        pending_separator = true;
      }
      continue;
    }
    if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
      if pending_separator {
        slug.push('-');
        pending_separator = false;
      }
      slug.push(c);
    }
    // everything else is dropped, without forcing a separator
  }

  slug
}
