use serde::{Deserialize, Serialize};

/// Relevance tie-break for branch-derived autolinks from non-prefixed references.
///
/// Compared field by field in declaration order; a greater priority means a more
/// relevant match. Field order encodes the tie-break scheme:
/// 1. chunk index of the containing branch chunk,
/// 2. negated edge distance (a match hugging either chunk edge beats one buried
///    in the middle),
/// 3. whether the matched number chunk is exactly the issue key,
/// 4. numeric value of the key itself.
///
/// The numeric component is a heuristic: identifiers too large for `u64`
/// saturate, so ordering between two enormous keys degrades rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Priority {
  chunk_index: usize,
  edge_proximity: i64,
  exact_chunk: bool,
  numeric_value: u64,
}

impl Priority {
  pub fn new(issue_key: &str, edge_distance: i64, number_chunk: &str, chunk_index: usize) -> Self {
    Self {
      chunk_index,
      edge_proximity: -edge_distance,
      exact_chunk: issue_key == number_chunk,
      numeric_value: issue_key.parse().unwrap_or(u64::MAX),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_edge_proximity_wins_within_chunk() {
    // closer to a chunk edge sorts higher
    let near_edge = Priority::new("12", 0, "12", 0);
    let buried = Priority::new("12", 4, "12", 0);
    assert!(near_edge > buried);
  }

  #[test]
  fn test_chunk_index_checked_first() {
    let later_chunk = Priority::new("1", 5, "1", 2);
    let earlier_chunk = Priority::new("9", 0, "9", 1);
    assert!(later_chunk > earlier_chunk);
  }

  #[test]
  fn test_exact_chunk_preferred() {
    let exact = Priority::new("12", 1, "12", 0);
    let partial = Priority::new("12", 1, "12.3", 0);
    assert!(exact > partial);
  }

  #[test]
  fn test_larger_key_wins_last() {
    let small = Priority::new("7", 1, "7", 0);
    let large = Priority::new("700", 1, "700", 0);
    assert!(large > small);
  }

  #[test]
  fn test_overflow_saturates() {
    let huge = Priority::new("99999999999999999999999999", 0, "99999999999999999999999999", 0);
    let plain = Priority::new("5", 0, "5", 0);
    assert!(huge > plain);
  }

  #[test]
  fn test_negative_edge_distance_is_valid() {
    // a match ending flush with the chunk end yields distance -1
    let flush = Priority::new("3", -1, "3", 0);
    let inset = Priority::new("3", 0, "3", 0);
    assert!(flush > inset);
  }
}
