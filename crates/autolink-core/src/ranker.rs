use autolink_types::Autolink;
use std::cmp::Ordering;

/// Total preorder over candidate links: sorting ascending with this comparator
/// puts the most relevant link first.
///
/// 1. a longer prefix always wins over a bare numeric pattern,
/// 2. a greater branch-derived [`Priority`](autolink_types::Priority) wins
///    (absent sorts below any present; equal falls through),
/// 3. a match that began at offset 0 wins,
/// 4. a longer identifier wins; the final tie-break is the earlier offset.
///
/// Ties beyond that keep encounter order under a stable sort.
pub fn compare_autolinks(a: &Autolink, b: &Autolink) -> Ordering {
  let by_prefix = b.prefix.len().cmp(&a.prefix.len());
  if by_prefix != Ordering::Equal {
    return by_prefix;
  }

  let by_priority = b.priority.cmp(&a.priority);
  if by_priority != Ordering::Equal {
    return by_priority;
  }

  if b.index == Some(0) {
    return Ordering::Greater;
  }
  if a.index == Some(0) {
    return Ordering::Less;
  }

  b.id.len().cmp(&a.id.len()).then_with(|| match (a.index, b.index) {
    (Some(a_index), Some(b_index)) => a_index.cmp(&b_index),
    _ => Ordering::Equal,
  })
}
