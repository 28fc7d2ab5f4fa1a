/// Errors surfaced by the scanning entry points.
///
/// Enrichment failures never appear here; they are captured per identifier as
/// an [`autolink_types::EnrichmentState::Failed`] state instead.
#[derive(Debug)]
pub enum AutolinkError {
  /// A reference's prefix produced an uncompilable pattern. The memoization
  /// table is untouched in this case.
  InvalidPattern { prefix: String, source: regex::Error },
  /// A dynamic reference's parse routine failed; the whole scan call aborts.
  Parse(anyhow::Error),
}

impl From<anyhow::Error> for AutolinkError {
  fn from(err: anyhow::Error) -> Self {
    AutolinkError::Parse(err)
  }
}

impl std::fmt::Display for AutolinkError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AutolinkError::InvalidPattern { prefix, source } => write!(f, "invalid autolink pattern for prefix '{prefix}': {source}"),
      AutolinkError::Parse(e) => write!(f, "{e}"),
    }
  }
}

impl std::error::Error for AutolinkError {}
