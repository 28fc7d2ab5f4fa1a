use crate::autolink::Autolink;
use crate::issue::IssueOrPullRequest;
use crate::reference::OutputFormat;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Outcome of one enrichment lookup. Renderers must represent all three
/// states distinctly; `Pending` lets a caller render before lookups settle.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentState {
  Pending,
  /// Lookup finished; `None` means the provider knows no such issue/PR.
  Resolved(Option<IssueOrPullRequest>),
  Failed(String),
}

impl EnrichmentState {
  pub fn issue(&self) -> Option<&IssueOrPullRequest> {
    match self {
      EnrichmentState::Resolved(issue) => issue.as_ref(),
      _ => None,
    }
  }
}

/// A candidate link together with whatever its enrichment lookup has produced
/// so far.
#[derive(Debug, Clone)]
pub struct MaybeEnrichedAutolink {
  pub issue: EnrichmentState,
  pub autolink: Autolink,
}

/// Per-reference token-substitution function for rendering.
///
/// Takes the source text, the target output format, a shared token mapping,
/// and optionally the enrichment map, the set of already-rendered PR ids, and
/// a footnote accumulator; returns the text with recognized identifiers
/// replaced. Must be pure with respect to its inputs.
pub type TokenizeFn = dyn Fn(
    &str,
    OutputFormat,
    &mut HashMap<String, String>,
    Option<&IndexMap<String, MaybeEnrichedAutolink>>,
    Option<&HashSet<String>>,
    Option<&mut BTreeMap<usize, String>>,
  ) -> String
  + Send
  + Sync;
