use crate::autolink::AutolinkMap;
use crate::enrichment::TokenizeFn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Placeholder token in url/title/description templates, replaced with the matched identifier.
pub const NUM_TOKEN: &str = "<num>";

/// What a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutolinkKind {
  Issue,
  PullRequest,
}

/// Restricts which scan a reference applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceScope {
  Commit,
  Branch,
}

/// Output surface a matcher or renderer targets. Matchers are compiled per format
/// because markdown/html inputs have already been markup-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  Html,
  Markdown,
  Plaintext,
}

/// Custom parser for dynamic references. Mutates the result map directly,
/// keyed by its own identifier scheme. An error aborts the whole scan call.
pub type ParseFn = dyn Fn(&str, &mut AutolinkMap) -> anyhow::Result<()> + Send + Sync;

/// A reference family matched by compiled regexes built from `prefix` + `url`.
#[derive(Clone)]
pub struct StaticReference {
  /// Literal token preceding the identifier (may be empty).
  pub prefix: String,
  /// URL template containing [`NUM_TOKEN`].
  pub url: String,
  /// If true the identifier body is `\w+`, otherwise digits only.
  pub alphanumeric: bool,
  /// Case-insensitive prefix matching.
  pub ignore_case: bool,
  pub title: Option<String>,
  pub description: Option<String>,
  pub kind: Option<AutolinkKind>,
  pub scope: Option<ReferenceScope>,
  pub tokenize: Option<Arc<TokenizeFn>>,
}

impl StaticReference {
  /// Branch scanning uses chunk splitting and the numeric-chunk pattern only for
  /// references with no prefix and a digits-only identifier body.
  pub fn is_non_prefixed(&self) -> bool {
    self.prefix.is_empty() && !self.alphanumeric
  }
}

impl fmt::Debug for StaticReference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StaticReference")
      .field("prefix", &self.prefix)
      .field("url", &self.url)
      .field("alphanumeric", &self.alphanumeric)
      .field("ignore_case", &self.ignore_case)
      .field("title", &self.title)
      .field("description", &self.description)
      .field("kind", &self.kind)
      .field("scope", &self.scope)
      .field("tokenize", &self.tokenize.as_ref().map(|_| "<fn>"))
      .finish()
  }
}

/// A reference whose matches come from a custom parse routine instead of a regex.
#[derive(Clone)]
pub struct DynamicReference {
  pub parse: Arc<ParseFn>,
  pub tokenize: Option<Arc<TokenizeFn>>,
}

impl fmt::Debug for DynamicReference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DynamicReference").field("parse", &"<fn>").finish()
  }
}

/// One configured reference pattern family.
///
/// The two variants are mutually exclusive by construction: a static reference
/// always carries both prefix and url (eligible for compiled-regex matching),
/// a dynamic one never does.
#[derive(Debug, Clone)]
pub enum AutolinkReference {
  Static(StaticReference),
  Dynamic(DynamicReference),
}

impl AutolinkReference {
  pub fn is_cacheable(&self) -> bool {
    matches!(self, AutolinkReference::Static(_))
  }

  pub fn is_dynamic(&self) -> bool {
    matches!(self, AutolinkReference::Dynamic(_))
  }

  pub fn as_static(&self) -> Option<&StaticReference> {
    match self {
      AutolinkReference::Static(r) => Some(r),
      AutolinkReference::Dynamic(_) => None,
    }
  }
}
