use crate::enrichment::TokenizeFn;
use crate::priority::Priority;
use crate::reference::{AutolinkKind, AutolinkReference};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identity of the integration/provider a reference set came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderReference {
  pub id: String,
  pub name: String,
  pub domain: String,
  pub icon: String,
}

/// One provider's ordered reference configuration.
#[derive(Debug, Clone)]
pub struct RefSet {
  pub provider: Option<ProviderReference>,
  pub references: Vec<AutolinkReference>,
}

/// Result of a scan: identifier (commit scan) or substituted URL (branch scan)
/// to the current-best candidate link for that key. Insertion-ordered so the
/// branch scanner can sort it by relevance before returning.
pub type AutolinkMap = IndexMap<String, Autolink>;

/// A recognized reference converted into a structured link.
#[derive(Clone)]
pub struct Autolink {
  /// Raw matched identifier (without the prefix).
  pub id: String,
  pub provider: Option<ProviderReference>,
  /// Zero-based byte offset of the match in the scanned text.
  pub index: Option<usize>,
  pub prefix: String,
  /// Fully substituted URL, no placeholder remains.
  pub url: String,
  pub alphanumeric: bool,
  pub ignore_case: bool,
  pub title: Option<String>,
  pub description: Option<String>,
  pub kind: Option<AutolinkKind>,
  /// Ranking tie-break, present only for branch-derived links from
  /// non-prefixed references.
  pub priority: Option<Priority>,
  pub tokenize: Option<Arc<TokenizeFn>>,
}

impl Autolink {
  /// Closure-free form suitable for crossing a serialization boundary.
  pub fn serialized(&self) -> SerializedAutolink {
    SerializedAutolink {
      provider: self.provider.clone(),
      id: self.id.clone(),
      index: self.index,
      prefix: self.prefix.clone(),
      url: self.url.clone(),
      alphanumeric: self.alphanumeric,
      ignore_case: self.ignore_case,
      title: self.title.clone(),
      kind: self.kind,
      description: self.description.clone(),
    }
  }
}

impl fmt::Debug for Autolink {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Autolink")
      .field("id", &self.id)
      .field("provider", &self.provider)
      .field("index", &self.index)
      .field("prefix", &self.prefix)
      .field("url", &self.url)
      .field("title", &self.title)
      .field("kind", &self.kind)
      .field("priority", &self.priority)
      .finish()
  }
}

/// Plain-data projection of [`Autolink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedAutolink {
  pub provider: Option<ProviderReference>,
  pub id: String,
  pub index: Option<usize>,
  pub prefix: String,
  pub url: String,
  pub alphanumeric: bool,
  pub ignore_case: bool,
  pub title: Option<String>,
  pub kind: Option<AutolinkKind>,
  pub description: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_serialized_autolink_json_shape() {
    let autolink = Autolink {
      id: "1234".to_string(),
      provider: Some(ProviderReference {
        id: "github".to_string(),
        name: "GitHub".to_string(),
        domain: "github.com".to_string(),
        icon: "github".to_string(),
      }),
      index: Some(6),
      prefix: "#".to_string(),
      url: "https://github.com/o/r/issues/1234".to_string(),
      alphanumeric: false,
      ignore_case: true,
      title: Some("Issue #1234".to_string()),
      description: None,
      kind: Some(AutolinkKind::Issue),
      priority: None,
      tokenize: None,
    };

    let json = serde_json::to_value(autolink.serialized()).unwrap();
    assert_eq!(json["id"], "1234");
    assert_eq!(json["ignoreCase"], true);
    assert_eq!(json["kind"], "issue");
    assert_eq!(json["provider"]["domain"], "github.com");
  }
}
