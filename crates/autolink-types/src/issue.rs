use crate::reference::AutolinkKind;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an issue or pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueOrPullRequestState {
  Open,
  Closed,
  Merged,
}

/// Live metadata for an issue or pull request, produced by a provider client
/// during enrichment. The engine never fetches this itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueOrPullRequest {
  pub id: String,
  pub kind: AutolinkKind,
  pub title: String,
  pub url: String,
  pub state: IssueOrPullRequestState,
  pub closed: bool,
  /// Unix timestamp in milliseconds.
  pub created_date: u64,
  /// Unix timestamp in milliseconds.
  pub updated_date: u64,
}
