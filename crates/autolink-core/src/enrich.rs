use autolink_types::{AutolinkMap, EnrichmentState, IssueOrPullRequest, MaybeEnrichedAutolink, ProviderReference};
use indexmap::IndexMap;
use std::future::Future;
use tracing::{debug, warn};

/// Wrap every candidate in a `Pending` enrichment record, for rendering before
/// (or without) any lookups settling.
pub fn pending_enrichment(autolinks: &AutolinkMap) -> IndexMap<String, MaybeEnrichedAutolink> {
  autolinks
    .iter()
    .map(|(key, autolink)| {
      (
        key.clone(),
        MaybeEnrichedAutolink {
          issue: EnrichmentState::Pending,
          autolink: autolink.clone(),
        },
      )
    })
    .collect()
}

/// Fetch live issue/PR data for every candidate link, concurrently.
///
/// One lookup task is spawned per entry, so lookups are independently
/// cancellable and independently failable: a failed, panicked, or aborted
/// lookup becomes [`EnrichmentState::Failed`] for that key alone and never
/// disturbs the others. The scan itself stays synchronous; this is the only
/// async boundary.
pub async fn enrich_autolinks<F, Fut>(autolinks: AutolinkMap, lookup: F) -> IndexMap<String, MaybeEnrichedAutolink>
where
  F: Fn(String, Option<ProviderReference>) -> Fut,
  Fut: Future<Output = anyhow::Result<Option<IssueOrPullRequest>>> + Send + 'static,
{
  let mut spawned = Vec::with_capacity(autolinks.len());
  for (key, autolink) in autolinks {
    let handle = tokio::spawn(lookup(autolink.id.clone(), autolink.provider.clone()));
    spawned.push((key, autolink, handle));
  }

  let mut enriched = IndexMap::with_capacity(spawned.len());
  for (key, autolink, handle) in spawned {
    let issue = match handle.await {
      Ok(Ok(issue)) => {
        debug!(id = %autolink.id, found = issue.is_some(), "enrichment lookup resolved");
        EnrichmentState::Resolved(issue)
      }
      Ok(Err(e)) => {
        warn!(id = %autolink.id, error = %e, "enrichment lookup failed");
        EnrichmentState::Failed(e.to_string())
      }
      Err(e) => {
        warn!(id = %autolink.id, error = %e, "enrichment lookup task died");
        EnrichmentState::Failed(e.to_string())
      }
    };
    enriched.insert(key, MaybeEnrichedAutolink { issue, autolink });
  }

  enriched
}
