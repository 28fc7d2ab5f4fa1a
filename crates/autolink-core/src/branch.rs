use crate::compiler::{BranchPattern, MatcherCompiler};
use crate::error::AutolinkError;
use crate::ranker::compare_autolinks;
use autolink_types::{Autolink, AutolinkKind, AutolinkMap, NUM_TOKEN, OutputFormat, Priority, RefSet, ReferenceScope, StaticReference};
use autolink_utils::slugify;
use regex::Regex;
use std::sync::OnceLock;
use tracing::instrument;

static RELEASE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn release_pattern() -> &'static Regex {
  RELEASE_PATTERN.get_or_init(|| Regex::new(r"^(v|ver?|versions?|releases?)([\d.-]+)?$").unwrap())
}

/// Scan a branch name for autolinks.
///
/// The returned map is keyed by substituted URL (identical identifiers can
/// surface from different chunks) and is sorted most-relevant-first by
/// [`compare_autolinks`].
#[instrument(skip_all, fields(branch = branch_name))]
pub fn get_branch_autolinks(branch_name: &str, refsets: &[RefSet], compiler: &MatcherCompiler) -> Result<AutolinkMap, AutolinkError> {
  let mut autolinks = AutolinkMap::new();

  for refset in refsets {
    for reference in &refset.references {
      let Some(r) = reference.as_static() else { continue };
      if r.kind == Some(AutolinkKind::PullRequest) || r.scope == Some(ReferenceScope::Commit) {
        continue;
      }

      let matcher = compiler.matcher(r, OutputFormat::Plaintext)?;
      let Some(pattern) = matcher.branch.as_ref() else { continue };

      // Non-prefixed numeric references need the more careful chunk-by-chunk
      // walk; everything else scans the whole name as one chunk
      let non_prefixed = r.is_non_prefixed();
      let chunks: Vec<&str> = if non_prefixed { branch_name.split('/').collect() } else { vec![branch_name] };

      let mut matched = false;
      for (chunk, chunk_index) in scannable_chunks(&chunks) {
        for m in branch_matches(pattern, chunk) {
          matched = true;
          add_match(r, refset, &m, chunk, chunk_index, non_prefixed, &mut autolinks);
        }
      }

      // Any identifier that also appears inside the reference's own title is a
      // false positive (e.g. a release title mentioning a version number)
      if matched
        && non_prefixed
        && let Some(title) = &r.title
      {
        let slug = slugify(title);
        for m in branch_matches(pattern, &slug) {
          autolinks.shift_remove(&r.url.replace(NUM_TOKEN, m.issue_key));
        }
      }
    }
  }

  autolinks.sort_by(|_, a, _, b| compare_autolinks(a, b));
  Ok(autolinks)
}

fn add_match(reference: &StaticReference, refset: &RefSet, m: &BranchMatch<'_>, chunk: &str, chunk_index: usize, non_prefixed: bool, autolinks: &mut AutolinkMap) {
  let issue_key = m.issue_key;

  // How close the match sits to either edge of its chunk; a number hugging an
  // edge is far more likely a deliberate issue reference than incidental digits
  let edge_distance = (m.start as i64).min(chunk.len() as i64 - m.start as i64 - m.number_chunk.len() as i64 - 1);

  let url = reference.url.replace(NUM_TOKEN, issue_key);

  // Same URL parsed twice (identical identifier in another chunk): keep the
  // earliest offset for display ordering, overwrite the rest
  let mut index = m.start;
  if let Some(existing) = autolinks.get(&url)
    && let Some(existing_index) = existing.index
  {
    index = index.min(existing_index);
  }

  let priority = non_prefixed.then(|| Priority::new(issue_key, edge_distance, m.number_chunk, chunk_index));

  autolinks.insert(
    url.clone(),
    Autolink {
      id: issue_key.to_string(),
      provider: refset.provider.clone(),
      index: Some(index),
      prefix: reference.prefix.clone(),
      url,
      alphanumeric: reference.alphanumeric,
      ignore_case: reference.ignore_case,
      title: reference.title.as_ref().map(|t| t.replace(NUM_TOKEN, issue_key)),
      description: reference.description.as_ref().map(|d| d.replace(NUM_TOKEN, issue_key)),
      kind: reference.kind,
      priority,
      tokenize: reference.tokenize.clone(),
    },
  );
}

/// Pair each scanned chunk with its scan-order index, dropping release/version
/// chunks. A bare release word (no trailing number) also consumes the chunk
/// after it, whose number is assumed to be a version rather than an issue id.
/// Consecutive bare release words do not stack, and skipped chunks consume no
/// index.
fn scannable_chunks<'a>(chunks: &[&'a str]) -> Vec<(&'a str, usize)> {
  let release = release_pattern();
  let mut scannable = Vec::with_capacity(chunks.len());
  let mut skip_next = false;
  let mut index = 0;

  for &chunk in chunks {
    if let Some(caps) = release.captures(chunk) {
      if caps.get(2).is_none() {
        skip_next = true;
      }
      continue;
    }
    if skip_next {
      skip_next = false;
      continue;
    }
    scannable.push((chunk, index));
    index += 1;
  }

  scannable
}

struct BranchMatch<'t> {
  /// Byte offset of the whole match (including its leading boundary) in the chunk.
  start: usize,
  issue_key: &'t str,
  number_chunk: &'t str,
}

/// All matches of a branch pattern over `text`.
///
/// When the pattern's trailing boundary stands in for a lookahead, the search
/// resumes at the end of the identifier so the consumed separator can still
/// begin the next match.
fn branch_matches<'t>(pattern: &BranchPattern, text: &'t str) -> Vec<BranchMatch<'t>> {
  let mut found = Vec::new();
  let mut at = 0;

  while at <= text.len() {
    let Some(caps) = pattern.regex.captures_at(text, at) else { break };
    let (Some(whole), Some(issue_key)) = (caps.get(0), caps.name("issueKeyNumber")) else { break };
    let number_chunk = caps.name("numberChunk").map_or(issue_key.as_str(), |m| m.as_str());

    found.push(BranchMatch {
      start: whole.start(),
      issue_key: issue_key.as_str(),
      number_chunk,
    });

    let resume = if pattern.trailing_is_lookahead { issue_key.end() } else { whole.end() };
    at = resume.max(at + 1);
  }

  found
}
