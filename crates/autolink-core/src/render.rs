use crate::compiler::MatcherCompiler;
use crate::error::AutolinkError;
use autolink_types::{AutolinkReference, EnrichmentState, IssueOrPullRequestState, MaybeEnrichedAutolink, NUM_TOKEN, OutputFormat, RefSet, ReferenceScope, StaticReference};
use autolink_utils::encode_html_weak;
use indexmap::IndexMap;
use regex::Captures;
use std::collections::HashMap;

/// Replace every recognized identifier in `text` with a formatted link.
///
/// References carrying a tokenize function delegate to it; static references
/// without one fall back to the default prefix/url substitution over the
/// per-format compiled matcher. Matches are first replaced with opaque
/// placeholder tokens and the real link text is substituted once at the end,
/// so output emitted for one reference is never re-matched by a later one.
/// Plaintext output is returned unchanged by the default substitution.
/// Enrichment records, when supplied, refine link titles for resolved
/// entries; pending and failed lookups fall back to the template title.
pub fn render_autolinks(
  text: &str,
  format: OutputFormat,
  refsets: &[RefSet],
  compiler: &MatcherCompiler,
  enriched: Option<&IndexMap<String, MaybeEnrichedAutolink>>,
) -> Result<String, AutolinkError> {
  let mut rendered = text.to_string();
  let mut token_mapping: HashMap<String, String> = HashMap::new();

  for refset in refsets {
    for reference in &refset.references {
      match reference {
        AutolinkReference::Dynamic(dynamic) => {
          if let Some(tokenize) = &dynamic.tokenize {
            rendered = tokenize(&rendered, format, &mut token_mapping, enriched, None, None);
          }
        }
        AutolinkReference::Static(static_ref) => {
          if static_ref.scope == Some(ReferenceScope::Branch) {
            continue;
          }
          if let Some(tokenize) = &static_ref.tokenize {
            rendered = tokenize(&rendered, format, &mut token_mapping, enriched, None, None);
            continue;
          }
          if format == OutputFormat::Plaintext {
            continue;
          }
          let matcher = compiler.matcher(static_ref, format)?;
          let replaced = matcher
            .message
            .replace_all(&rendered, |caps: &Captures<'_>| {
              let boundary = &caps[1];
              let link = substitute(static_ref, format, caps, enriched);
              // NUL delimiters keep the token out of reach of every matcher:
              // no boundary class contains it, so later passes skip the token
              let token = format!("\u{0}{}\u{0}", token_mapping.len());
              token_mapping.insert(token.clone(), link);
              format!("{boundary}{token}")
            })
            .into_owned();
          rendered = replaced;
        }
      }
    }
  }

  for (token, link) in &token_mapping {
    rendered = rendered.replace(token, link);
  }

  Ok(rendered)
}

fn substitute(reference: &StaticReference, format: OutputFormat, caps: &Captures<'_>, enriched: Option<&IndexMap<String, MaybeEnrichedAutolink>>) -> String {
  let label = &caps[2];
  let id = &caps[3];
  let url = reference.url.replace(NUM_TOKEN, id);
  let title = link_title(reference, id, enriched);

  match format {
    OutputFormat::Markdown => match title {
      Some(title) => format!("[{label}]({url} \"{title}\")"),
      None => format!("[{label}]({url})"),
    },
    OutputFormat::Html => match title {
      Some(title) => format!("<a href=\"{url}\" title=\"{}\">{label}</a>", encode_html_weak(&title)),
      None => format!("<a href=\"{url}\">{label}</a>"),
    },
    OutputFormat::Plaintext => label.to_string(),
  }
}

fn link_title(reference: &StaticReference, id: &str, enriched: Option<&IndexMap<String, MaybeEnrichedAutolink>>) -> Option<String> {
  let template_title = reference.title.as_ref().map(|t| t.replace(NUM_TOKEN, id));

  let Some(enriched) = enriched else { return template_title };
  let Some(entry) = enriched.values().find(|e| e.autolink.id == id) else {
    return template_title;
  };

  match &entry.issue {
    EnrichmentState::Resolved(Some(issue)) => {
      let marker = match issue.state {
        IssueOrPullRequestState::Merged => " (merged)",
        _ if issue.closed => " (closed)",
        _ => "",
      };
      Some(format!("{}{marker}", issue.title))
    }
    // unresolved or failed lookups fall back to the template title
    EnrichmentState::Pending | EnrichmentState::Failed(_) | EnrichmentState::Resolved(None) => template_title,
  }
}
