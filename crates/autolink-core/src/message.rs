use crate::compiler::MatcherCompiler;
use crate::error::AutolinkError;
use autolink_types::{Autolink, AutolinkMap, AutolinkReference, NUM_TOKEN, OutputFormat, ProviderReference, RefSet, ReferenceScope, StaticReference};
use tracing::instrument;

/// Scan a commit message for autolinks.
///
/// Returns the unsorted identifier-keyed map; the last-found match for an
/// identifier wins, within a reference and across references alike.
#[instrument(skip_all, fields(message_len = message.len()))]
pub fn get_autolinks(message: &str, refsets: &[RefSet], compiler: &MatcherCompiler) -> Result<AutolinkMap, AutolinkError> {
  let mut autolinks = AutolinkMap::new();

  for refset in refsets {
    for reference in &refset.references {
      match reference {
        AutolinkReference::Dynamic(dynamic) => {
          (dynamic.parse)(message, &mut autolinks).map_err(AutolinkError::Parse)?;
        }
        AutolinkReference::Static(static_ref) => {
          if static_ref.scope == Some(ReferenceScope::Branch) {
            continue;
          }
          scan_with(static_ref, refset.provider.as_ref(), message, compiler, &mut autolinks)?;
        }
      }
    }
  }

  Ok(autolinks)
}

fn scan_with(
  reference: &StaticReference,
  provider: Option<&ProviderReference>,
  message: &str,
  compiler: &MatcherCompiler,
  autolinks: &mut AutolinkMap,
) -> Result<(), AutolinkError> {
  let matcher = compiler.matcher(reference, OutputFormat::Plaintext)?;

  for caps in matcher.message.captures_iter(message) {
    // group 1 is the leading boundary, group 2 prefix+id, group 3 the id
    let (Some(whole), Some(id)) = (caps.get(0), caps.get(3)) else { continue };
    let num = id.as_str();

    autolinks.insert(
      num.to_string(),
      Autolink {
        id: num.to_string(),
        provider: provider.cloned(),
        index: Some(whole.start()),
        prefix: reference.prefix.clone(),
        url: reference.url.replace(NUM_TOKEN, num),
        alphanumeric: reference.alphanumeric,
        ignore_case: reference.ignore_case,
        title: reference.title.as_ref().map(|t| t.replace(NUM_TOKEN, num)),
        description: reference.description.as_ref().map(|d| d.replace(NUM_TOKEN, num)),
        kind: reference.kind,
        priority: None,
        tokenize: reference.tokenize.clone(),
      },
    );
  }

  Ok(())
}
