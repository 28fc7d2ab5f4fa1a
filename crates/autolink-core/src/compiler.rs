use crate::error::AutolinkError;
use autolink_types::{OutputFormat, StaticReference};
use autolink_utils::{encode_html_weak, escape_markdown};
use dashmap::DashMap;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Branch-name matcher plus how its trailing boundary behaves.
pub struct BranchPattern {
  pub regex: Regex,
  /// The prefixed pattern family expresses the trailing separator as a
  /// lookahead. The regex crate has no lookaround, so the separator is a
  /// captured group instead and the scanner resumes the search at the end of
  /// the identifier rather than the end of the whole match.
  pub trailing_is_lookahead: bool,
}

/// Matchers compiled for one (reference, format) pair.
pub struct CompiledMatcher {
  /// Matches `prefix` + identifier body at a word-ish boundary in free text.
  pub message: Regex,
  /// Present for plaintext only; matches identifiers inside branch chunks.
  pub branch: Option<BranchPattern>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MatcherKey {
  prefix: String,
  alphanumeric: bool,
  ignore_case: bool,
  format: OutputFormat,
}

impl MatcherKey {
  fn new(reference: &StaticReference, format: OutputFormat) -> Self {
    Self {
      prefix: reference.prefix.clone(),
      alphanumeric: reference.alphanumeric,
      ignore_case: reference.ignore_case,
      format,
    }
  }
}

/// Memoization table for compiled matchers, keyed by the full compilation
/// inputs rather than by descriptor identity, so shared or re-created
/// references reuse the same compiled regexes.
///
/// Thread-safe: a concurrent first compile races benignly because both racers
/// produce equivalent matchers and the table is append-only.
#[derive(Clone, Default)]
pub struct MatcherCompiler {
  cache: Arc<DashMap<MatcherKey, Arc<CompiledMatcher>>>,
}

impl MatcherCompiler {
  pub fn new() -> Self {
    Self { cache: Arc::new(DashMap::new()) }
  }

  /// Get the matcher for `reference` in `format`, compiling it on first use.
  pub fn matcher(&self, reference: &StaticReference, format: OutputFormat) -> Result<Arc<CompiledMatcher>, AutolinkError> {
    let key = MatcherKey::new(reference, format);
    if let Some(matcher) = self.cache.get(&key) {
      debug!(prefix = %key.prefix, ?format, "matcher cache hit");
      return Ok(matcher.clone());
    }

    debug!(prefix = %key.prefix, ?format, "compiling matcher");
    // Compile into a local value first so a failure leaves no partial state
    let compiled = Arc::new(compile(reference, format)?);
    self.cache.insert(key, compiled.clone());
    Ok(compiled)
  }

  /// Number of cached (reference, format) entries, for diagnostics.
  pub fn len(&self) -> usize {
    self.cache.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cache.is_empty()
  }
}

fn compile(reference: &StaticReference, format: OutputFormat) -> Result<CompiledMatcher, AutolinkError> {
  let body = if reference.alphanumeric { r"\w" } else { r"\d" };
  // Markdown/html inputs have already been markup-encoded, so the literal
  // prefix must be encoded the same way before being regex-escaped
  let prefix = match format {
    OutputFormat::Plaintext => regex::escape(&reference.prefix),
    OutputFormat::Html => regex::escape(&encode_html_weak(&reference.prefix)),
    OutputFormat::Markdown => regex::escape(&encode_html_weak(&escape_markdown(&reference.prefix))),
  };
  let flags = if reference.ignore_case { "(?i)" } else { "" };

  let pattern = format!(r"{flags}(^|\s|\(|\[|\{{)({prefix}({body}+))\b");
  let message = Regex::new(&pattern).map_err(|e| AutolinkError::InvalidPattern {
    prefix: reference.prefix.clone(),
    source: e,
  })?;

  let branch = if format == OutputFormat::Plaintext {
    Some(compile_branch(reference, body)?)
  } else {
    None
  };

  Ok(CompiledMatcher { message, branch })
}

fn compile_branch(reference: &StaticReference, body: &str) -> Result<BranchPattern, AutolinkError> {
  if reference.is_non_prefixed() {
    // Standalone numeric chunk, optionally with one dotted/hyphenated/
    // underscored sub-segment, bounded by path separators or string edges
    let regex = Regex::new(r"(?i)(?P<numberChunkBeginning>^|/|-|_)(?P<numberChunk>(?P<issueKeyNumber>\d+)(?:[-._]\d+)?)(?P<numberChunkEnding>$|/|-|_)")
      .map_err(|e| AutolinkError::InvalidPattern {
        prefix: reference.prefix.clone(),
        source: e,
      })?;
    return Ok(BranchPattern { regex, trailing_is_lookahead: false });
  }

  let prefix = regex::escape(&reference.prefix);
  let pattern = format!(r"(?i)(^|-|_|\.|/)(?P<prefix>{prefix})(?P<issueKeyNumber>{body}+)(?P<numberChunkEnding>$|-|_|\.|/)");
  let regex = Regex::new(&pattern).map_err(|e| AutolinkError::InvalidPattern {
    prefix: reference.prefix.clone(),
    source: e,
  })?;
  Ok(BranchPattern { regex, trailing_is_lookahead: true })
}
