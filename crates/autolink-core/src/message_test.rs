use crate::compiler::MatcherCompiler;
use crate::error::AutolinkError;
use crate::message::get_autolinks;
use autolink_types::{Autolink, AutolinkReference, DynamicReference, RefSet, ReferenceScope, StaticReference};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_log::test;

fn static_ref(prefix: &str, url: &str) -> StaticReference {
  StaticReference {
    prefix: prefix.to_string(),
    url: url.to_string(),
    alphanumeric: false,
    ignore_case: true,
    title: None,
    description: None,
    kind: None,
    scope: None,
    tokenize: None,
  }
}

fn refset(references: Vec<AutolinkReference>) -> RefSet {
  RefSet { provider: None, references }
}

#[test]
fn test_duplicate_identifiers_collapse_to_one_entry() {
  let compiler = MatcherCompiler::new();
  let refsets = vec![refset(vec![AutolinkReference::Static(static_ref("#", "https://x/<num>"))])];

  let autolinks = get_autolinks("Fixes #1234 and #1234", &refsets, &compiler).unwrap();

  assert_eq!(autolinks.len(), 1);
  let link = &autolinks["1234"];
  assert_eq!(link.id, "1234");
  assert_eq!(link.url, "https://x/1234");
}

#[test]
fn test_index_is_the_match_offset() {
  let compiler = MatcherCompiler::new();
  let refsets = vec![refset(vec![AutolinkReference::Static(static_ref("#", "https://x/<num>"))])];

  // the match starts at the leading boundary character
  let autolinks = get_autolinks("Fixes #1234", &refsets, &compiler).unwrap();
  assert_eq!(autolinks["1234"].index, Some(5));

  let autolinks = get_autolinks("#7 first", &refsets, &compiler).unwrap();
  assert_eq!(autolinks["7"].index, Some(0));
}

#[test]
fn test_numeric_refs_match_digits_only() {
  let compiler = MatcherCompiler::new();
  let refsets = vec![refset(vec![AutolinkReference::Static(static_ref("#", "https://x/<num>"))])];

  // "#12ab" has no word boundary after the digits, so it is not a reference
  let autolinks = get_autolinks("see #12ab but also #34", &refsets, &compiler).unwrap();
  assert_eq!(autolinks.len(), 1);
  assert!(autolinks["34"].id.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_alphanumeric_refs_match_word_characters() {
  let compiler = MatcherCompiler::new();
  let mut reference = static_ref("JIRA-", "https://jira/<num>");
  reference.alphanumeric = true;
  let refsets = vec![refset(vec![AutolinkReference::Static(reference)])];

  let autolinks = get_autolinks("resolves JIRA-AB_12 today", &refsets, &compiler).unwrap();
  assert_eq!(autolinks.len(), 1);
  assert_eq!(autolinks["AB_12"].id, "AB_12");
  assert_eq!(autolinks["AB_12"].url, "https://jira/AB_12");
}

#[test]
fn test_ignore_case_applies_to_prefix() {
  let compiler = MatcherCompiler::new();
  let mut insensitive = static_ref("GH-", "https://x/<num>");
  insensitive.ignore_case = true;
  let refsets = vec![refset(vec![AutolinkReference::Static(insensitive)])];
  let autolinks = get_autolinks("see gh-42", &refsets, &compiler).unwrap();
  assert_eq!(autolinks["42"].id, "42");

  let mut sensitive = static_ref("GH-", "https://x/<num>");
  sensitive.ignore_case = false;
  let refsets = vec![refset(vec![AutolinkReference::Static(sensitive)])];
  let autolinks = get_autolinks("see gh-42", &refsets, &compiler).unwrap();
  assert!(autolinks.is_empty());
}

#[test]
fn test_branch_scoped_refs_are_skipped() {
  let compiler = MatcherCompiler::new();
  let mut reference = static_ref("#", "https://x/<num>");
  reference.scope = Some(ReferenceScope::Branch);
  let refsets = vec![refset(vec![AutolinkReference::Static(reference)])];

  let autolinks = get_autolinks("Fixes #1234", &refsets, &compiler).unwrap();
  assert!(autolinks.is_empty());
}

#[test]
fn test_later_reference_overwrites_same_identifier() {
  let compiler = MatcherCompiler::new();
  let refsets = vec![refset(vec![
    AutolinkReference::Static(static_ref("#", "https://first/<num>")),
    AutolinkReference::Static(static_ref("#", "https://second/<num>")),
  ])];

  let autolinks = get_autolinks("Fixes #9", &refsets, &compiler).unwrap();
  assert_eq!(autolinks.len(), 1);
  assert_eq!(autolinks["9"].url, "https://second/9");
}

#[test]
fn test_templates_are_fully_substituted() {
  let compiler = MatcherCompiler::new();
  let mut reference = static_ref("#", "https://x/<num>");
  reference.title = Some("Issue #<num>".to_string());
  reference.description = Some("Open <num> in the tracker".to_string());
  let refsets = vec![refset(vec![AutolinkReference::Static(reference)])];

  let autolinks = get_autolinks("Fixes #88", &refsets, &compiler).unwrap();
  let link = &autolinks["88"];
  assert_eq!(link.title.as_deref(), Some("Issue #88"));
  assert_eq!(link.description.as_deref(), Some("Open 88 in the tracker"));
  assert!(!link.url.contains("<num>"));
}

#[test]
fn test_dynamic_reference_parse_is_invoked() {
  let compiler = MatcherCompiler::new();
  let dynamic = DynamicReference {
    parse: Arc::new(|message, autolinks| {
      if message.contains("KEY-1") {
        autolinks.insert(
          "KEY-1".to_string(),
          Autolink {
            id: "KEY-1".to_string(),
            provider: None,
            index: None,
            prefix: String::new(),
            url: "https://tracker/KEY-1".to_string(),
            alphanumeric: true,
            ignore_case: false,
            title: None,
            description: None,
            kind: None,
            priority: None,
            tokenize: None,
          },
        );
      }
      Ok(())
    }),
    tokenize: None,
  };
  let refsets = vec![refset(vec![AutolinkReference::Dynamic(dynamic)])];

  let autolinks = get_autolinks("work on KEY-1", &refsets, &compiler).unwrap();
  assert_eq!(autolinks["KEY-1"].url, "https://tracker/KEY-1");
}

#[test]
fn test_dynamic_parse_error_aborts_the_scan() {
  let compiler = MatcherCompiler::new();
  let dynamic = DynamicReference {
    parse: Arc::new(|_, _| Err(anyhow::anyhow!("bad parser"))),
    tokenize: None,
  };
  // a static ref after the failing parser never runs
  let refsets = vec![refset(vec![
    AutolinkReference::Dynamic(dynamic),
    AutolinkReference::Static(static_ref("#", "https://x/<num>")),
  ])];

  let err = get_autolinks("Fixes #1", &refsets, &compiler).unwrap_err();
  assert!(matches!(err, AutolinkError::Parse(_)));
}

#[test]
fn test_last_match_wins_within_one_reference() {
  let compiler = MatcherCompiler::new();
  let refsets = vec![refset(vec![AutolinkReference::Static(static_ref("#", "https://x/<num>"))])];

  let autolinks = get_autolinks("#5 then again #5 later", &refsets, &compiler).unwrap();
  assert_eq!(autolinks.len(), 1);
  // the later occurrence's offset is the one recorded
  assert_eq!(autolinks["5"].index, Some(13));
}
