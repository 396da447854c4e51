//! Link rewriting over `content` fields.
//!
//! The matcher is a plain pattern over `href="..."` / `href='...'`
//! substrings, not an HTML parse. Unquoted values, `HREF=` case variants
//! and attributes split across lines do not match; unmatched text stays
//! untouched byte for byte.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use serde_json::Value;

use super::index::indexable_id;
use super::{UrlIndex, normalize_url};
use crate::debug;

/// Quoted href attribute. The quote characters are not required to pair;
/// `[^"']` keeps the captured target from crossing either quote kind.
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href=["']([^"']+)["']"#).unwrap());

/// Rewrite every indexed link under a `content` key, in place.
///
/// Returns the number of attribute replacements performed across the whole
/// document. Content strings without a single indexed match keep their
/// original value.
pub fn rewrite_links(doc: &mut Value, index: &UrlIndex) -> usize {
    let mut fixed = 0;
    rewrite_node(doc, index, &mut fixed);
    fixed
}

fn rewrite_node(node: &mut Value, index: &UrlIndex, fixed: &mut usize) {
    match node {
        Value::Object(map) => {
            if let Some(Value::String(content)) = map.get_mut("content")
                && let Some((rewritten, count)) = rewrite_content(content, index)
            {
                *content = rewritten;
                *fixed += count;
            }
            for value in map.values_mut() {
                rewrite_node(value, index, fixed);
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_node(item, index, fixed);
            }
        }
        _ => {}
    }
}

/// Rewrite one content string, left to right in a single pass.
///
/// Returns `None` when nothing matched the index, so the caller leaves the
/// original string in place.
fn rewrite_content(content: &str, index: &UrlIndex) -> Option<(String, usize)> {
    let mut count = 0;
    let rewritten = HREF_RE.replace_all(content, |caps: &Captures| {
        let target = normalize_url(&caps[1]);
        match index.get(target) {
            Some(id) => {
                count += 1;
                debug!("fix"; "{} -> #internal-{}", target, id);
                format!(r##"href="#internal-{id}" data-internal="true""##)
            }
            None => caps[0].to_string(),
        }
    });
    (count > 0).then(|| (rewritten.into_owned(), count))
}

// ============================================================================
// Read-only scan (check command)
// ============================================================================

/// Scan statistics for a document, produced without mutating it.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Objects visited.
    pub records: usize,
    /// Records carrying both `id` and a usable `url`.
    pub indexed: usize,
    /// String `content` fields scanned.
    pub content_fields: usize,
    /// href matches whose normalized target is in the index. Equals the
    /// count a rewrite pass would report.
    pub resolved: usize,
    /// Normalized http/https targets missing from the index, with
    /// occurrence counts. Fragments and relative paths are not candidates
    /// for a missed article mapping and are not collected.
    pub unresolved: FxHashMap<String, usize>,
}

impl ScanReport {
    /// Total occurrences of unresolved web links.
    pub fn unresolved_total(&self) -> usize {
        self.unresolved.values().sum()
    }
}

/// Scan a document against an index without touching it.
pub fn scan_links(doc: &Value, index: &UrlIndex) -> ScanReport {
    let mut report = ScanReport::default();
    scan_node(doc, index, &mut report);
    report
}

fn scan_node(node: &Value, index: &UrlIndex, report: &mut ScanReport) {
    match node {
        Value::Object(map) => {
            report.records += 1;
            if indexable_id(map).is_some() {
                report.indexed += 1;
            }
            if let Some(Value::String(content)) = map.get("content") {
                report.content_fields += 1;
                scan_content(content, index, report);
            }
            for value in map.values() {
                scan_node(value, index, report);
            }
        }
        Value::Array(items) => {
            for item in items {
                scan_node(item, index, report);
            }
        }
        _ => {}
    }
}

fn scan_content(content: &str, index: &UrlIndex, report: &mut ScanReport) {
    for caps in HREF_RE.captures_iter(content) {
        let target = normalize_url(&caps[1]);
        if index.contains_key(target) {
            report.resolved += 1;
        } else if is_web_link(target) {
            *report.unresolved.entry(target.to_string()).or_default() += 1;
        }
    }
}

/// Only absolute web links can be missed old-site articles.
#[inline]
fn is_web_link(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}
