//! URL index: normalized old-site URL to article id.

use std::fmt;

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::normalize_url;

/// Mapping from normalized URL to the owning article's id.
pub type UrlIndex = FxHashMap<String, ArticleId>;

/// Stable article identifier, rendered into internal anchors.
///
/// Exports carry ids as strings or numbers; both render in their natural
/// form (`"shipping-faq"` stays `shipping-faq`, `42` becomes `42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    /// Convert an `id` field value. Non-scalar ids disqualify the record.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the URL index for a document.
///
/// Walks every node; any object carrying both `id` and `url` (with a string
/// `url` and a scalar `id`) is indexed under its normalized URL. Later
/// records overwrite earlier ones on duplicate URLs, in document order.
pub fn build_url_index(doc: &Value) -> UrlIndex {
    let mut index = UrlIndex::default();
    collect_urls(doc, &mut index);
    index
}

fn collect_urls(node: &Value, index: &mut UrlIndex) {
    match node {
        Value::Object(map) => {
            if let Some(id) = indexable_id(map)
                && let Some(url) = map.get("url").and_then(Value::as_str)
            {
                index.insert(normalize_url(url).to_string(), id);
            }
            for value in map.values() {
                collect_urls(value, index);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_urls(item, index);
            }
        }
        // Scalars terminate the walk
        _ => {}
    }
}

/// Id of a record that qualifies for indexing: both `id` and `url` present,
/// `url` a string, `id` a string or number.
pub(super) fn indexable_id(map: &serde_json::Map<String, Value>) -> Option<ArticleId> {
    match (map.get("id"), map.get("url")) {
        (Some(id), Some(Value::String(_))) => ArticleId::from_value(id),
        _ => None,
    }
}
