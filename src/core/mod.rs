//! Core pipeline: load, index, rewrite, save.

mod document;
mod index;
mod rewrite;
mod url;

pub use document::{DocumentError, load_document, write_document};
pub use index::{ArticleId, UrlIndex, build_url_index};
pub use rewrite::{ScanReport, rewrite_links, scan_links};
pub use url::normalize_url;
