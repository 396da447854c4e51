//! URL normalization for index keys.
//!
//! Old-site article URLs arrive with inconsistent trailing slashes and the
//! occasional stray whitespace. Both sides of a match (indexed `url` fields
//! and scanned `href` targets) go through the same normalization, so a
//! record exported as `https://old.site/p/` still matches a link written as
//! `https://old.site/p`.

/// Normalize a URL for use as an index key.
///
/// Trims surrounding whitespace, then strips all trailing `/` characters in
/// one pass. Idempotent.
#[inline]
pub fn normalize_url(raw: &str) -> &str {
    raw.trim().trim_end_matches('/')
}
