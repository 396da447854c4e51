//! Small formatting helpers.

/// Plural suffix for a count.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format a count with its noun (`0 links`, `1 link`, `5 links`).
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
