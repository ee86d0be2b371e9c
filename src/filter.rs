//! Keyword filtering, length bounds and exact-string deduplication.
//!
//! Deduplication compares strings exactly. Titles differing only in case or
//! punctuation are kept as separate entries.

use crate::config::LengthBounds;
use itertools::Itertools;

/// `true` when the case-folded title contains at least one case-folded keyword.
pub fn matches_keywords(title: &str, keywords: &[String]) -> bool {
    let folded = title.to_lowercase();
    keywords
        .iter()
        .any(|keyword| folded.contains(&keyword.to_lowercase()))
}

/// `true` when the trimmed character count lies strictly inside `bounds`.
pub fn within_bounds(title: &str, bounds: &LengthBounds) -> bool {
    let len = title.trim().chars().count();
    bounds.min < len && len < bounds.max
}

/// Keep the candidates that pass the keyword filter and, if given, the length bounds.
///
/// # Arguments
///
/// * `candidates` - Extracted titles in document order
/// * `keywords` - Source keywords; at least one must appear
/// * `bounds` - Optional exclusive character-count bounds
///
/// # Returns
///
/// The surviving titles, order preserved.
pub fn filter_candidates(
    candidates: Vec<String>,
    keywords: &[String],
    bounds: Option<&LengthBounds>,
) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|title| matches_keywords(title, keywords))
        .filter(|title| bounds.is_none_or(|b| within_bounds(title, b)))
        .collect()
}

/// Drop exact duplicates, keeping the first occurrence.
pub fn dedupe(titles: impl IntoIterator<Item = String>) -> Vec<String> {
    titles.into_iter().unique().collect()
}
