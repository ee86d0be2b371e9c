//! Repository search API extraction.
//!
//! The repository host answers with `{"items": [{"name", "description", ...}]}`.
//! Each of the first few repositories becomes a `"name: description"` title
//! when its description mentions the required phrase.

use crate::fetch::FetchError;
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct RepositorySearch {
    #[serde(default)]
    items: Option<Vec<Repository>>,
}

/// Every field is optional; `null` and missing are treated alike.
#[derive(Debug, Deserialize)]
struct Repository {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Turn a repository search response into `"name: description"` titles.
///
/// # Arguments
///
/// * `body` - Raw JSON response body
/// * `required_phrase` - Phrase the description must contain (case-folded)
/// * `max_results` - Only the first `max_results` repositories are considered
///
/// # Returns
///
/// Titles in response order, or [`FetchError::Decode`] if the body is not
/// valid JSON of the expected shape. A missing or `null` `items` array
/// yields no titles.
#[instrument(level = "debug", skip(body), fields(bytes = body.len()))]
pub fn extract_titles(
    body: &str,
    required_phrase: &str,
    max_results: usize,
) -> Result<Vec<String>, FetchError> {
    let search: RepositorySearch =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    let phrase = required_phrase.to_lowercase();

    let titles: Vec<String> = search
        .items
        .unwrap_or_default()
        .into_iter()
        .take(max_results)
        .filter_map(|repo| {
            let description = repo.description.filter(|d| !d.is_empty())?;
            description
                .to_lowercase()
                .contains(&phrase)
                .then(|| format!("{}: {}", repo.name.unwrap_or_default(), description))
        })
        .collect();

    debug!(count = titles.len(), "Extracted repository titles");
    Ok(titles)
}
