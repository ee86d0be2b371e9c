//! Candidate title extraction for each kind of source.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | DuckDuckGo HTML | [`html`] | CSS selector `a.result__a` | Optional `site:` scoping in the query |
//! | LeetCode Discuss | [`html`] | `div.topic-title` then `a` | Interview-question board search |
//! | GitHub | [`repository`] | Repository search JSON API | Description must mention the required phrase |
//!
//! Every extractor returns titles in document order, capped at the source's
//! `max_results`. Keyword and length filtering happen later in [`crate::filter`].

pub mod html;
pub mod repository;

use crate::config::{ConfigError, ExtractorKind};
use crate::fetch::FetchError;
use html::HtmlSelectors;

/// A source's extractor with its selectors already parsed.
#[derive(Debug, Clone)]
pub enum Extractor {
    Html(HtmlSelectors),
    RepositoryJson { required_phrase: String },
}

impl Extractor {
    /// Compile an [`ExtractorKind`] once, before any request is sent.
    ///
    /// # Returns
    ///
    /// The ready extractor, or [`ConfigError::Invalid`] if a CSS selector
    /// does not parse.
    pub fn compile(kind: &ExtractorKind) -> Result<Self, ConfigError> {
        match kind {
            ExtractorKind::Html { item, link } => {
                Ok(Extractor::Html(HtmlSelectors::compile(item, link.as_deref())?))
            }
            ExtractorKind::RepositoryJson { required_phrase } => Ok(Extractor::RepositoryJson {
                required_phrase: required_phrase.clone(),
            }),
        }
    }

    /// Pull candidate titles out of a response body.
    ///
    /// # Arguments
    ///
    /// * `body` - Response body of a 2xx answer
    /// * `max_results` - Cap on the number of matches considered
    ///
    /// # Returns
    ///
    /// Candidate titles in document order. Only the JSON extractor can fail,
    /// with [`FetchError::Decode`].
    pub fn extract(&self, body: &str, max_results: usize) -> Result<Vec<String>, FetchError> {
        match self {
            Extractor::Html(selectors) => Ok(html::extract_titles(body, selectors, max_results)),
            Extractor::RepositoryJson { required_phrase } => {
                repository::extract_titles(body, required_phrase, max_results)
            }
        }
    }
}
