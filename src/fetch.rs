//! HTTP fetching with rotated browser headers.
//!
//! This module provides the single network seam of the harvester:
//! - [`FetchAsync`]: Core trait defining one async GET
//! - [`HttpFetcher`]: `reqwest`-backed implementation with a fixed timeout
//!   and a browser header bundle picked at random per request
//!
//! No retry: a failed request is reported once and the harvester moves on
//! to the next query.

use crate::config::{DelayRange, QUERY_PLACEHOLDER, REQUEST_TIMEOUT};
use crate::models::FetchResponse;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};
use url::Url;

/// Browser identities rotated across requests.
pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Trait for a single async GET.
///
/// Implementors return the status and body of the response, or an error if
/// the request never completed. Non-2xx statuses are not errors.
pub trait FetchAsync {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError>;
}

/// Pick a browser header bundle uniformly at random.
pub fn browser_headers() -> HeaderMap {
    let user_agent = USER_AGENTS.choose(&mut rng()).copied().unwrap_or(USER_AGENTS[0]);

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(user_agent));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Substitute the percent-encoded query into an endpoint template.
pub fn render_endpoint(template: &str, query: &str) -> Result<Url, FetchError> {
    let encoded = urlencoding::encode(query);
    Ok(Url::parse(&template.replace(QUERY_PLACEHOLDER, &encoded))?)
}

/// `reqwest`-backed fetcher shared across every source of a run.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the per-request timeout applied.
    ///
    /// # Returns
    ///
    /// The fetcher, or [`FetchError::Transport`] if the TLS backend fails to
    /// initialize.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

impl FetchAsync for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .headers(browser_headers())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched"
        );
        Ok(FetchResponse { status, body })
    }
}

/// Sleep for a random duration within `range`.
///
/// # Arguments
///
/// * `range` - Inclusive millisecond bounds; a zero range returns at once
pub async fn polite_delay(range: DelayRange) {
    if range.is_zero() {
        return;
    }
    let ms = rng().random_range(range.min_ms..=range.max_ms);
    debug!(delay_ms = ms, "Sleeping between requests");
    sleep(Duration::from_millis(ms)).await;
}

/// Log a skipped query.
pub fn log_fetch_error(source: &str, query: &str, error: &FetchError) {
    warn!(%source, %query, error = %error, "Query failed; skipping");
}
