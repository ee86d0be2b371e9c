//! The harvest pipeline: query → fetch → extract → filter → dedupe → merge.
//!
//! Everything runs sequentially. Each query is awaited, followed by the
//! source's courtesy delay, before the next one starts. A failing source never
//! aborts the company: its outcome is folded into zero titles and counted.

use crate::config::{HarvestConfig, LengthBounds, SourceConfig};
use crate::fetch::{FetchAsync, log_fetch_error, polite_delay, render_endpoint};
use crate::filter::{dedupe, filter_candidates};
use crate::models::{CompanyHarvest, ResultSet, SourceOutcome};
use crate::query::build_queries;
use crate::scrapers::Extractor;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

/// Run one query against one source.
///
/// # Arguments
///
/// * `fetcher` - HTTP seam used for the single GET
/// * `source` - Endpoint, keywords and result cap of the source
/// * `extractor` - The source's extractor, compiled once per harvest
/// * `query` - Rendered query string
/// * `bounds` - Optional length bounds applied after the keyword filter
///
/// # Returns
///
/// The [`SourceOutcome`] for this query. Errors never propagate.
#[instrument(level = "info", skip(fetcher, source, extractor, bounds), fields(source = %source.name))]
pub async fn query_source<F: FetchAsync>(
    fetcher: &F,
    source: &SourceConfig,
    extractor: &Extractor,
    query: &str,
    bounds: Option<&LengthBounds>,
) -> SourceOutcome {
    let url = match render_endpoint(&source.endpoint, query) {
        Ok(url) => url,
        Err(e) => {
            log_fetch_error(&source.name, query, &e);
            return SourceOutcome::Failed { error: e.to_string() };
        }
    };

    let response = match fetcher.fetch(&url).await {
        Ok(response) => response,
        Err(e) => {
            log_fetch_error(&source.name, query, &e);
            return SourceOutcome::Failed { error: e.to_string() };
        }
    };

    if !response.is_success() {
        debug!(
            status = response.status,
            body_preview = %truncate_for_log(&response.body, 200),
            "Non-success status; no titles"
        );
        return SourceOutcome::Rejected { status: response.status };
    }

    match extractor.extract(&response.body, source.max_results) {
        Ok(candidates) => {
            let found = candidates.len();
            let kept = filter_candidates(candidates, &source.keywords, bounds);
            debug!(found, kept = kept.len(), "Filtered candidates");
            SourceOutcome::Harvested(kept)
        }
        Err(e) => {
            log_fetch_error(&source.name, query, &e);
            SourceOutcome::Failed { error: e.to_string() }
        }
    }
}

/// Append the fallback list to the harvested titles and drop exact duplicates.
///
/// # Returns
///
/// `harvested` in order, followed by fallback titles not already present.
pub fn merge_fallback(harvested: &[String], fallback: &[String]) -> Vec<String> {
    dedupe(harvested.iter().chain(fallback).cloned())
}

/// Harvest every source for one company and merge its fallback list.
///
/// Each source's extractor is compiled once up front. A source whose
/// extractor does not compile counts one failure per query and is skipped.
///
/// # Arguments
///
/// * `fetcher` - HTTP seam shared across sources
/// * `config` - Sources, bounds and fallback table
/// * `company` - Company substituted into every query template
///
/// # Returns
///
/// The company's [`CompanyHarvest`], harvested titles first, then any
/// fallback titles not already present.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn harvest_company<F: FetchAsync>(
    fetcher: &F,
    config: &HarvestConfig,
    company: &str,
) -> CompanyHarvest {
    let bounds = config.length_bounds.as_ref();
    let mut outcomes: Vec<SourceOutcome> = Vec::new();
    let mut compiled: Vec<(&SourceConfig, Extractor, Vec<String>)> = Vec::new();
    for source in &config.sources {
        let queries = build_queries(&source.queries, company);
        match Extractor::compile(&source.extractor) {
            Ok(extractor) => compiled.push((source, extractor, queries)),
            Err(e) => {
                warn!(source = %source.name, error = %e, "Extractor unusable; skipping source");
                outcomes.extend(queries.iter().map(|_| SourceOutcome::Failed {
                    error: e.to_string(),
                }));
            }
        }
    }

    let jobs = compiled.iter().flat_map(|(source, extractor, queries)| {
        queries.iter().map(move |query| (*source, extractor, query))
    });
    let fetched: Vec<SourceOutcome> = stream::iter(jobs)
        .then(|(source, extractor, query)| async move {
            let outcome = query_source(fetcher, source, extractor, query, bounds).await;
            polite_delay(source.delay).await;
            outcome
        })
        .collect()
        .await;
    outcomes.extend(fetched);

    let mut harvest = CompanyHarvest {
        company: company.to_string(),
        queries: outcomes.len(),
        ..Default::default()
    };
    let mut candidates = Vec::new();
    for outcome in outcomes {
        match &outcome {
            SourceOutcome::Rejected { status } => {
                harvest.rejected += 1;
                debug!(status = *status, "Counted rejected query");
            }
            SourceOutcome::Failed { error } => {
                harvest.failed += 1;
                debug!(%error, "Counted failed query");
            }
            SourceOutcome::Harvested(_) => {}
        }
        candidates.extend(outcome.into_titles());
    }
    harvest.harvested = dedupe(candidates);

    let fallback = config.fallback_for(company);
    harvest.titles = merge_fallback(&harvest.harvested, fallback);
    harvest.fallback_added = harvest.titles.len() - harvest.harvested.len();

    info!(
        harvested = harvest.harvested.len(),
        fallback_added = harvest.fallback_added,
        total = harvest.titles.len(),
        failed = harvest.failed,
        rejected = harvest.rejected,
        "Harvested company"
    );
    harvest
}

/// Harvest every configured company in order.
///
/// # Arguments
///
/// * `fetcher` - HTTP seam shared across the run
/// * `config` - Validated harvest configuration
///
/// # Returns
///
/// One entry per configured company, in configuration order.
#[instrument(level = "info", skip_all, fields(companies = config.companies.len()))]
pub async fn harvest_all<F: FetchAsync>(fetcher: &F, config: &HarvestConfig) -> ResultSet {
    let mut results = ResultSet::default();
    for (i, company) in config.companies.iter().enumerate() {
        if i > 0 {
            polite_delay(config.company_delay).await;
        }
        results.push(harvest_company(fetcher, config, company).await);
    }

    info!(
        companies = results.len(),
        titles = results.total_titles(),
        failed_sources = results.failed_sources(),
        rejected_sources = results.rejected_sources(),
        "Harvest complete"
    );
    results
}
