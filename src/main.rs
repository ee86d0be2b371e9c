//! # Interview Harvest
//!
//! Collects system design interview question titles for a list of companies
//! from search engines, discussion forums and repository search, merges them
//! with a canned per-company fallback list, and writes the result to a text
//! or JSON file.
//!
//! ## Usage
//!
//! ```sh
//! interview_harvest --profile basic -o system_design_questions.txt
//! ```
//!
//! ## Architecture
//!
//! For each company, strictly in sequence:
//! 1. **Queries**: Substitute the company into each source's query templates
//! 2. **Fetching**: One GET per query with rotated browser headers and a courtesy delay
//! 3. **Extraction**: Fixed CSS selectors or the repository-search JSON shape
//! 4. **Filtering**: Keyword match, optional length bounds, exact-string dedup
//! 5. **Aggregation**: Append the fallback list, then write the output once

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod fetch;
mod filter;
mod harvest;
mod models;
mod outputs;
mod query;
mod scrapers;
mod utils;

use cli::Cli;
use fetch::HttpFetcher;
use harvest::harvest_all;
use outputs::console::print_results;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("interview_harvest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(
        companies = ?config.companies,
        sources = config.sources.len(),
        output = %config.output.path,
        "Configuration resolved"
    );

    let fetcher = HttpFetcher::new()?;
    let results = harvest_all(&fetcher, &config).await;

    if results.failed_sources() > 0 {
        warn!(
            failed_sources = results.failed_sources(),
            "Some sources failed; their companies rely on fallback titles"
        );
    }

    if let Err(e) = outputs::write_results(&results, &config.output).await {
        error!(path = %config.output.path, error = %e, "Failed to write results");
        return Err(e);
    }

    if args.print {
        print_results(&results);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        companies = results.len(),
        titles = results.total_titles(),
        path = %config.output.path,
        "Execution complete"
    );

    Ok(())
}
