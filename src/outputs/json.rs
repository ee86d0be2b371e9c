//! JSON output.
//!
//! The root is an object mapping each company, in harvest order, to its final
//! title list:
//!
//! ```json
//! {
//!   "Atlassian": [
//!     "Design a project management system like Jira"
//!   ]
//! }
//! ```

use crate::models::ResultSet;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `results` as two-space-indented JSON and write it to `path`.
///
/// # Arguments
///
/// * `results` - Harvested companies, keyed in harvest order
/// * `path` - Destination file, overwritten if present
///
/// # Returns
///
/// `Ok(())` once the file is written, or the serialization or I/O error.
#[instrument(level = "info", skip(results), fields(companies = results.len()))]
pub async fn write_results(results: &ResultSet, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(results)?;

    if let Err(e) = ensure_parent_dir(path).await {
        error!(path, error = %e, "Failed to create JSON dir");
        return Err(e);
    }

    info!(path, "Writing JSON");
    fs::write(path, json).await?;
    info!(path, titles = results.total_titles(), "Wrote JSON results");

    Ok(())
}
