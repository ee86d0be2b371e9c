//! Output sinks for a finished harvest.
//!
//! # Submodules
//!
//! - [`text`]: Numbered plain-text blocks, one banner section per company
//! - [`json`]: Pretty-printed JSON object mapping company to its titles
//! - [`console`]: Formatted listing printed to stdout
//!
//! The file is written once, after every company has been harvested.

pub mod console;
pub mod json;
pub mod text;

use crate::config::{OutputConfig, OutputFormat};
use crate::models::ResultSet;
use std::error::Error;

/// Write `results` to the sink described by `output`.
pub async fn write_results(results: &ResultSet, output: &OutputConfig) -> Result<(), Box<dyn Error>> {
    match output.format {
        OutputFormat::Text => text::write_report(results, &output.path, &output.banner).await,
        OutputFormat::Json => json::write_results(results, &output.path).await,
    }
}
