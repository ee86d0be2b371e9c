//! Plain-text report output.
//!
//! Each company gets a banner section followed by its numbered titles:
//!
//! ```text
//!
//! ============================================================
//! PAYPAL SYSTEM DESIGN QUESTIONS
//! ============================================================
//! 1. Design a payment processing system
//! 2. Design a fraud detection system
//! ```

use crate::models::ResultSet;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::fmt::Write;
use tokio::fs;
use tracing::{info, instrument};

const RULE_WIDTH: usize = 60;

/// Render every company's titles as banner sections with numbered lines.
///
/// # Arguments
///
/// * `results` - Harvested companies, rendered in run order
/// * `banner` - Text placed after the upper-cased company name
///
/// # Returns
///
/// The whole report. A company with no titles still gets its banner.
pub fn render_report(results: &ResultSet, banner: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    for harvest in &results.companies {
        writeln!(out).unwrap();
        writeln!(out, "{rule}").unwrap();
        writeln!(out, "{} {}", harvest.company.to_uppercase(), banner).unwrap();
        writeln!(out, "{rule}").unwrap();
        for (i, title) in harvest.titles.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, title).unwrap();
        }
    }
    out
}

/// Write the text report to `path`, creating its directory if needed.
///
/// # Arguments
///
/// * `results` - Harvested companies
/// * `path` - Destination file, overwritten if present
/// * `banner` - Section banner, see [`render_report`]
///
/// # Returns
///
/// `Ok(())` once the file is written, or the I/O error.
#[instrument(level = "info", skip(results, banner), fields(companies = results.len()))]
pub async fn write_report(results: &ResultSet, path: &str, banner: &str) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path).await?;
    let report = render_report(results, banner);
    fs::write(path, report).await?;
    info!(path, titles = results.total_titles(), "Wrote text report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HarvestConfig, Profile};
    use crate::fetch::{FetchAsync, FetchError};
    use crate::harvest::harvest_all;
    use crate::models::{CompanyHarvest, FetchResponse};
    use url::Url;

    fn single(company: &str, titles: &[String]) -> ResultSet {
        ResultSet {
            companies: vec![CompanyHarvest {
                company: company.to_string(),
                titles: titles.to_vec(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_render_banner_and_numbering() {
        let results = single("PayPal", &["Design a digital wallet".to_string()]);
        let report = render_report(&results, "- ADDITIONAL QUESTIONS FOUND");
        let rule = "=".repeat(60);
        assert_eq!(
            report,
            format!("\n{rule}\nPAYPAL - ADDITIONAL QUESTIONS FOUND\n{rule}\n1. Design a digital wallet\n")
        );
    }

    #[test]
    fn test_render_empty_company_keeps_banner() {
        let results = single("Initech", &[]);
        let report = render_report(&results, "SYSTEM DESIGN QUESTIONS");
        assert!(report.contains("INITECH SYSTEM DESIGN QUESTIONS\n"));
        assert!(!report.contains("1. "));
    }

    /// Every request fails as a dropped connection would.
    struct UnreachableFetcher;

    impl FetchAsync for UnreachableFetcher {
        async fn fetch(&self, _url: &Url) -> Result<FetchResponse, FetchError> {
            Err(FetchError::Decode("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_zero_results_writes_fallback_verbatim() {
        let mut config = HarvestConfig::from_profile(Profile::Basic).without_delays();
        config.companies = vec!["Atlassian".to_string()];

        let results = harvest_all(&UnreachableFetcher, &config).await;
        assert_eq!(results.failed_sources(), 1);

        let path = std::env::temp_dir()
            .join(format!("harvest-text-{}", std::process::id()))
            .join("questions.txt");
        let path = path.to_string_lossy().into_owned();
        write_report(&results, &path, &config.output.banner).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let rule = "=".repeat(60);
        let expected = format!(
            "\n{rule}\nATLASSIAN SYSTEM DESIGN QUESTIONS\n{rule}\n\
             1. Design a collaborative document editing system like Confluence\n\
             2. Design a project management tool like Jira\n\
             3. Design a real-time chat system for teams\n\
             4. Design a file sharing platform\n\
             5. Design a notification system\n"
        );
        assert_eq!(written, expected);

        let numbered: Vec<&str> = written.lines().skip(4).collect();
        for (i, (line, fallback)) in numbered.iter().zip(config.fallback_for("Atlassian")).enumerate() {
            assert_eq!(*line, format!("{}. {}", i + 1, fallback));
        }
        assert_eq!(numbered.len(), 5);

        let _ = std::fs::remove_file(&path);
    }
}
