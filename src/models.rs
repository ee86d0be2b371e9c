//! Data models for harvested interview questions.
//!
//! This module defines the core data structures used throughout the application:
//! - [`FetchResponse`]: Raw payload returned for one query
//! - [`SourceOutcome`]: Explicit result of querying one source once
//! - [`CompanyHarvest`]: Harvested and final titles for one company
//! - [`ResultSet`]: Ordered collection of every company's harvest for a run

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A raw response fetched for a single query.
///
/// The body is kept as text; the extractor decides whether it is HTML or JSON.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded response body.
    pub body: String,
}

impl FetchResponse {
    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// What one query against one source produced.
///
/// Rejected and failed outcomes both contribute zero titles; they are only
/// kept apart so the run can report how many sources misbehaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source answered and these titles survived extraction and filtering.
    Harvested(Vec<String>),
    /// The source answered with a non-2xx status.
    Rejected { status: u16 },
    /// Transport, timeout or decode failure.
    Failed { error: String },
}

impl SourceOutcome {
    /// Titles carried by this outcome (empty unless harvested).
    pub fn into_titles(self) -> Vec<String> {
        match self {
            SourceOutcome::Harvested(titles) => titles,
            SourceOutcome::Rejected { .. } | SourceOutcome::Failed { .. } => Vec::new(),
        }
    }
}

/// The harvest for a single company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyHarvest {
    /// Company name as supplied.
    pub company: String,
    /// Titles harvested from the network, deduplicated, before the fallback merge.
    pub harvested: Vec<String>,
    /// Final titles after merging the fallback list.
    pub titles: Vec<String>,
    /// Number of queries issued across all sources.
    pub queries: usize,
    /// Queries that failed with a transport or decode error.
    pub failed: usize,
    /// Queries answered with a non-2xx status.
    pub rejected: usize,
    /// Fallback titles that were not already harvested.
    pub fallback_added: usize,
}

/// Every company's harvest for one run, in input order.
///
/// Serializes as a JSON object mapping company name to its final title list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub companies: Vec<CompanyHarvest>,
}

impl ResultSet {
    pub fn push(&mut self, harvest: CompanyHarvest) {
        self.companies.push(harvest);
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Total failed queries across all companies.
    pub fn failed_sources(&self) -> usize {
        self.companies.iter().map(|c| c.failed).sum()
    }

    /// Total rejected queries across all companies.
    pub fn rejected_sources(&self) -> usize {
        self.companies.iter().map(|c| c.rejected).sum()
    }

    /// Total final titles across all companies.
    pub fn total_titles(&self) -> usize {
        self.companies.iter().map(|c| c.titles.len()).sum()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.companies.len()))?;
        for harvest in &self.companies {
            map.serialize_entry(&harvest.company, &harvest.titles)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harvest(company: &str, titles: &[&str]) -> CompanyHarvest {
        CompanyHarvest {
            company: company.to_string(),
            titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_result_set_serializes_in_insertion_order() {
        let mut set = ResultSet::default();
        set.push(harvest("PayPal", &["Design a digital wallet"]));
        set.push(harvest("Atlassian", &["Design a notification system"]));

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"{"PayPal":["Design a digital wallet"],"Atlassian":["Design a notification system"]}"#
        );
    }

    #[test]
    fn test_outcome_titles() {
        let ok = SourceOutcome::Harvested(vec!["a".into()]);
        assert_eq!(ok.into_titles(), vec!["a".to_string()]);
        assert!(SourceOutcome::Rejected { status: 429 }.into_titles().is_empty());
        assert!(
            SourceOutcome::Failed { error: "timeout".into() }
                .into_titles()
                .is_empty()
        );
    }

    #[test]
    fn test_fetch_response_success_range() {
        let ok = FetchResponse { status: 204, body: String::new() };
        let redirect = FetchResponse { status: 302, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_result_set_counters() {
        let mut set = ResultSet::default();
        let mut a = harvest("Atlassian", &["x", "y"]);
        a.failed = 2;
        a.rejected = 1;
        let mut b = harvest("PayPal", &["z"]);
        b.failed = 1;
        set.push(a);
        set.push(b);

        assert_eq!(set.failed_sources(), 3);
        assert_eq!(set.rejected_sources(), 1);
        assert_eq!(set.total_titles(), 3);
    }
}
