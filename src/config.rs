//! Harvest configuration: sources, keyword sets, delays and fallback lists.
//!
//! Every tunable the harvester uses lives in a [`HarvestConfig`]. Three
//! built-in [`Profile`]s cover the usual runs; a YAML file with the same
//! shape can replace them entirely.
//!
//! ```yaml
//! companies: [Atlassian, PayPal]
//! sources:
//!   - name: duckduckgo
//!     endpoint: "https://duckduckgo.com/html/?q={query}"
//!     queries: ["{company} system design interview questions"]
//!     extractor: { kind: html, item: "a.result__a" }
//!     keywords: [design, system, interview]
//!     max_results: 5
//!     delay: { min_ms: 2000, max_ms: 4000 }
//! output: { format: text, path: system_design_questions.txt, banner: SYSTEM DESIGN QUESTIONS }
//! ```

use crate::scrapers::Extractor;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

/// Placeholder replaced by the URL-encoded query in an endpoint template.
pub const QUERY_PLACEHOLDER: &str = "{query}";
/// Placeholder replaced by the company name in a query template.
pub const COMPANY_PLACEHOLDER: &str = "{company}";

/// Per-request timeout applied by the HTTP fetcher.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DUCKDUCKGO_HTML: &str = "https://duckduckgo.com/html/?q={query}";
const LEETCODE_DISCUSS: &str =
    "https://leetcode.com/discuss/interview-question?currentPage=1&orderBy=hot&query={query}";
const GITHUB_REPO_SEARCH: &str =
    "https://api.github.com/search/repositories?q={query}&sort=stars&order=desc";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Built-in harvest presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// One scoped search-engine query per company, fallback merged, text output.
    Basic,
    /// Ten search-engine queries per company, no fallback, text output.
    Enhanced,
    /// Forum, search engine and repository search, fallback merged, JSON output.
    MultiSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

/// How to pull candidate titles out of a response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractorKind {
    /// Select `item` elements; when `link` is set, read the first matching
    /// descendant instead of the item itself.
    Html {
        item: String,
        #[serde(default)]
        link: Option<String>,
    },
    /// Repository search JSON (`items[].name`, `items[].description`).
    RepositoryJson { required_phrase: String },
}

/// Inclusive range of milliseconds to sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const NONE: DelayRange = DelayRange { min_ms: 0, max_ms: 0 };

    pub const fn secs(min: u64, max: u64) -> Self {
        DelayRange {
            min_ms: min * 1000,
            max_ms: max * 1000,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.max_ms == 0
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        DelayRange::NONE
    }
}

/// Exclusive character-count bounds for harvested titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

/// One external site queried for candidate titles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    pub name: String,
    /// URL template containing `{query}`.
    pub endpoint: String,
    /// Query templates containing `{company}`.
    pub queries: Vec<String>,
    pub extractor: ExtractorKind,
    /// A candidate survives if it contains at least one of these (case-folded).
    pub keywords: Vec<String>,
    /// Only the first `max_results` matches of each response are considered.
    pub max_results: usize,
    /// Sleep after each query against this source.
    #[serde(default)]
    pub delay: DelayRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub path: String,
    /// Text sink banner appended after the upper-cased company name.
    #[serde(default = "default_banner")]
    pub banner: String,
}

fn default_banner() -> String {
    "SYSTEM DESIGN QUESTIONS".to_string()
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HarvestConfig {
    pub companies: Vec<String>,
    pub sources: Vec<SourceConfig>,
    /// Canned questions per company, merged after harvesting.
    #[serde(default)]
    pub fallback: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub length_bounds: Option<LengthBounds>,
    /// Sleep before moving on to the next company.
    #[serde(default)]
    pub company_delay: DelayRange,
    pub output: OutputConfig,
}

impl HarvestConfig {
    /// Build the configuration for a built-in profile.
    pub fn from_profile(profile: Profile) -> Self {
        match profile {
            Profile::Basic => basic_profile(),
            Profile::Enhanced => enhanced_profile(),
            Profile::MultiSource => multi_source_profile(),
        }
    }

    /// Load and validate a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml(&raw)?;
        info!(
            companies = config.companies.len(),
            sources = config.sources.len(),
            "Loaded harvest config"
        );
        Ok(config)
    }

    /// Parse and validate a YAML document.
    ///
    /// # Arguments
    ///
    /// * `raw` - YAML text in the same shape as `config/multi_source.yaml`
    ///
    /// # Returns
    ///
    /// The validated config, [`ConfigError::Yaml`] if it does not parse, or
    /// [`ConfigError::Invalid`] if validation rejects it.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config: HarvestConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Fallback list for a company, empty when none is configured.
    pub fn fallback_for(&self, company: &str) -> &[String] {
        self.fallback.get(company).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Zero every delay, for dry runs against local stubs.
    pub fn without_delays(mut self) -> Self {
        self.company_delay = DelayRange::NONE;
        for source in &mut self.sources {
            source.delay = DelayRange::NONE;
        }
        self
    }

    /// Check the config before any request is made.
    ///
    /// Rejects empty company or source lists, inverted delay ranges and
    /// length bounds, endpoints without the query placeholder, a zero
    /// `max_results`, and CSS selectors that do not parse.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.companies.is_empty() {
            return Err(ConfigError::Invalid("no companies configured".into()));
        }
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid("no sources configured".into()));
        }
        check_delay("company_delay", &self.company_delay)?;
        if let Some(bounds) = self.length_bounds {
            if bounds.min >= bounds.max {
                return Err(ConfigError::Invalid(format!(
                    "length_bounds min ({}) must be below max ({})",
                    bounds.min, bounds.max
                )));
            }
        }
        for source in &self.sources {
            source.validate()?;
        }
        Ok(())
    }
}

impl SourceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| ConfigError::Invalid(format!("source '{}': {}", self.name, msg));

        if !self.endpoint.contains(QUERY_PLACEHOLDER) {
            return Err(invalid(format!("endpoint lacks {QUERY_PLACEHOLDER}")));
        }
        if self.queries.is_empty() {
            return Err(invalid("no query templates".into()));
        }
        if self.max_results == 0 {
            return Err(invalid("max_results must be positive".into()));
        }
        Extractor::compile(&self.extractor).map_err(|e| match e {
            ConfigError::Invalid(msg) => invalid(msg),
            other => other,
        })?;
        check_delay(&self.name, &self.delay)
    }
}

fn check_delay(name: &str, delay: &DelayRange) -> Result<(), ConfigError> {
    if delay.min_ms > delay.max_ms {
        return Err(ConfigError::Invalid(format!(
            "{name}: delay min_ms ({}) exceeds max_ms ({})",
            delay.min_ms, delay.max_ms
        )));
    }
    Ok(())
}

pub fn default_companies() -> Vec<String> {
    ["Atlassian", "PayPal", "Mastercard"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn fallback_table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(company, questions)| (company.to_string(), strings(questions)))
        .collect()
}

fn basic_profile() -> HarvestConfig {
    HarvestConfig {
        companies: default_companies(),
        sources: vec![SourceConfig {
            name: "duckduckgo".into(),
            endpoint: DUCKDUCKGO_HTML.into(),
            queries: strings(&[
                "{company} system design interview questions site:reddit.com OR site:leetcode.com",
            ]),
            extractor: ExtractorKind::Html {
                item: "a.result__a".into(),
                link: None,
            },
            keywords: strings(&["design", "system", "interview"]),
            max_results: 5,
            delay: DelayRange::secs(2, 4),
        }],
        fallback: fallback_table(&[
            (
                "Atlassian",
                &[
                    "Design a collaborative document editing system like Confluence",
                    "Design a project management tool like Jira",
                    "Design a real-time chat system for teams",
                    "Design a file sharing platform",
                    "Design a notification system",
                ],
            ),
            (
                "PayPal",
                &[
                    "Design a payment processing system",
                    "Design a fraud detection system",
                    "Design a digital wallet",
                    "Design a money transfer system",
                    "Design a merchant payment gateway",
                ],
            ),
            (
                "Mastercard",
                &[
                    "Design a credit card transaction system",
                    "Design a real-time fraud detection system",
                    "Design a global payment network",
                    "Design a loyalty rewards system",
                    "Design a merchant acquiring platform",
                ],
            ),
        ]),
        length_bounds: None,
        company_delay: DelayRange::secs(1, 3),
        output: OutputConfig {
            format: OutputFormat::Text,
            path: "system_design_questions.txt".into(),
            banner: "SYSTEM DESIGN QUESTIONS".into(),
        },
    }
}

fn enhanced_profile() -> HarvestConfig {
    HarvestConfig {
        companies: default_companies(),
        sources: vec![SourceConfig {
            name: "duckduckgo".into(),
            endpoint: DUCKDUCKGO_HTML.into(),
            queries: strings(&[
                "{company} system design interview questions",
                "{company} senior software engineer interview system design",
                "{company} L5 L6 system design round",
                "{company} staff engineer system design interview",
                "{company} principal engineer interview experience",
                "site:leetcode.com {company} system design",
                "site:reddit.com {company} interview system design",
                "site:glassdoor.com {company} system design questions",
                "site:github.com {company} system design interview",
                "{company} onsite interview system design round",
            ]),
            extractor: ExtractorKind::Html {
                item: "a.result__a".into(),
                link: None,
            },
            keywords: strings(&["design", "system", "interview", "experience"]),
            max_results: 3,
            delay: DelayRange::secs(2, 5),
        }],
        fallback: BTreeMap::new(),
        length_bounds: None,
        company_delay: DelayRange::NONE,
        output: OutputConfig {
            format: OutputFormat::Text,
            path: "additional_questions.txt".into(),
            banner: "- ADDITIONAL QUESTIONS FOUND".into(),
        },
    }
}

fn multi_source_profile() -> HarvestConfig {
    HarvestConfig {
        companies: default_companies(),
        sources: vec![
            SourceConfig {
                name: "leetcode".into(),
                endpoint: LEETCODE_DISCUSS.into(),
                queries: strings(&["{company} system design interview"]),
                extractor: ExtractorKind::Html {
                    item: "div.topic-title".into(),
                    link: Some("a".into()),
                },
                keywords: strings(&["system design", "design", "architecture"]),
                max_results: 5,
                delay: DelayRange::secs(1, 3),
            },
            SourceConfig {
                name: "duckduckgo".into(),
                endpoint: DUCKDUCKGO_HTML.into(),
                queries: strings(&["site:reddit.com {company} system design interview questions"]),
                extractor: ExtractorKind::Html {
                    item: "a.result__a".into(),
                    link: None,
                },
                keywords: strings(&["system design"]),
                max_results: 3,
                delay: DelayRange::secs(1, 3),
            },
            SourceConfig {
                name: "github".into(),
                endpoint: GITHUB_REPO_SEARCH.into(),
                queries: strings(&["{company} system design interview questions"]),
                extractor: ExtractorKind::RepositoryJson {
                    required_phrase: "system design".into(),
                },
                keywords: strings(&["system design"]),
                max_results: 3,
                delay: DelayRange::secs(1, 3),
            },
        ],
        fallback: fallback_table(&[
            (
                "Atlassian",
                &[
                    "Design a collaborative document editing system like Confluence",
                    "Design a project management system like Jira",
                    "Design a real-time chat system for teams",
                    "Design a file sharing and collaboration platform",
                    "Design a notification system for team updates",
                ],
            ),
            (
                "PayPal",
                &[
                    "Design a payment processing system",
                    "Design a fraud detection system",
                    "Design a wallet system for digital payments",
                    "Design a money transfer system",
                    "Design a merchant payment gateway",
                ],
            ),
            (
                "Mastercard",
                &[
                    "Design a credit card transaction processing system",
                    "Design a real-time fraud detection system",
                    "Design a global payment network",
                    "Design a loyalty points system",
                    "Design a merchant acquiring system",
                ],
            ),
        ]),
        length_bounds: Some(LengthBounds { min: 10, max: 200 }),
        company_delay: DelayRange::secs(2, 4),
        output: OutputConfig {
            format: OutputFormat::Json,
            path: "system_design_questions.json".into(),
            banner: "SYSTEM DESIGN QUESTIONS".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_validate() {
        for profile in [Profile::Basic, Profile::Enhanced, Profile::MultiSource] {
            let config = HarvestConfig::from_profile(profile);
            assert!(config.validate().is_ok(), "{profile:?} failed validation");
        }
    }

    #[test]
    fn test_profile_shapes() {
        let basic = HarvestConfig::from_profile(Profile::Basic);
        assert_eq!(basic.sources.len(), 1);
        assert_eq!(basic.fallback_for("PayPal").len(), 5);
        assert_eq!(basic.output.format, OutputFormat::Text);

        let enhanced = HarvestConfig::from_profile(Profile::Enhanced);
        assert_eq!(enhanced.sources[0].queries.len(), 10);
        assert!(enhanced.fallback.is_empty());

        let multi = HarvestConfig::from_profile(Profile::MultiSource);
        assert_eq!(multi.sources.len(), 3);
        assert_eq!(multi.length_bounds, Some(LengthBounds { min: 10, max: 200 }));
        assert_eq!(multi.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_fallback_for_unknown_company_is_empty() {
        let config = HarvestConfig::from_profile(Profile::MultiSource);
        assert!(config.fallback_for("Initech").is_empty());
    }

    #[test]
    fn test_without_delays() {
        let config = HarvestConfig::from_profile(Profile::Basic).without_delays();
        assert!(config.company_delay.is_zero());
        assert!(config.sources.iter().all(|s| s.delay.is_zero()));
    }

    #[test]
    fn test_sample_config_parses() {
        let raw = include_str!("../config/multi_source.yaml");
        let config = HarvestConfig::from_yaml(raw).unwrap();
        assert_eq!(config, HarvestConfig::from_profile(Profile::MultiSource));
    }

    #[test]
    fn test_rejects_endpoint_without_placeholder() {
        let mut config = HarvestConfig::from_profile(Profile::Basic);
        config.sources[0].endpoint = "https://duckduckgo.com/html/".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("{query}"));
    }

    #[test]
    fn test_rejects_bad_selector() {
        let mut config = HarvestConfig::from_profile(Profile::Basic);
        config.sources[0].extractor = ExtractorKind::Html {
            item: "a[[".into(),
            link: None,
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_inverted_bounds_and_delays() {
        let mut config = HarvestConfig::from_profile(Profile::MultiSource);
        config.length_bounds = Some(LengthBounds { min: 200, max: 10 });
        assert!(config.validate().is_err());

        let mut config = HarvestConfig::from_profile(Profile::MultiSource);
        config.sources[1].delay = DelayRange { min_ms: 5, max_ms: 1 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_defaults() {
        let raw = r#"
companies: [Initech]
sources:
  - name: ddg
    endpoint: "https://duckduckgo.com/html/?q={query}"
    queries: ["{company} system design"]
    extractor: { kind: html, item: "a.result__a" }
    keywords: [design]
    max_results: 2
output:
  format: text
  path: out.txt
"#;
        let config = HarvestConfig::from_yaml(raw).unwrap();
        assert_eq!(config.output.banner, "SYSTEM DESIGN QUESTIONS");
        assert!(config.fallback.is_empty());
        assert!(config.length_bounds.is_none());
        assert!(config.sources[0].delay.is_zero());
        assert_eq!(
            config.sources[0].extractor,
            ExtractorKind::Html {
                item: "a.result__a".into(),
                link: None
            }
        );
    }

    #[test]
    fn test_yaml_rejects_empty_companies() {
        let raw = r#"
companies: []
sources: []
output: { format: json, path: out.json }
"#;
        assert!(matches!(
            HarvestConfig::from_yaml(raw),
            Err(ConfigError::Invalid(_))
        ));
    }
}
