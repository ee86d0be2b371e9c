//! Command-line interface definitions for the harvester.
//!
//! All arguments are optional: with none, the multi-source profile runs
//! against the default companies and writes `system_design_questions.json`.

use crate::config::{ConfigError, HarvestConfig, OutputFormat, Profile};
use clap::Parser;
use std::path::Path;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Default multi-source run, JSON output
/// interview_harvest
///
/// # Single scoped query per company, text output
/// interview_harvest --profile basic
///
/// # Custom sources and companies from YAML, written as text
/// interview_harvest -c config/multi_source.yaml -f text -o out/questions.txt
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Built-in harvest profile
    #[arg(short, long, env = "HARVEST_PROFILE", value_enum, default_value_t = Profile::MultiSource)]
    pub profile: Profile,

    /// YAML config file; replaces the profile entirely
    #[arg(short, long, env = "HARVEST_CONFIG")]
    pub config: Option<String>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Company to harvest (repeatable); replaces the configured list
    #[arg(long = "company")]
    pub companies: Vec<String>,

    /// Print the results to stdout after writing
    #[arg(long)]
    pub print: bool,

    /// Skip every courtesy delay
    #[arg(long)]
    pub no_delay: bool,
}

impl Cli {
    /// Build the effective configuration: profile or YAML file, then CLI overrides.
    pub fn resolve_config(&self) -> Result<HarvestConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::load(path)?,
            None => HarvestConfig::from_profile(self.profile),
        };

        if !self.companies.is_empty() {
            config.companies = self.companies.clone();
        }
        if let Some(format) = self.format {
            if format != config.output.format && self.output.is_none() {
                config.output.path = Path::new(&config.output.path)
                    .with_extension(extension(format))
                    .to_string_lossy()
                    .into_owned();
            }
            config.output.format = format;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if self.no_delay {
            config = config.without_delays();
        }

        config.validate()?;
        Ok(config)
    }
}

fn extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
    }
}
