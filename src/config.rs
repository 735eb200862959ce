/*!
 * Simulator Configuration
 * Defaults, environment variables and command-line overrides
 *
 * Environment variables:
 * - PARTITION_REQUESTS: request file (default: data/requests.txt)
 * - PARTITION_STRATEGY: first_fit | best_fit | worst_fit (default: first_fit)
 * - PARTITION_REPORT: table | json (default: table)
 * - PARTITION_QUIET: print only outcomes and the summary (default: false)
 *
 * Positional arguments `[REQUEST_FILE] [STRATEGY]` override the environment.
 */

use crate::core::limits::DEFAULT_REQUEST_FILE;
use crate::memory::{FitStrategy, ParseStrategyError};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Strategy(#[from] ParseStrategyError),

    #[error("Unknown report format: {0}")]
    #[diagnostic(code(config::unknown_report), help("Use 'table' or 'json'."))]
    UnknownReportFormat(String),

    #[error("Unexpected argument: {0}")]
    #[diagnostic(
        code(config::unexpected_argument),
        help("Usage: partition-sim [REQUEST_FILE] [STRATEGY]")
    )]
    UnexpectedArgument(String),
}

/// Output format for the final report
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ConfigError::UnknownReportFormat(s.to_string())),
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub request_file: PathBuf,
    pub strategy: FitStrategy,
    pub report: ReportFormat,
    /// Skip the per-request memory map
    pub quiet: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            request_file: PathBuf::from(DEFAULT_REQUEST_FILE),
            strategy: FitStrategy::default(),
            report: ReportFormat::default(),
            quiet: false,
        }
    }
}

impl SimulatorConfig {
    /// Build from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("PARTITION_REQUESTS") {
            config.request_file = PathBuf::from(path);
        }
        if let Some(strategy) = lookup("PARTITION_STRATEGY") {
            config.strategy = strategy.parse()?;
        }
        if let Some(report) = lookup("PARTITION_REPORT") {
            config.report = report.parse()?;
        }
        if let Some(quiet) = lookup("PARTITION_QUIET") {
            config.quiet = quiet == "1" || quiet.eq_ignore_ascii_case("true");
        }

        Ok(config)
    }

    /// Apply positional `[REQUEST_FILE] [STRATEGY]` arguments
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        if let Some(path) = args.next() {
            self.request_file = PathBuf::from(path);
        }
        if let Some(strategy) = args.next() {
            self.strategy = strategy.parse()?;
        }
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }

        Ok(self)
    }
}
