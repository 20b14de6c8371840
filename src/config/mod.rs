//! Configuration management module
//!
//! Resolves credentials and repository coordinates once at startup into an
//! immutable [`PipelineConfig`] that every pipeline stage borrows.

pub mod resolver;
pub mod validation;

pub use resolver::resolve_config;

use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};

/// Attribute used for the chart when nothing else is configured
pub const DEFAULT_CHART_ATTRIBUTE: &str = "location";

/// Default contributors page size (GitHub's maximum)
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Default first contributors page
pub const DEFAULT_START_PAGE: u32 = 1;

/// GitHub access token
///
/// The `Debug` output is redacted so the token never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    #[must_use]
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    /// The raw token, for handing to the `gh` child process
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(****)")
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// GitHub organization (or user) owning the repository
    pub org: String,
    /// Repository name
    pub repo: String,
    pub token: Token,
    /// User profile attribute the chart groups by
    pub chart_attribute: String,
    pub output_dir: PathBuf,
    /// Date stamped into the output file names
    pub run_date: NaiveDate,
    pub per_page: u32,
    pub start_page: u32,
}

impl PipelineConfig {
    /// Deterministic output paths for this run
    #[must_use]
    pub fn output_files(&self) -> OutputFiles {
        OutputFiles::new(&self.output_dir, &self.org, &self.repo, self.run_date)
    }

    /// Chart title, e.g. `apache/cassandra committers based on location`
    #[must_use]
    pub fn chart_title(&self) -> String {
        format!(
            "{}/{} committers based on {}",
            self.org, self.repo, self.chart_attribute
        )
    }
}

/// The three files a run produces
///
/// Names depend only on organization, repository and date, so a second run
/// on the same day overwrites the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    /// Raw contributor list as returned by the API
    pub contributors: PathBuf,
    /// JSON array of user profiles
    pub users: PathBuf,
    /// Pie chart image
    pub chart: PathBuf,
}

impl OutputFiles {
    #[must_use]
    pub fn new(dir: &Path, org: &str, repo: &str, date: NaiveDate) -> Self {
        let stamp = date.format("%Y%m%d");
        Self {
            contributors: dir.join(format!("{org}_{repo}_contributors_{stamp}.json")),
            users: dir.join(format!("{org}_{repo}_login_details_{stamp}.json")),
            chart: dir.join(format!("{org}_{repo}_pie_chart_{stamp}.png")),
        }
    }
}
