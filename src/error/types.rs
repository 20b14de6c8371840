//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for ghcontrib operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ContribError {
    /// Missing Dependency - the `gh` CLI is absent and could not be installed
    #[error("Missing dependency: {message}")]
    MissingDependency { message: String },

    /// Configuration Error - missing or invalid organization/repository
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Command Error - an external `gh` invocation failed
    #[error("Command error: {message}")]
    Command { message: String },

    /// Data Error - an input file is missing or holds malformed JSON
    #[error("Data error: {message}")]
    Data { message: String },

    /// Filesystem Error - an output file could not be written
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },

    /// No Chart Data - no profile carries the chosen attribute
    #[error("No chart data: {message}")]
    NoChartData { message: String },

    /// Render Error - the chart image could not be drawn or encoded
    #[error("Render error: {message}")]
    Render { message: String },
}

impl ContribError {
    /// Get the process exit code for this error
    ///
    /// Every fatal pipeline error terminates with status 1.
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// Create a missing dependency error
    #[inline]
    pub fn missing_dependency<S: Into<String>>(message: S) -> Self {
        Self::MissingDependency {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a command error
    #[inline]
    pub fn command<S: Into<String>>(message: S) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Create a data error
    #[inline]
    pub fn data<S: Into<String>>(message: S) -> Self {
        Self::Data {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }

    /// Create a no-chart-data error
    #[inline]
    pub fn no_chart_data<S: Into<String>>(message: S) -> Self {
        Self::NoChartData {
            message: message.into(),
        }
    }

    /// Create a render error
    #[inline]
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}
