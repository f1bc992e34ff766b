//! Error types for probing, discovery, reporting and configuration.
//!
//! Probe failures never escape the analyzer: they are folded into the
//! record's `valid` flag and error trail. The other error types surface to
//! the caller of the scan or the reporter.

use crate::DetectionMethod;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Output fragment a JVM prints when it predates `-XshowSettings`.
pub(crate) const UNRECOGNIZED_PROPERTIES_OPTION: &str =
    "Unrecognized option: -XshowSettings:properties";

/// Errors raised while running a probe against a candidate executable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The process could not be started (missing file, not executable, ...).
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// The program that was spawned (the candidate or the elevation wrapper).
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish within the probe timeout.
    #[error("probe timed out after {timeout:?}")]
    Timeout {
        /// The timeout that expired.
        timeout: Duration,
    },

    /// The process ran but exited unsuccessfully.
    #[error("exited with {}: {}", exit_label(*code), output.trim())]
    Failed {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Combined stdout and stderr.
        output: String,
    },

    /// Elevation was requested but no elevation command is configured.
    #[error("no elevation command configured")]
    ElevationUnavailable,
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

impl ProbeError {
    /// Captured output of a failed run, empty when the process never ran.
    pub fn output(&self) -> &str {
        match self {
            Self::Failed { output, .. } => output,
            _ => "",
        }
    }

    /// Whether the JVM rejected `-XshowSettings:properties` as unknown.
    ///
    /// Java 6 and older answer the properties probe this way; it signals a
    /// switch to the legacy probe, not a failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use java_scanner::ProbeError;
    ///
    /// let error = ProbeError::Failed {
    ///     code: Some(1),
    ///     output: "Unrecognized option: -XshowSettings:properties\n".to_string(),
    /// };
    /// assert!(error.is_unrecognized_option());
    /// ```
    pub fn is_unrecognized_option(&self) -> bool {
        self.output().contains(UNRECOGNIZED_PROPERTIES_OPTION)
    }
}

/// Errors raised by a detection strategy while collecting candidates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The strategy cannot run on this platform.
    #[error("{method} detection is not supported on this platform")]
    Unsupported {
        /// The unsupported method.
        method: DetectionMethod,
    },

    /// An exclusion pattern is not a valid regular expression.
    #[error("invalid exclusion pattern: {0}")]
    InvalidExcludePattern(#[from] regex::Error),

    /// A helper command could not be run or failed.
    #[error("`{command}` failed: {message}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// What went wrong.
        message: String,
    },

    /// Reading a system source (process table, registry) failed.
    #[error("failed to read {source_name}: {message}")]
    SystemSource {
        /// Name of the source, e.g. `/proc`.
        source_name: String,
        /// What went wrong.
        message: String,
    },

    /// A blocking discovery task panicked or was cancelled.
    #[error("discovery task failed: {0}")]
    Task(String),
}

/// Errors raised while writing reports.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// Creating or writing the output file failed.
    #[error("failed to write report {path}: {source}")]
    Io {
        /// The file being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the underlying sink failed.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// The configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// The configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}
