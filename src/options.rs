//! Scan options configuration.
//!
//! This module provides the [`ScanOptions`] struct, the explicit and
//! immutable configuration passed to every detection strategy and to the
//! probe executor.

use crate::DetectionMethod;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a scan run.
///
/// # Default Behavior
///
/// - no method selected, meaning every method supported on this platform
/// - 10 second timeout per probe
/// - elevation through `sudo -n` (never prompts for a password)
/// - filesystem walk rooted at `/usr/lib/jvm`, nothing excluded
/// - candidates analyzed one at a time
///
/// # Example
///
/// ```rust
/// use java_scanner::{DetectionMethod, ScanOptions};
/// use std::time::Duration;
///
/// let opts = ScanOptions {
///     methods: vec![DetectionMethod::FileSystem],
///     root_paths: vec!["/opt".into()],
///     exclude_patterns: vec!["/opt/backup".to_string()],
///     probe_timeout: Duration::from_secs(30),
///     ..Default::default()
/// };
/// assert_eq!(opts.enabled_methods(), vec![DetectionMethod::FileSystem]);
/// ```
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Detection methods to run. Empty selects every supported method.
    pub methods: Vec<DetectionMethod>,

    /// Upper bound for a single probe run.
    ///
    /// A candidate that hangs is killed after this long and the expiry is
    /// treated as a probe failure.
    ///
    /// Default: 10 seconds
    pub probe_timeout: Duration,

    /// Wrapper used to rerun the properties probe with elevated rights.
    ///
    /// The candidate path and probe arguments are appended. An empty list
    /// disables elevation.
    ///
    /// Default: `["sudo", "-n"]`
    pub elevation_command: Vec<String>,

    /// Roots of the filesystem walk.
    ///
    /// Default: `["/usr/lib/jvm"]`
    pub root_paths: Vec<PathBuf>,

    /// Regular expressions; paths matching any of them are not walked.
    pub exclude_patterns: Vec<String>,

    /// How many candidates are analyzed at the same time.
    ///
    /// Default: 1
    pub concurrency: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            methods: Vec::new(),
            probe_timeout: Duration::from_secs(10),
            elevation_command: vec!["sudo".to_string(), "-n".to_string()],
            root_paths: vec![PathBuf::from("/usr/lib/jvm")],
            exclude_patterns: Vec::new(),
            concurrency: 1,
        }
    }
}

impl ScanOptions {
    /// Methods this scan runs, deduplicated and in report order.
    pub fn enabled_methods(&self) -> Vec<DetectionMethod> {
        if self.methods.is_empty() {
            return DetectionMethod::supported().collect();
        }
        let mut methods = self.methods.clone();
        methods.sort();
        methods.dedup();
        methods
    }

    /// Compile the exclusion patterns into a single alternation.
    ///
    /// Returns `Ok(None)` when nothing is excluded.
    pub fn exclusion_regex(&self) -> Result<Option<Regex>, regex::Error> {
        if self.exclude_patterns.is_empty() {
            return Ok(None);
        }
        Regex::new(&self.exclude_patterns.join("|")).map(Some)
    }
}
