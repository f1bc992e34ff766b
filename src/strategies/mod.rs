//! Detection strategies producing candidate Java executables.
//!
//! Each strategy is a plain producer of [`Candidate`]s; the analysis of the
//! candidates happens in the scan orchestrator.

mod alternatives;
mod current_path;
mod filesystem;
mod processes;
mod registry;

pub use alternatives::parse_alternatives;
pub use filesystem::collect_java_files;

use crate::{Candidate, DetectionMethod, DiscoveryError, ScanOptions};
use tracing::info;

/// File and process names a Java launcher goes by.
const JAVA_NAMES: &[&str] = &["java", "java.exe"];

/// Whether `name` is a Java launcher name, ignoring ASCII case.
pub(crate) fn is_java_name(name: &str) -> bool {
    JAVA_NAMES
        .iter()
        .any(|java| name.eq_ignore_ascii_case(java))
}

impl DetectionMethod {
    /// Run this strategy and collect its candidates.
    ///
    /// # Errors
    ///
    /// - `Unsupported` when the strategy cannot run on this platform
    /// - `InvalidExcludePattern` for a bad filesystem exclusion
    /// - `CommandFailed` / `SystemSource` when the underlying source fails
    ///
    /// A PATH without `java` is not an error; it yields no candidates.
    pub async fn discover(&self, options: &ScanOptions) -> Result<Vec<Candidate>, DiscoveryError> {
        if !self.is_supported() {
            return Err(DiscoveryError::Unsupported { method: *self });
        }

        info!(method = %self, "starting detection");
        let candidates = match self {
            Self::FileSystem => filesystem::discover(options).await?,
            Self::LinuxAlternatives => alternatives::discover(options).await?,
            Self::RunningProcesses => processes::discover()?,
            Self::WindowsRegistry => registry::discover()?,
            Self::CurrentPath => current_path::discover(),
        };
        info!(method = %self, count = candidates.len(), "detection finished");
        Ok(candidates)
    }
}
