//! TOML configuration file.
//!
//! Every key is optional; values present in the file override the defaults
//! of [`ScanOptions`], and command-line flags override the file.
//!
//! ```toml
//! methods = ["file-system", "running-processes"]
//! probe_timeout_secs = 20
//! elevation_command = ["sudo", "-n"]
//! root_paths = ["/usr/lib/jvm", "/opt"]
//! exclude_patterns = ["/opt/backup"]
//! concurrency = 2
//! output_dir = "/var/lib/java-scanner"
//! append_findings = true
//! findings_file = "/var/lib/java-scanner/findings.log"
//! ```

use crate::{ConfigError, DetectionMethod, ScanOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the home directory when no path is given.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".java-scanner.toml";

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Detection methods to run, by kebab-case name.
    pub methods: Option<Vec<DetectionMethod>>,
    /// Timeout of a single probe run, in seconds.
    pub probe_timeout_secs: Option<u64>,
    /// Elevation wrapper; `[]` disables elevation.
    pub elevation_command: Option<Vec<String>>,
    /// Roots of the filesystem walk.
    pub root_paths: Option<Vec<PathBuf>>,
    /// Regular expressions of paths the filesystem walk skips.
    pub exclude_patterns: Option<Vec<String>>,
    /// Number of candidates analyzed at the same time.
    pub concurrency: Option<usize>,
    /// Directory of the CSV export.
    pub output_dir: Option<PathBuf>,
    /// Whether to append records to the findings log.
    pub append_findings: Option<bool>,
    /// Path of the findings log.
    pub findings_file: Option<PathBuf>,
}

impl FileConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// `~/.java-scanner.toml`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE_NAME))
    }

    /// Load `explicit`, or the default file when it exists.
    ///
    /// A missing default file yields an empty configuration; a missing
    /// explicit file is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Overlay the file's scan settings on `options`.
    pub fn apply(&self, options: &mut ScanOptions) {
        if let Some(methods) = &self.methods {
            options.methods = methods.clone();
        }
        if let Some(secs) = self.probe_timeout_secs {
            options.probe_timeout = Duration::from_secs(secs);
        }
        if let Some(command) = &self.elevation_command {
            options.elevation_command = command.clone();
        }
        if let Some(roots) = &self.root_paths {
            options.root_paths = roots.clone();
        }
        if let Some(patterns) = &self.exclude_patterns {
            options.exclude_patterns = patterns.clone();
        }
        if let Some(concurrency) = self.concurrency {
            options.concurrency = concurrency;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = FileConfig::from_toml("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, FileConfig::default());

        let mut options = ScanOptions::default();
        config.apply(&mut options);
        assert_eq!(options.probe_timeout, ScanOptions::default().probe_timeout);
    }

    #[test]
    fn test_full_config() {
        let text = r#"
            methods = ["file-system", "running-processes"]
            probe_timeout_secs = 20
            elevation_command = []
            root_paths = ["/usr/lib/jvm", "/opt"]
            exclude_patterns = ["/opt/backup"]
            concurrency = 3
            output_dir = "/tmp/reports"
            append_findings = true
        "#;
        let config = FileConfig::from_toml(text, Path::new("scan.toml")).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/reports")));
        assert_eq!(config.append_findings, Some(true));
        assert_eq!(config.findings_file, None);

        let mut options = ScanOptions::default();
        config.apply(&mut options);
        assert_eq!(
            options.methods,
            vec![DetectionMethod::FileSystem, DetectionMethod::RunningProcesses]
        );
        assert_eq!(options.probe_timeout, Duration::from_secs(20));
        assert!(options.elevation_command.is_empty());
        assert_eq!(options.root_paths.len(), 2);
        assert_eq!(options.exclude_patterns, vec!["/opt/backup"]);
        assert_eq!(options.concurrency, 3);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = FileConfig::from_toml("scan_everything = true", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let result = FileConfig::from_toml(r#"methods = ["dns"]"#, Path::new("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.toml");
        std::fs::write(&path, "concurrency = 8\n").unwrap();

        let config = FileConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.concurrency, Some(8));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = FileConfig::discover(Some(Path::new("/nonexistent/java-scanner.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
