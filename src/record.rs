//! Installation records and the inputs they are assembled from.

use crate::analysis::BinaryAnalysis;
use crate::{requires_license, DetectionMethod};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// A candidate Java executable produced by a detection strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path to the executable.
    ///
    /// `None` when a running `java` process was found but its executable
    /// link could not be read; such candidates are reported as invalid.
    pub path: Option<PathBuf>,

    /// Owner of the process, for process-based strategies.
    pub username: Option<String>,
}

impl Candidate {
    /// Candidate found on disk, with no owning user.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            username: None,
        }
    }
}

/// State shared by every record of one scan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    /// When the scan started.
    pub timestamp: DateTime<Utc>,
    /// Name of the scanned host, empty when it cannot be determined.
    pub hostname: String,
}

impl ScanContext {
    /// Capture the current time and host name.
    pub fn capture() -> Self {
        let hostname = hostname::get()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            timestamp: Utc::now(),
            hostname,
        }
    }
}

/// One analyzed Java installation.
///
/// Records are emitted for every candidate, including those that could not
/// be analyzed: consumers tell success from failure through [`valid`] and
/// [`error_text`], never by a record's absence.
///
/// [`valid`]: InstallationRecord::valid
/// [`error_text`]: InstallationRecord::error_text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationRecord {
    /// Strategy that found the executable.
    pub detection_method: DetectionMethod,
    /// Start of the scan run that produced this record.
    pub scan_timestamp: DateTime<Utc>,
    /// Host the scan ran on.
    pub hostname: String,
    /// Executable path, empty when unknown.
    pub exe: PathBuf,
    /// Owner of the process, empty when unknown.
    pub username: String,
    /// Whether usable metadata was obtained.
    pub valid: bool,
    /// `java.vendor`, empty when unknown.
    pub vendor: String,
    /// Runtime name, empty when unknown.
    pub runtime_name: String,
    /// Major version, 0 when unknown.
    pub major_version: u32,
    /// Build number, 0 when unknown or absent.
    pub build_number: u32,
    /// Whether the installation may require a commercial license.
    pub requires_license: bool,
    /// `|`-delimited trail of every failure met during analysis.
    pub error_text: String,
}

impl InstallationRecord {
    /// Assemble a record and classify its license requirement.
    pub fn new(
        method: DetectionMethod,
        context: &ScanContext,
        candidate: Candidate,
        analysis: BinaryAnalysis,
    ) -> Self {
        let requires_license = requires_license(
            &analysis.runtime_name,
            analysis.major_version,
            analysis.build_number,
        );
        let error_text = analysis.error_text();

        Self {
            detection_method: method,
            scan_timestamp: context.timestamp,
            hostname: context.hostname.clone(),
            exe: candidate.path.unwrap_or_default(),
            username: candidate.username.unwrap_or_default(),
            valid: analysis.valid,
            vendor: analysis.vendor,
            runtime_name: analysis.runtime_name,
            major_version: analysis.major_version,
            build_number: analysis.build_number,
            requires_license,
            error_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn context() -> ScanContext {
        ScanContext {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
            hostname: "build-agent-01".to_string(),
        }
    }

    fn oracle_8_analysis() -> BinaryAnalysis {
        BinaryAnalysis {
            vendor: "Oracle Corporation".to_string(),
            runtime_name: "Java(TM) SE Runtime Environment".to_string(),
            major_version: 8,
            build_number: 211,
            valid: true,
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_record_from_analysis() {
        let candidate = Candidate {
            path: Some(PathBuf::from("/opt/jdk1.8.0_211/bin/java")),
            username: Some("tomcat".to_string()),
        };
        let record = InstallationRecord::new(
            DetectionMethod::RunningProcesses,
            &context(),
            candidate,
            oracle_8_analysis(),
        );

        assert_eq!(record.detection_method, DetectionMethod::RunningProcesses);
        assert_eq!(record.hostname, "build-agent-01");
        assert_eq!(record.exe, PathBuf::from("/opt/jdk1.8.0_211/bin/java"));
        assert_eq!(record.username, "tomcat");
        assert!(record.valid);
        assert!(record.requires_license);
        assert_eq!(record.error_text, "");
    }

    #[test]
    fn test_record_for_unreadable_process() {
        let candidate = Candidate {
            path: None,
            username: None,
        };
        let record = InstallationRecord::new(
            DetectionMethod::RunningProcesses,
            &context(),
            candidate,
            BinaryAnalysis::failed("executable path unavailable"),
        );

        assert!(!record.valid);
        assert_eq!(record.exe, PathBuf::new());
        assert_eq!(record.username, "");
        assert!(!record.requires_license);
        assert_eq!(record.error_text, "executable path unavailable");
    }

    #[test]
    fn test_error_trail_is_pipe_joined() {
        let analysis = BinaryAnalysis {
            valid: false,
            errors: vec!["first".to_string(), "second".to_string()],
            ..BinaryAnalysis::default()
        };
        let record = InstallationRecord::new(
            DetectionMethod::FileSystem,
            &context(),
            Candidate::from_path("/usr/bin/java"),
            analysis,
        );
        assert_eq!(record.error_text, "first|second");
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = InstallationRecord::new(
            DetectionMethod::CurrentPath,
            &context(),
            Candidate::from_path("/usr/bin/java"),
            oracle_8_analysis(),
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["detectionMethod"], "current-path");
        assert_eq!(json["scanTimestamp"], "2024-03-01T12:30:00Z");
        assert_eq!(json["majorVersion"], 8);
        assert_eq!(json["requiresLicense"], true);
        assert_eq!(json["exe"], "/usr/bin/java");
    }

    #[test]
    fn test_capture_context() {
        let before = Utc::now();
        let context = ScanContext::capture();
        assert!(context.timestamp >= before);
    }
}
