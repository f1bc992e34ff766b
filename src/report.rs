//! CSV export and JSON-lines findings log.

use crate::{InstallationRecord, ReportError};
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Timestamp layout of the CSV file name and timestamp column.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d_%H-%M-%S";

/// Default name of the append-only findings log.
pub const DEFAULT_FINDINGS_FILE: &str = "findings.log";

/// CSV header, in column order.
pub const CSV_HEADER: [&str; 12] = [
    "DetectionMethod",
    "ScanTimestamp",
    "Hostname",
    "Exe",
    "Valid",
    "Username",
    "Vendor",
    "RuntimeName",
    "MajorVersion",
    "BuildNumber",
    "RequiresLicense",
    "ErrorText",
];

/// File name of the CSV export for a run started at `at`.
pub fn csv_file_name(at: DateTime<Utc>) -> String {
    format!("result_{}.csv", at.format(TIMESTAMP_LAYOUT))
}

/// Write records as CSV, header first, one row per record.
pub fn write_csv<W: Write>(writer: W, records: &[InstallationRecord]) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for record in records {
        csv_writer.write_record([
            record.detection_method.display_name().to_string(),
            record.scan_timestamp.format(TIMESTAMP_LAYOUT).to_string(),
            record.hostname.clone(),
            record.exe.display().to_string(),
            record.valid.to_string(),
            record.username.clone(),
            record.vendor.clone(),
            record.runtime_name.clone(),
            record.major_version.to_string(),
            record.build_number.to_string(),
            record.requires_license.to_string(),
            record.error_text.clone(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write records as JSON lines, one serialized record per line.
pub fn write_json_lines<W: Write>(
    mut writer: W,
    records: &[InstallationRecord],
) -> Result<(), ReportError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Create the CSV export in `dir`; returns the path written.
///
/// # Errors
///
/// Fails when the file cannot be created or written.
pub fn create_csv_file(
    dir: &Path,
    at: DateTime<Utc>,
    records: &[InstallationRecord],
) -> Result<PathBuf, ReportError> {
    let path = dir.join(csv_file_name(at));
    let file = File::create(&path).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    write_csv(BufWriter::new(file), records)?;

    info!(path = %path.display(), rows = records.len(), "results exported to CSV");
    Ok(path)
}

/// Append records to the findings log, creating it when missing.
///
/// # Errors
///
/// Fails when the file cannot be opened or written.
pub fn append_findings(path: &Path, records: &[InstallationRecord]) -> Result<(), ReportError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    write_json_lines(BufWriter::new(file), records)?;

    info!(path = %path.display(), rows = records.len(), "appended findings");
    Ok(())
}
