//! # java-scanner
//!
//! Inventory of Java runtime installations for license-compliance audits.
//!
//! The crate discovers candidate `java` executables through several
//! detection methods, interrogates each one for vendor, runtime name, major
//! version and build number, and flags installations that may require a
//! commercial license.
//!
//! ## Features
//!
//! - `DetectionMethod` enum naming the candidate producers
//! - `BinaryAnalyzer` driving the properties / elevated / `-version` probes
//! - `requires_license()` classifying a runtime
//! - `scan()` async function running every enabled method
//! - `report` CSV export and JSON-lines findings log
//!
//! ## Example
//!
//! ```rust,no_run
//! use java_scanner::{scan, ScanOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let records = scan(&ScanOptions::default()).await;
//!     for record in &records {
//!         println!(
//!             "{} {}: java {} build {} (license required: {})",
//!             record.detection_method,
//!             record.exe.display(),
//!             record.major_version,
//!             record.build_number,
//!             record.requires_license,
//!         );
//!     }
//! }
//! ```

pub mod analysis;
pub mod config;
mod detection_method;
mod error;
mod options;
mod record;
pub mod report;
mod scan;
pub mod strategies;

pub use analysis::{requires_license, BinaryAnalysis, BinaryAnalyzer};
pub use detection_method::DetectionMethod;
pub use error::{ConfigError, DiscoveryError, ProbeError, ReportError};
pub use options::ScanOptions;
pub use record::{Candidate, InstallationRecord, ScanContext};
pub use scan::{analyze_candidates, scan, scan_method, scan_with_context};
