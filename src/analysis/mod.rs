//! Binary analysis pipeline.
//!
//! Turns a candidate executable path into vendor, runtime name, major
//! version and build number:
//!
//! - `grammar`: pure parsers for `-version` and `-XshowSettings` output
//! - `probe`: runs the candidate with a timeout, optionally elevated
//! - `analyzer`: the fallback state machine driving the probes
//! - `license`: the license-requirement heuristic

mod analyzer;
mod grammar;
mod license;
mod probe;

pub use analyzer::{BinaryAnalysis, BinaryAnalyzer, ERROR_SEPARATOR};
pub use grammar::{
    extract_key_value_properties, extract_runtime_name, extract_version_token,
    parse_version_output, split_major_and_build, VersionOutput,
};
pub use license::requires_license;
pub use probe::{CommandProbe, ProbeProfile, ProbeRunner};
