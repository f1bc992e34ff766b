//! Binary analyzer: drives the probes of one candidate through the
//! properties -> elevated properties -> legacy fallback chain.

use super::grammar::{
    extract_key_value_properties, parse_version_output, split_major_and_build, RUNTIME_NAME_KEY,
    VENDOR_KEY, VERSION_KEY,
};
use super::probe::{CommandProbe, ProbeProfile, ProbeRunner};
use crate::{ProbeError, ScanOptions};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Separator between entries of a record's error trail.
pub const ERROR_SEPARATOR: &str = "|";

/// Outcome of analyzing one candidate executable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryAnalysis {
    /// `java.vendor`, empty when unknown.
    pub vendor: String,
    /// Runtime name, empty when unknown.
    pub runtime_name: String,
    /// Major version, 0 when unknown.
    pub major_version: u32,
    /// Build number, 0 when unknown or absent.
    pub build_number: u32,
    /// False when every probe that could recover metadata failed.
    pub valid: bool,
    /// Every failure encountered, in order.
    pub errors: Vec<String>,
}

impl BinaryAnalysis {
    /// Analysis of a candidate that could not be probed at all.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
            ..Self::default()
        }
    }

    /// The error trail as one `|`-delimited string.
    pub fn error_text(&self) -> String {
        self.errors.join(ERROR_SEPARATOR)
    }

    fn apply_properties(&mut self, properties: &HashMap<String, String>) {
        if let Some(vendor) = properties.get(VENDOR_KEY) {
            self.vendor = vendor.clone();
        }
        if let Some(version) = properties.get(VERSION_KEY) {
            (self.major_version, self.build_number) = split_major_and_build(version);
        }
        if let Some(runtime_name) = properties.get(RUNTIME_NAME_KEY) {
            self.runtime_name = runtime_name.clone();
        }
    }

    /// Merge `-version` output without clobbering known fields with sentinels.
    fn apply_version_output(&mut self, output: &str) {
        let parsed = parse_version_output(output);
        if parsed.major_version != 0 {
            self.major_version = parsed.major_version;
            self.build_number = parsed.build_number;
        }
        if !parsed.runtime_name.is_empty() {
            self.runtime_name = parsed.runtime_name;
        }
    }

    fn record_failure(&mut self, profile: ProbeProfile, elevated: bool, error: &ProbeError) {
        let label = if elevated {
            format!("{} (elevated)", profile.label())
        } else {
            profile.label().to_string()
        };
        self.errors.push(format!("{label}: {error}"));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Properties { elevated: bool },
    /// `supplementary` is set when the properties probe succeeded and the
    /// legacy probe only fills gaps.
    Legacy { supplementary: bool },
    Done,
}

/// Interrogates candidate executables through a [`ProbeRunner`].
#[derive(Debug, Clone)]
pub struct BinaryAnalyzer<P = CommandProbe> {
    runner: P,
}

impl BinaryAnalyzer<CommandProbe> {
    /// Analyzer spawning real processes configured from scan options.
    pub fn from_options(options: &ScanOptions) -> Self {
        Self::new(CommandProbe::from_options(options))
    }
}

impl<P: ProbeRunner> BinaryAnalyzer<P> {
    /// Wrap a probe runner.
    pub fn new(runner: P) -> Self {
        Self { runner }
    }

    /// Analyze one candidate executable.
    ///
    /// # Fallback Order
    ///
    /// 1. `-XshowSettings:properties -version` directly
    /// 2. the same probe elevated, after a genuine execution failure
    /// 3. `-version`, when the JVM rejects the properties flag, when both
    ///    properties probes failed, or when the properties output carried
    ///    no vendor
    ///
    /// Failures never escape: they land in [`BinaryAnalysis::errors`] and
    /// the `valid` flag.
    pub async fn analyze(&self, exe: &Path) -> BinaryAnalysis {
        let mut analysis = BinaryAnalysis {
            valid: true,
            ..BinaryAnalysis::default()
        };

        let mut state = State::Properties { elevated: false };
        while state != State::Done {
            state = match state {
                State::Properties { elevated } => {
                    self.properties_step(exe, elevated, &mut analysis).await
                }
                State::Legacy { supplementary } => {
                    self.legacy_step(exe, supplementary, &mut analysis).await;
                    State::Done
                }
                State::Done => State::Done,
            };
        }

        if !analysis.errors.is_empty() {
            warn!(
                path = %exe.display(),
                valid = analysis.valid,
                errors = %analysis.error_text(),
                "failed to fully analyze java binary"
            );
        }
        analysis
    }

    async fn properties_step(
        &self,
        exe: &Path,
        elevated: bool,
        analysis: &mut BinaryAnalysis,
    ) -> State {
        match self.runner.run(exe, ProbeProfile::Properties, elevated).await {
            Ok(output) => {
                analysis.apply_properties(&extract_key_value_properties(&output));
                analysis.valid = true;
                if analysis.vendor.is_empty() {
                    debug!(path = %exe.display(), "no vendor in properties output");
                    State::Legacy { supplementary: true }
                } else {
                    State::Done
                }
            }
            Err(error) if error.is_unrecognized_option() => {
                debug!(path = %exe.display(), "properties flag unsupported, using -version");
                State::Legacy {
                    supplementary: false,
                }
            }
            Err(error) => {
                analysis.record_failure(ProbeProfile::Properties, elevated, &error);
                if !elevated && self.runner.can_elevate() {
                    State::Properties { elevated: true }
                } else {
                    analysis.valid = false;
                    State::Legacy {
                        supplementary: false,
                    }
                }
            }
        }
    }

    async fn legacy_step(&self, exe: &Path, supplementary: bool, analysis: &mut BinaryAnalysis) {
        match self.runner.run(exe, ProbeProfile::Legacy, false).await {
            Ok(output) => {
                analysis.apply_version_output(&output);
                if !supplementary {
                    analysis.valid = true;
                }
            }
            Err(error) => {
                analysis.record_failure(ProbeProfile::Legacy, false, &error);
                if !supplementary {
                    analysis.valid = false;
                }
            }
        }
    }
}
