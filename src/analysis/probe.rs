//! Probe execution with timeout and optional elevation.

use crate::{ProbeError, ScanOptions};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Argument set a probe runs the candidate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeProfile {
    /// `-XshowSettings:properties -version`: key/value output, Java 7+.
    Properties,
    /// `-version`: positional output understood by every JVM.
    Legacy,
}

impl ProbeProfile {
    /// Command-line arguments for this profile.
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Properties => &["-XshowSettings:properties", "-version"],
            Self::Legacy => &["-version"],
        }
    }

    /// Short label used in error trails and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Properties => "properties probe",
            Self::Legacy => "version probe",
        }
    }
}

/// Runs a candidate executable with a probe profile.
///
/// The analyzer is generic over this trait so its fallback logic can be
/// driven by scripted output in tests.
#[allow(async_fn_in_trait)]
pub trait ProbeRunner {
    /// Run `exe` with `profile`, optionally through the elevation wrapper.
    ///
    /// Returns the combined stdout and stderr of a successful run.
    async fn run(
        &self,
        exe: &Path,
        profile: ProbeProfile,
        elevated: bool,
    ) -> Result<String, ProbeError>;

    /// Whether elevated runs are possible at all.
    fn can_elevate(&self) -> bool;
}

/// [`ProbeRunner`] that spawns real processes.
///
/// A run that exceeds the timeout is killed with `SIGKILL`. For elevated
/// runs that signal reaches the elevation wrapper only: `sudo` cannot relay
/// `SIGKILL`, and the JVM it started runs as another user, so a hung
/// elevated JVM may outlive the probe.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    timeout: Duration,
    elevation_command: Vec<String>,
}

impl CommandProbe {
    /// Create a probe with a per-run timeout and an elevation command
    /// (e.g. `["sudo", "-n"]`; empty disables elevation).
    pub fn new(timeout: Duration, elevation_command: Vec<String>) -> Self {
        Self {
            timeout,
            elevation_command,
        }
    }

    /// Build a probe from scan options.
    pub fn from_options(options: &ScanOptions) -> Self {
        Self::new(options.probe_timeout, options.elevation_command.clone())
    }

    fn command(
        &self,
        exe: &Path,
        profile: ProbeProfile,
        elevated: bool,
    ) -> Result<(PathBuf, Command), ProbeError> {
        let (program, mut command) = if elevated {
            let (program, wrapper_args) = self
                .elevation_command
                .split_first()
                .ok_or(ProbeError::ElevationUnavailable)?;
            let mut command = Command::new(program);
            command.args(wrapper_args).arg(exe);
            (PathBuf::from(program), command)
        } else {
            (exe.to_path_buf(), Command::new(exe))
        };

        command
            .args(profile.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok((program, command))
    }
}

impl ProbeRunner for CommandProbe {
    async fn run(
        &self,
        exe: &Path,
        profile: ProbeProfile,
        elevated: bool,
    ) -> Result<String, ProbeError> {
        let (program, mut command) = self.command(exe, profile, elevated)?;
        debug!(path = %exe.display(), probe = profile.label(), elevated, "running probe");

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| ProbeError::Timeout {
                timeout: self.timeout,
            })?
            .map_err(|source| ProbeError::Spawn { program, source })?;

        let combined = combine_output(&output.stdout, &output.stderr);
        if !output.status.success() {
            return Err(ProbeError::Failed {
                code: output.status.code(),
                output: combined,
            });
        }
        Ok(combined)
    }

    fn can_elevate(&self) -> bool {
        !self.elevation_command.is_empty()
    }
}

/// Join stdout and stderr; JVMs print version and settings on stderr.
fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    if !combined.is_empty() && !combined.ends_with('\n') && !stderr.is_empty() {
        combined.push('\n');
    }
    combined.push_str(&String::from_utf8_lossy(stderr));
    combined
}
