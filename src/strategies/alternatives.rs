//! `update-alternatives --list java` query.

use crate::{Candidate, DiscoveryError, ScanOptions};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::info;

const COMMAND: &str = "update-alternatives";
const ARGS: &[&str] = &["--list", "java"];

/// Turn `update-alternatives --list` output into candidates, one per line.
///
/// # Example
///
/// ```rust
/// use java_scanner::strategies::parse_alternatives;
///
/// let candidates = parse_alternatives("/usr/lib/jvm/java-11/bin/java\n\n");
/// assert_eq!(candidates.len(), 1);
/// ```
pub fn parse_alternatives(output: &str) -> Vec<Candidate> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Candidate::from_path)
        .collect()
}

pub(super) async fn discover(options: &ScanOptions) -> Result<Vec<Candidate>, DiscoveryError> {
    let command_line = format!("{COMMAND} {}", ARGS.join(" "));
    let failed = |message: String| DiscoveryError::CommandFailed {
        command: command_line.clone(),
        message,
    };

    let output = timeout(
        options.probe_timeout,
        Command::new(COMMAND)
            .args(ARGS)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| failed(format!("timed out after {:?}", options.probe_timeout)))?
    .map_err(|e| failed(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(failed(format!(
            "exited with {:?}: {}",
            output.status.code(),
            stderr.trim()
        )));
    }

    let candidates = parse_alternatives(&String::from_utf8_lossy(&output.stdout));
    info!(count = candidates.len(), "detected java alternatives");
    Ok(candidates)
}
