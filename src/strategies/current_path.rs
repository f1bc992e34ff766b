//! PATH-based lookup of the `java` launcher.

use crate::Candidate;
use tracing::{debug, info};

/// Resolve `java` on the invoking shell's PATH.
///
/// Uses the `which` crate, which follows platform rules for executable
/// extensions and permissions.
pub(super) fn discover() -> Vec<Candidate> {
    match which::which("java") {
        Ok(path) => {
            info!(path = %path.display(), "found java executable in current path");
            vec![Candidate::from_path(path)]
        }
        Err(e) => {
            debug!(error = %e, "no java executable in current path");
            Vec::new()
        }
    }
}
