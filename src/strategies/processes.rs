//! Process table walk via `/proc`.

use crate::{Candidate, DiscoveryError};

/// User name of `uid`, resolved through the system user database.
///
/// Goes through `getpwuid_r`, so accounts served by NSS (LDAP, SSSD) resolve
/// as well as local ones.
#[cfg(target_os = "linux")]
fn username_of(uid: u32) -> Option<String> {
    uzers::get_user_by_uid(uid).map(|user| user.name().to_string_lossy().into_owned())
}

#[cfg(target_os = "linux")]
pub(super) fn discover() -> Result<Vec<Candidate>, DiscoveryError> {
    use super::is_java_name;
    use tracing::{debug, info};

    let processes = procfs::process::all_processes().map_err(|e| DiscoveryError::SystemSource {
        source_name: "/proc".to_string(),
        message: e.to_string(),
    })?;

    let mut candidates = Vec::new();
    for entry in processes {
        let process = match entry {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, "skipping inaccessible process");
                continue;
            }
        };
        let Ok(stat) = process.stat() else {
            continue;
        };
        if !is_java_name(&stat.comm) {
            continue;
        }

        // The exe link of another user's process is unreadable without privileges.
        let path = match process.exe() {
            Ok(path) => Some(path),
            Err(e) => {
                debug!(pid = stat.pid, error = %e, "cannot read executable of java process");
                None
            }
        };
        let username = process
            .status()
            .ok()
            .and_then(|status| username_of(status.ruid));

        candidates.push(Candidate { path, username });
    }

    info!(count = candidates.len(), "detected running java processes");
    Ok(candidates)
}

#[cfg(not(target_os = "linux"))]
pub(super) fn discover() -> Result<Vec<Candidate>, DiscoveryError> {
    Err(DiscoveryError::Unsupported {
        method: crate::DetectionMethod::RunningProcesses,
    })
}
