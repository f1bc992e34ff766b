//! Windows registry walk below the JavaSoft vendor key.

use crate::{Candidate, DiscoveryError};
use std::collections::HashSet;

/// Vendor root key, below `HKEY_LOCAL_MACHINE`.
#[cfg_attr(not(windows), allow(dead_code))]
const JAVASOFT_KEY: &str = r"SOFTWARE\JavaSoft";

/// Launcher path for a `JavaHome` registry value.
#[cfg_attr(not(windows), allow(dead_code))]
fn launcher_path(java_home: &str) -> String {
    format!(r"{}\bin\java.exe", java_home.trim_end_matches('\\'))
}

/// Drop repeated entries, keeping the first occurrence.
#[cfg_attr(not(windows), allow(dead_code))]
fn dedup_preserving_order(paths: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

#[cfg(windows)]
pub(super) fn discover() -> Result<Vec<Candidate>, DiscoveryError> {
    use tracing::info;
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
    use winreg::RegKey;

    let root = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey_with_flags(JAVASOFT_KEY, KEY_READ)
        .map_err(|e| DiscoveryError::SystemSource {
            source_name: format!(r"HKLM\{JAVASOFT_KEY}"),
            message: e.to_string(),
        })?;

    let mut launchers = Vec::new();
    walk(&root, JAVASOFT_KEY, &mut launchers);
    let launchers = dedup_preserving_order(launchers);

    info!(count = launchers.len(), "found java binaries in registry");
    Ok(launchers.into_iter().map(Candidate::from_path).collect())
}

#[cfg(windows)]
fn walk(key: &winreg::RegKey, path: &str, launchers: &mut Vec<String>) {
    use tracing::{debug, warn};
    use winreg::enums::KEY_READ;

    if let Ok(java_home) = key.get_value::<String, _>("JavaHome") {
        launchers.push(launcher_path(&java_home));
    }

    for name in key.enum_keys().filter_map(Result::ok) {
        let child_path = format!(r"{path}\{name}");
        match key.open_subkey_with_flags(&name, KEY_READ) {
            Ok(child) => walk(&child, &child_path, launchers),
            Err(e) => warn!(key = %child_path, error = %e, "cannot open registry key"),
        }
    }
    debug!(key = %path, "registry key walked");
}

#[cfg(not(windows))]
pub(super) fn discover() -> Result<Vec<Candidate>, DiscoveryError> {
    Err(DiscoveryError::Unsupported {
        method: crate::DetectionMethod::WindowsRegistry,
    })
}
