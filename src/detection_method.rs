//! Detection method enum identifying how a candidate executable was found.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// The strategy that produced a candidate Java executable.
///
/// Every [`InstallationRecord`](crate::InstallationRecord) carries the method
/// that discovered it, so a report can tell a running JVM apart from one that
/// merely sits on disk.
///
/// New strategies are added by extending this enum; the scan orchestrator
/// dispatches on it through [`DetectionMethod::discover`](crate::DetectionMethod::discover).
///
/// # Example
///
/// ```rust
/// use java_scanner::DetectionMethod;
///
/// for method in DetectionMethod::all() {
///     println!("{} (supported here: {})", method.display_name(), method.is_supported());
/// }
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMethod {
    /// Walk of configured filesystem roots.
    FileSystem,
    /// `update-alternatives --list java`.
    LinuxAlternatives,
    /// Executables of running `java` processes.
    RunningProcesses,
    /// `JavaHome` values below the JavaSoft registry key.
    WindowsRegistry,
    /// The `java` resolved on the invoking shell's PATH.
    CurrentPath,
}

impl DetectionMethod {
    /// Stable name used in reports, logs and configuration files.
    ///
    /// # Example
    ///
    /// ```rust
    /// use java_scanner::DetectionMethod;
    ///
    /// assert_eq!(DetectionMethod::FileSystem.display_name(), "file-system");
    /// assert_eq!(DetectionMethod::CurrentPath.display_name(), "current-path");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FileSystem => "file-system",
            Self::LinuxAlternatives => "linux-alternatives",
            Self::RunningProcesses => "running-processes",
            Self::WindowsRegistry => "windows-registry",
            Self::CurrentPath => "current-path",
        }
    }

    /// Whether this strategy can run on the current platform.
    ///
    /// The process table walk reads `/proc` and is Linux-only; the registry
    /// walk is Windows-only. The others run everywhere, although
    /// `update-alternatives` is normally only present on Debian-like systems.
    pub fn is_supported(&self) -> bool {
        match self {
            Self::RunningProcesses => cfg!(target_os = "linux"),
            Self::WindowsRegistry => cfg!(windows),
            Self::FileSystem | Self::LinuxAlternatives | Self::CurrentPath => true,
        }
    }

    /// Iterator over all detection methods, in report order.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }

    /// Iterator over the methods supported on this platform.
    pub fn supported() -> impl Iterator<Item = Self> {
        Self::all().filter(Self::is_supported)
    }
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
