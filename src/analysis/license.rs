//! License classification heuristic.

/// Highest Java 8 update Oracle shipped under the old public license.
const JAVA_8_LAST_PUBLIC_UPDATE: u32 = 202;

/// First major release under Oracle's post-8 LTS cadence.
const FIRST_LTS_AFTER_8: i64 = 11;

/// Releases between two LTS versions.
const LTS_CADENCE: i64 = 6;

/// Whether an installation may require a commercial Oracle license.
///
/// - any runtime whose name contains `OpenJDK` is free;
/// - an unknown major version (0) is never flagged;
/// - Java 8 is flagged after update 202;
/// - other majors are flagged when they fall on the LTS cadence
///   (11, 17, 23, ...), with signed remainder semantics, so pre-8
///   releases such as 5 also land on it.
///
/// This is an auditing heuristic, not a legal determination.
///
/// # Example
///
/// ```rust
/// use java_scanner::requires_license;
///
/// assert!(requires_license("Java(TM) SE Runtime Environment", 8, 211));
/// assert!(!requires_license("OpenJDK Runtime Environment", 17, 5));
/// ```
pub fn requires_license(runtime_name: &str, major_version: u32, build_number: u32) -> bool {
    if runtime_name.contains("OpenJDK") {
        return false;
    }
    if major_version == 0 {
        return false;
    }
    if major_version == 8 {
        return build_number > JAVA_8_LAST_PUBLIC_UPDATE;
    }
    (i64::from(major_version) - FIRST_LTS_AFTER_8) % LTS_CADENCE == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORACLE: &str = "Java(TM) SE Runtime Environment";
    const OPENJDK: &str = "OpenJDK Runtime Environment";

    #[test]
    fn test_openjdk_never_requires_license() {
        assert!(!requires_license(OPENJDK, 8, 212));
        assert!(!requires_license(OPENJDK, 11, 3));
        assert!(!requires_license(OPENJDK, 17, 0));
        assert!(!requires_license("OpenJDK Runtime Environment JBR-", 17, 5));
    }

    #[test]
    fn test_openjdk_match_is_case_sensitive() {
        assert!(requires_license("openjdk runtime", 11, 0));
    }

    #[test]
    fn test_oracle_8_public_updates() {
        assert!(!requires_license(ORACLE, 8, 202));
        assert!(!requires_license(ORACLE, 8, 0));
        assert!(requires_license(ORACLE, 8, 211));
    }

    #[test]
    fn test_oracle_lts_cadence() {
        assert!(requires_license(ORACLE, 11, 0));
        assert!(!requires_license(ORACLE, 12, 0));
        assert!(requires_license(ORACLE, 17, 0));
        assert!(requires_license(ORACLE, 23, 1));
        assert!(!requires_license(ORACLE, 21, 1));
    }

    #[test]
    fn test_legacy_majors_follow_signed_remainder() {
        assert!(requires_license(ORACLE, 5, 22));
        assert!(!requires_license(ORACLE, 6, 45));
        assert!(!requires_license(ORACLE, 7, 80));
    }

    #[test]
    fn test_unknown_version_is_not_flagged() {
        assert!(!requires_license(ORACLE, 0, 0));
        assert!(!requires_license("", 0, 0));
    }
}
