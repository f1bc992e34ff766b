//! Version string grammar for `java -version` and `-XshowSettings` output.
//!
//! All functions are pure: a parse miss yields an empty string or the
//! `(0, 0)` sentinel, never an error.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Property key holding the vendor name.
pub const VENDOR_KEY: &str = "java.vendor";
/// Property key holding the version token.
pub const VERSION_KEY: &str = "java.version";
/// Property key holding the runtime name.
pub const RUNTIME_NAME_KEY: &str = "java.runtime.name";

fn version_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#".*? version "(.*?)""#).expect("valid version line regex"))
}

fn version_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)\.(\d+)\.(\d+)(?:_(\d+))?").expect("valid version token regex")
    })
}

fn runtime_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\D+).*\(.*?\)").expect("valid runtime name regex"))
}

fn property_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-z.]+) = (.+)$").expect("valid property regex"))
}

/// Extract the quoted version token from a `-version` line.
///
/// - `java version "1.6.0_45"` -> `1.6.0_45`
/// - `openjdk version "11.0.2" 2019-01-15` -> `11.0.2`
///
/// Returns an empty string when the line has no `version "..."` segment.
pub fn extract_version_token(line: &str) -> String {
    version_line_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Split a version token into `(major, build)`.
///
/// Legacy tokens (`1.x.y_b`) collapse to major `x`; modern tokens (`N.x.y`)
/// use `N`. The build is the underscore update number when present and
/// nonzero, else the third dotted segment.
///
/// - `1.8.0_202` -> `(8, 202)`
/// - `11.0.2` -> `(11, 2)`
/// - `1.6.0_45-b06` -> `(6, 45)`
///
/// Tokens without three dotted numeric segments (`11`, `abc`) yield `(0, 0)`.
pub fn split_major_and_build(token: &str) -> (u32, u32) {
    let Some(caps) = version_token_regex().captures(token) else {
        return (0, 0);
    };

    let segment = |index: usize| -> u32 {
        caps.get(index)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (v1, v2, v3, v4) = (segment(1), segment(2), segment(3), segment(4));

    let build = if v4 != 0 { v4 } else { v3 };
    let major = if v1 == 1 { v2 } else { v1 };
    (major, build)
}

/// Extract the runtime name from the second line of `-version` output.
///
/// The name is the leading run of non-digit characters of a line that
/// carries a parenthesized group, trimmed:
///
/// - `Java(TM) SE Runtime Environment (build 1.6.0_45-b06)` -> `Java(TM) SE Runtime Environment`
/// - `OpenJDK Runtime Environment 18.9 (build 11.0.2+9)` -> `OpenJDK Runtime Environment`
///
/// A digit inside the name cuts it short (`... JBR-17.0.5 ...` -> `... JBR-`).
/// Lines without a parenthesized group yield an empty string.
pub fn extract_runtime_name(line: &str) -> String {
    runtime_name_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Collect `key = value` pairs from `-XshowSettings:properties` output.
///
/// Lines are trimmed first; keys must be lowercase and dotted. Continuation
/// lines of multi-valued properties and all other noise are skipped.
pub fn extract_key_value_properties(output: &str) -> HashMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let caps = property_regex().captures(line.trim())?;
            Some((caps[1].to_string(), caps[2].to_string()))
        })
        .collect()
}

/// Metadata recovered from plain `-version` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionOutput {
    /// Major version, 0 when unparsed.
    pub major_version: u32,
    /// Build number, 0 when unparsed or absent.
    pub build_number: u32,
    /// Runtime name, empty when unparsed.
    pub runtime_name: String,
}

/// Parse `-version` output positionally: version line, then runtime line.
///
/// JVMs print banners such as `Picked up _JAVA_OPTIONS: ...` before the
/// version line, so parsing starts at the first line carrying a version
/// token. Without any such line the first two lines are used as-is.
pub fn parse_version_output(output: &str) -> VersionOutput {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines
        .iter()
        .position(|line| !extract_version_token(line).is_empty())
        .unwrap_or(0);

    let token = lines
        .get(start)
        .map(|line| extract_version_token(line))
        .unwrap_or_default();
    let (major_version, build_number) = split_major_and_build(&token);
    let runtime_name = lines
        .get(start + 1)
        .map(|line| extract_runtime_name(line))
        .unwrap_or_default();

    VersionOutput {
        major_version,
        build_number,
        runtime_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_legacy_without_update() {
        assert_eq!(split_major_and_build("1.8.0"), (8, 0));
    }

    #[test]
    fn test_split_legacy_with_update() {
        assert_eq!(split_major_and_build("1.8.0_202"), (8, 202));
        assert_eq!(split_major_and_build("1.8.0_202-release"), (8, 202));
    }

    #[test]
    fn test_split_legacy_with_build_suffix() {
        assert_eq!(split_major_and_build("1.6.0_45-b06"), (6, 45));
        assert_eq!(split_major_and_build("1.5.0_22-b03"), (5, 22));
    }

    #[test]
    fn test_split_modern() {
        assert_eq!(split_major_and_build("11.0.2"), (11, 2));
        assert_eq!(split_major_and_build("17.0.5"), (17, 5));
        assert_eq!(split_major_and_build("11.0.12"), (11, 12));
        assert_eq!(split_major_and_build("21.0.1+12-LTS"), (21, 1));
    }

    #[test]
    fn test_split_zero_update_falls_back_to_third_segment() {
        assert_eq!(split_major_and_build("1.7.1_00"), (7, 1));
    }

    #[test]
    fn test_split_malformed() {
        assert_eq!(split_major_and_build("11"), (0, 0));
        assert_eq!(split_major_and_build("1.8"), (0, 0));
        assert_eq!(split_major_and_build(""), (0, 0));
        assert_eq!(split_major_and_build("not a version"), (0, 0));
    }

    #[test]
    fn test_extract_version_token() {
        assert_eq!(extract_version_token("java version \"1.6.0_45\""), "1.6.0_45");
        assert_eq!(extract_version_token("java version \"1.5.0_22\""), "1.5.0_22");
        assert_eq!(
            extract_version_token("java version \"11.0.3\" 2019-04-16 LTS"),
            "11.0.3"
        );
        assert_eq!(extract_version_token("openjdk version \"11.0.2\""), "11.0.2");
    }

    #[test]
    fn test_extract_version_token_no_match() {
        assert_eq!(extract_version_token("Picked up _JAVA_OPTIONS: -Xmx1g"), "");
        assert_eq!(extract_version_token("version 11.0.2"), "");
        assert_eq!(extract_version_token(""), "");
    }

    #[test]
    fn test_extract_runtime_name() {
        assert_eq!(
            extract_runtime_name("Java(TM) SE Runtime Environment (build 1.6.0_45-b06)"),
            "Java(TM) SE Runtime Environment"
        );
        assert_eq!(
            extract_runtime_name("OpenJDK Runtime Environment 18.9 (build 11.0.2+9)"),
            "OpenJDK Runtime Environment"
        );
    }

    #[test]
    fn test_extract_runtime_name_truncates_at_digit() {
        assert_eq!(
            extract_runtime_name(
                "OpenJDK Runtime Environment JBR-17.0.5+1-653.14-jcef (build 17.0.5+1-b653.14)"
            ),
            "OpenJDK Runtime Environment JBR-"
        );
    }

    #[test]
    fn test_extract_runtime_name_without_parenthesis() {
        assert_eq!(extract_runtime_name("OpenJDK Runtime Environment"), "");
        assert_eq!(extract_runtime_name(""), "");
    }

    #[test]
    fn test_extract_key_value_properties() {
        let output = "Property settings:\n    \
            file.encoding = UTF-8\n    \
            java.class.path = \n    \
            java.library.path = /usr/java/packages/lib\n        \
            /usr/lib64\n    \
            java.runtime.name = Java(TM) SE Runtime Environment\n    \
            java.vendor = Oracle Corporation\n    \
            java.version = 1.8.0_211\n    \
            sun.arch.data.model = 64\n    \
            Some.Mixed.Case = skipped\n\n\
            java version \"1.8.0_211\"\n";

        let props = extract_key_value_properties(output);
        assert_eq!(props.get(VENDOR_KEY).map(String::as_str), Some("Oracle Corporation"));
        assert_eq!(props.get(VERSION_KEY).map(String::as_str), Some("1.8.0_211"));
        assert_eq!(
            props.get(RUNTIME_NAME_KEY).map(String::as_str),
            Some("Java(TM) SE Runtime Environment")
        );
        assert_eq!(props.get("file.encoding").map(String::as_str), Some("UTF-8"));
        assert!(!props.contains_key("java.class.path"));
        assert!(!props.contains_key("Some.Mixed.Case"));
        assert!(!props.contains_key("/usr/lib64"));
    }

    #[test]
    fn test_extract_key_value_properties_empty() {
        assert!(extract_key_value_properties("").is_empty());
        assert!(extract_key_value_properties("java version \"1.6.0_45\"").is_empty());
    }

    #[test]
    fn test_parse_version_output_legacy() {
        let output = "java version \"1.5.0_22\"\n\
            Java(TM) 2 Runtime Environment, Standard Edition (build 1.5.0_22-b03)\n\
            Java HotSpot(TM) Client VM (build 1.5.0_22-b03, mixed mode, sharing)\n";
        let parsed = parse_version_output(output);
        assert_eq!(parsed.major_version, 5);
        assert_eq!(parsed.build_number, 22);
        assert_eq!(parsed.runtime_name, "Java(TM)");
    }

    #[test]
    fn test_parse_version_output_skips_banner() {
        let output = "Picked up _JAVA_OPTIONS: -Xmx512m\n\
            openjdk version \"11.0.2\" 2019-01-15\n\
            OpenJDK Runtime Environment 18.9 (build 11.0.2+9)\n";
        let parsed = parse_version_output(output);
        assert_eq!(parsed.major_version, 11);
        assert_eq!(parsed.build_number, 2);
        assert_eq!(parsed.runtime_name, "OpenJDK Runtime Environment");
    }

    #[test]
    fn test_parse_version_output_garbage() {
        assert_eq!(parse_version_output(""), VersionOutput::default());
        assert_eq!(
            parse_version_output("something else entirely"),
            VersionOutput::default()
        );
    }

    #[test]
    fn test_grammar_is_deterministic() {
        let line = "Java(TM) SE Runtime Environment (build 1.8.0_211-b12)";
        assert_eq!(extract_runtime_name(line), extract_runtime_name(line));
        assert_eq!(split_major_and_build("1.8.0_211"), split_major_and_build("1.8.0_211"));
    }
}
