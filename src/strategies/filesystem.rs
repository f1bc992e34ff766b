//! Filesystem walk for `java` / `java.exe` files.

use super::is_java_name;
use crate::{Candidate, DiscoveryError, ScanOptions};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Collect every file named `java` or `java.exe` below `roots`.
///
/// Entries whose path matches `exclude` are pruned together with their
/// subtree. Unreadable entries and missing roots are skipped. Symlinks are
/// not followed, so an installation is reported under its real location
/// only once.
pub fn collect_java_files(roots: &[PathBuf], exclude: Option<&Regex>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in roots {
        if !root.exists() {
            debug!(root = %root.display(), "skipping non-existent root path");
            continue;
        }
        info!(root = %root.display(), "scanning root path");

        let found: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry.path(), exclude))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| !entry.file_type().is_dir())
            .filter(|entry| entry.file_name().to_str().is_some_and(is_java_name))
            .map(|entry| entry.into_path())
            .collect();

        info!(root = %root.display(), count = found.len(), "file system scan finished");
        files.extend(found);
    }

    files
}

fn is_excluded(path: &Path, exclude: Option<&Regex>) -> bool {
    exclude.is_some_and(|regex| regex.is_match(&path.to_string_lossy()))
}

pub(super) async fn discover(options: &ScanOptions) -> Result<Vec<Candidate>, DiscoveryError> {
    let exclude = options.exclusion_regex()?;
    let roots = options.root_paths.clone();

    let files = tokio::task::spawn_blocking(move || collect_java_files(&roots, exclude.as_ref()))
        .await
        .map_err(|e| DiscoveryError::Task(e.to_string()))?;

    Ok(files.into_iter().map(Candidate::from_path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_collects_java_files() {
        let dir = tempfile::tempdir().unwrap();
        let jdk8 = dir.path().join("jdk1.8.0_202/bin/java");
        let jdk11 = dir.path().join("jdk-11.0.2/bin/java");
        let windows = dir.path().join("win/jre/bin/JAVA.EXE");
        touch(&jdk8);
        touch(&jdk11);
        touch(&windows);
        touch(&dir.path().join("jdk-11.0.2/bin/javac"));
        touch(&dir.path().join("jdk-11.0.2/bin/javaw.exe"));

        let mut files = collect_java_files(&[dir.path().to_path_buf()], None);
        files.sort();

        let mut expected = vec![jdk8, jdk11, windows];
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_exclusions_prune_subtrees() {
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("opt/jdk/bin/java");
        touch(&kept);
        touch(&dir.path().join("backup/jdk/bin/java"));

        let exclude = Regex::new("backup").unwrap();
        let files = collect_java_files(&[dir.path().to_path_buf()], Some(&exclude));
        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn test_directory_named_java_is_not_a_candidate() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("share/java")).unwrap();

        let files = collect_java_files(&[dir.path().to_path_buf()], None);
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let files = collect_java_files(&[PathBuf::from("/nonexistent/root/for/java/scan")], None);
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_discover_with_options() {
        let dir = tempfile::tempdir().unwrap();
        let java = dir.path().join("jdk/bin/java");
        touch(&java);

        let options = ScanOptions {
            root_paths: vec![dir.path().to_path_buf()],
            ..Default::default()
        };
        let candidates = discover(&options).await.unwrap();
        assert_eq!(candidates, vec![Candidate::from_path(java)]);
    }

    #[tokio::test]
    async fn test_discover_rejects_bad_pattern() {
        let options = ScanOptions {
            exclude_patterns: vec!["[".to_string()],
            ..Default::default()
        };
        let result = discover(&options).await;
        assert!(matches!(result, Err(DiscoveryError::InvalidExcludePattern(_))));
    }
}
