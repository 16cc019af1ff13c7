//! Artifact verification - files that must exist with a real implementation

use anyhow::{anyhow, Result};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::result::ArtifactResult;
use super::stub::classify_stub;

/// Existence, size, and stub verdict for one file. Never writes to disk.
pub fn check_artifact_substance(path: &Path, threshold_lines: usize) -> ArtifactResult {
    if !path.is_file() {
        return ArtifactResult::missing(path);
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return ArtifactResult {
                details: format!("Failed to read artifact: {e}"),
                exists: true,
                ..ArtifactResult::missing(path)
            };
        }
    };
    let content = String::from_utf8_lossy(&bytes);
    let classification = classify_stub(&content, threshold_lines);
    debug!(
        path = %path.display(),
        is_stub = classification.is_stub,
        rule = classification.rule,
        "classified artifact"
    );

    ArtifactResult {
        path: path.to_path_buf(),
        exists: true,
        is_substantive: !classification.is_stub,
        is_stub: classification.is_stub,
        line_count: content.lines().count(),
        details: if classification.is_stub {
            format!("stub detected by {}", classification.rule)
        } else {
            String::new()
        },
    }
}

fn is_glob_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Resolve an artifact entry against `project_root`.
///
/// Plain paths resolve to themselves. Glob patterns expand to the matching
/// regular files in sorted order; a pattern matching nothing resolves to
/// itself so it is reported as missing.
pub fn resolve_artifact_paths(entry: &str, project_root: &Path) -> Result<Vec<PathBuf>> {
    let full = project_root.join(entry);
    if !is_glob_pattern(entry) {
        return Ok(vec![full]);
    }

    let pattern = full.to_string_lossy();
    let mut matches: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| anyhow!("Invalid artifact pattern '{entry}': {e}"))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    matches.sort();

    if matches.is_empty() {
        matches.push(full);
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::stub::DEFAULT_THRESHOLD_LINES;
    use tempfile::TempDir;

    const REAL_CODE: &str = "def add(a, b):\n    return a + b\n";

    #[test]
    fn test_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let result = check_artifact_substance(&dir.path().join("nope.py"), DEFAULT_THRESHOLD_LINES);
        assert!(!result.exists);
        assert!(!result.is_stub);
        assert!(!result.is_substantive);
        assert_eq!(result.line_count, 0);
    }

    #[test]
    fn test_directory_is_not_an_artifact() {
        let dir = TempDir::new().unwrap();
        let result = check_artifact_substance(dir.path(), DEFAULT_THRESHOLD_LINES);
        assert!(!result.exists);
    }

    #[test]
    fn test_substantive_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("math.py");
        fs::write(&path, REAL_CODE).unwrap();

        let result = check_artifact_substance(&path, DEFAULT_THRESHOLD_LINES);
        assert!(result.exists);
        assert!(result.is_substantive);
        assert!(!result.is_stub);
        assert_eq!(result.line_count, 2);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_stub_artifact_names_rule() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stub.py");
        fs::write(&path, "def f():\n    pass\n").unwrap();

        let result = check_artifact_substance(&path, DEFAULT_THRESHOLD_LINES);
        assert!(result.exists);
        assert!(result.is_stub);
        assert!(!result.is_substantive);
        assert!(result.details.contains("short_file_without_content"));
    }

    #[test]
    fn test_plain_entry_resolves_to_itself() {
        let dir = TempDir::new().unwrap();
        let paths = resolve_artifact_paths("src/app.py", dir.path()).unwrap();
        assert_eq!(paths, vec![dir.path().join("src/app.py")]);
    }

    #[test]
    fn test_glob_entry_expands_sorted_files() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("nested.py")).unwrap();
        fs::write(src.join("b.py"), REAL_CODE).unwrap();
        fs::write(src.join("a.py"), REAL_CODE).unwrap();

        let paths = resolve_artifact_paths("src/*.py", dir.path()).unwrap();
        assert_eq!(paths, vec![src.join("a.py"), src.join("b.py")]);
    }

    #[test]
    fn test_unmatched_glob_yields_single_missing_path() {
        let dir = TempDir::new().unwrap();
        let paths = resolve_artifact_paths("lib/*.rs", dir.path()).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(!check_artifact_substance(&paths[0], DEFAULT_THRESHOLD_LINES).exists);
    }

    #[test]
    fn test_invalid_glob_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_artifact_paths("src/[.py", dir.path()).is_err());
    }
}
