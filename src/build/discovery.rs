//! Theme variant discovery.
//!
//! Scans the configured themes directory for stylesheet variants; every match
//! becomes its own entry named after the file's stem. Results are sorted by
//! path string so the merged graph never depends on filesystem iteration
//! order.

use glob::glob;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error during theme variant discovery.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The configured themes directory does not exist
    #[error("themes directory not found: {0}")]
    MissingDir(PathBuf),

    /// Glob pattern could not be built from the directory path
    #[error("invalid theme pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A matched path could not be read during enumeration
    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Discover theme variant files in `dir` with the given extension.
///
/// Returns matching file paths sorted by path string. A missing directory is
/// an error: discovery was explicitly configured, so pointing it at nothing
/// is a misconfiguration rather than an empty result.
pub fn discover_variants(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::MissingDir(dir.to_path_buf()));
    }

    let pattern = dir.join(format!("*.{extension}"));
    let pattern_str = pattern.to_string_lossy().into_owned();

    let paths = glob(&pattern_str)
        .map_err(|source| DiscoveryError::InvalidPattern { pattern: pattern_str.clone(), source })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(DiscoveryError::Unreadable { path, source: e.into_error() });
            }
        }
    }

    files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    Ok(files)
}

/// Derive an entry name from a variant file (stem, extension stripped).
pub fn variant_name(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().write_all(b"body {}").unwrap();
        path
    }

    #[test]
    fn test_discover_variants_sorted() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "light.less");
        create_file(temp.path(), "dark.less");
        create_file(temp.path(), "arc.less");

        let found = discover_variants(temp.path(), "less").unwrap();
        let names: Vec<_> = found.iter().filter_map(|p| variant_name(p)).collect();
        assert_eq!(names, vec!["arc", "dark", "light"]);
    }

    #[test]
    fn test_discover_variants_filters_extension() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "dark.less");
        create_file(temp.path(), "notes.txt");

        let found = discover_variants(temp.path(), "less").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("dark.less"));
    }

    #[test]
    fn test_discover_variants_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub.less")).unwrap();
        create_file(temp.path(), "dark.less");

        let found = discover_variants(temp.path(), "less").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_discover_variants_empty_dir() {
        let temp = TempDir::new().unwrap();
        let found = discover_variants(temp.path(), "less").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_variants_missing_dir() {
        let temp = TempDir::new().unwrap();
        let result = discover_variants(&temp.path().join("nope"), "less");
        assert!(matches!(result, Err(DiscoveryError::MissingDir(_))));
    }

    #[test]
    fn test_variant_name() {
        assert_eq!(variant_name(Path::new("themes/dark.less")), Some("dark".to_string()));
        assert_eq!(variant_name(Path::new("arc-green.less")), Some("arc-green".to_string()));
    }
}
