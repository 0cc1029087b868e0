//! Configuration loading and discovery for `assetpipe.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PipeConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("failed to parse assetpipe.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
    /// No config file could be located
    #[error("no assetpipe.toml found in this directory or any parent")]
    NotFound,
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Escalate budget violations to a fatal error
    pub fail_on_budget: Option<bool>,
}

/// Find assetpipe.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find assetpipe.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join("assetpipe.toml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an assetpipe.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()` to locate one; a build cannot run without a config, so
/// failing to find it is an error.
pub fn load_config(path: Option<&Path>) -> Result<(PipeConfig, PathBuf), ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => find_config().ok_or(ConfigError::NotFound)?,
    };

    let config = load_config_file(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<PipeConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PipeConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PipeConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.project.out = out.clone();
    }

    if let Some(fail) = overrides.fail_on_budget {
        config.budget.fail_on_violation = fail;
    }
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let path = dir.join("assetpipe.toml");
        File::create(&path).unwrap().write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path(), b"[project]\nname = \"site\"");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path(), b"[project]\nname = \"site\"");

        let subdir = temp.path().join("web_src").join("js");
        fs::create_dir_all(&subdir).unwrap();

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().unwrap();
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            br#"
[project]
name = "site"
out = "dist"

[entries.index]
sources = ["a.js"]
"#,
        );

        let (config, loaded_from) = load_config(Some(&config_path)).unwrap();
        assert_eq!(config.project.name, "site");
        assert_eq!(config.project.out, PathBuf::from("dist"));
        assert_eq!(loaded_from, config_path);
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path(), b"not toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            br#"
[project]
name = ""
"#,
        );

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let toml = r#"
[project]
name = "site"
"#;
        let mut config: PipeConfig = toml::from_str(toml).unwrap();
        let overrides = CliOverrides {
            out: Some(PathBuf::from("dist")),
            fail_on_budget: Some(true),
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.project.out, PathBuf::from("dist"));
        assert!(config.budget.fail_on_violation);
    }

    #[test]
    fn test_project_root() {
        let config_path = Path::new("/site/assetpipe.toml");
        assert_eq!(project_root(config_path), Some(Path::new("/site")));
    }
}
