//! Configuration schema types for `assetpipe.toml`
//!
//! Defines the structure and validation rules for a build configuration:
//! static entries, theme variant discovery, map exclusions, and budgets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Output root directory
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_out() -> PathBuf {
    PathBuf::from("public")
}

/// One static entry: an ordered list of source files.
///
/// Source order is significant; it is the concatenation order of the
/// emitted bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Ordered source file paths, relative to the project root
    pub sources: Vec<PathBuf>,
}

/// Theme variant discovery settings.
///
/// Every matching file in `dir` becomes its own entry, named after the
/// file's stem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesConfig {
    /// Directory scanned for theme variants
    pub dir: PathBuf,
    /// File extension to match (without the dot)
    #[serde(default = "default_theme_extension")]
    pub extension: String,
}

fn default_theme_extension() -> String {
    "less".to_string()
}

/// Debug map settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapsConfig {
    /// Entry names whose script artifacts never get a map
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Size budget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Maximum size in bytes for any single emitted asset
    #[serde(default = "default_budget_size")]
    pub max_asset_size: u64,
    /// Maximum combined size in bytes of one entry's emitted assets
    #[serde(default = "default_budget_size")]
    pub max_entry_size: u64,
    /// Entry names exempt from budget checks
    #[serde(default)]
    pub allow: Vec<String>,
    /// Treat budget violations as a fatal build error
    #[serde(default)]
    pub fail_on_violation: bool,
}

fn default_budget_size() -> u64 {
    512_000
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_asset_size: default_budget_size(),
            max_entry_size: default_budget_size(),
            allow: Vec::new(),
            fail_on_violation: false,
        }
    }
}

/// Complete assetpipe.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    /// Static entries, name to source list
    #[serde(default)]
    pub entries: BTreeMap<String, EntryConfig>,
    /// Theme discovery; absent means no discovery
    #[serde(default)]
    pub themes: Option<ThemesConfig>,
    /// Debug map settings
    #[serde(default)]
    pub maps: MapsConfig,
    /// Budget settings
    #[serde(default)]
    pub budget: BudgetConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "entries.index.sources")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "assetpipe.toml: '{}' {}", self.field, self.message)
    }
}

impl PipeConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.project.name.is_empty() {
            errors.push(ConfigValidationError {
                field: "project.name".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        for (name, entry) in &self.entries {
            if name.is_empty() {
                errors.push(ConfigValidationError {
                    field: "entries".to_string(),
                    message: "entry names must be non-empty".to_string(),
                });
            }
            if entry.sources.is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("entries.{}.sources", name),
                    message: "must list at least one source file".to_string(),
                });
            }
        }

        if let Some(themes) = &self.themes {
            if themes.extension.is_empty() || themes.extension.contains('.') {
                errors.push(ConfigValidationError {
                    field: "themes.extension".to_string(),
                    message: "must be a bare extension such as \"less\"".to_string(),
                });
            }
        }

        if self.budget.max_asset_size == 0 {
            errors.push(ConfigValidationError {
                field: "budget.max_asset_size".to_string(),
                message: "must be a positive byte count".to_string(),
            });
        }
        if self.budget.max_entry_size == 0 {
            errors.push(ConfigValidationError {
                field: "budget.max_entry_size".to_string(),
                message: "must be a positive byte count".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
