//! Build configuration: schema, discovery, loading, and CLI overrides.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, load_config, merge_cli_overrides, project_root, CliOverrides,
    ConfigError,
};
pub use schema::{
    BudgetConfig, ConfigValidationError, EntryConfig, MapsConfig, PipeConfig, ProjectConfig,
    ThemesConfig,
};
