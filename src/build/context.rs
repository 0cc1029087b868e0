//! Build context containing configuration and state for a build.

use crate::config::PipeConfig;
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a build operation.
///
/// The context provides access to all information needed to execute a build:
/// the configuration, the project root, and runtime flags. It is read-only
/// for the duration of a build; no mutable state crosses entry boundaries.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: PipeConfig,
    /// Project root directory (where assetpipe.toml is located)
    project_root: PathBuf,
    /// Whether to run in verbose mode
    verbose: bool,
}

impl BuildContext {
    /// Create a new build context.
    pub fn new(config: PipeConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, verbose: false }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PipeConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the output root directory (resolved to an absolute path).
    pub fn out_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.out)
    }

    /// Whether verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve a path relative to the project root.
    ///
    /// If the path is absolute, returns it unchanged.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PipeConfig {
        toml::from_str("[project]\nname = \"site\"").unwrap()
    }

    #[test]
    fn test_build_context_new() {
        let ctx = BuildContext::new(test_config(), PathBuf::from("/site"));
        assert_eq!(ctx.project_root(), Path::new("/site"));
        assert!(!ctx.is_verbose());
    }

    #[test]
    fn test_build_context_with_verbose() {
        let ctx = BuildContext::new(test_config(), PathBuf::from("/site")).with_verbose(true);
        assert!(ctx.is_verbose());
    }

    #[test]
    fn test_build_context_out_dir() {
        let ctx = BuildContext::new(test_config(), PathBuf::from("/site"));
        assert_eq!(ctx.out_dir(), PathBuf::from("/site/public"));
    }

    #[test]
    fn test_resolve_path_absolute() {
        let ctx = BuildContext::new(test_config(), PathBuf::from("/site"));
        assert_eq!(ctx.resolve_path(Path::new("/other")), PathBuf::from("/other"));
    }

    #[test]
    fn test_resolve_path_relative() {
        let ctx = BuildContext::new(test_config(), PathBuf::from("/site"));
        assert_eq!(ctx.resolve_path(Path::new("web_src")), PathBuf::from("/site/web_src"));
    }
}
