//! Entry graph construction.
//!
//! Merges static entries from the configuration with discovered theme
//! variants into one ordered mapping of entry name to ordered source list.
//! All validation here is eager: name collisions, empty source lists, and
//! missing files surface before any transform work begins, so a broken
//! configuration never produces partial output.

use crate::build::context::BuildContext;
use crate::build::discovery::{discover_variants, variant_name, DiscoveryError};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-level error raised while assembling the entry graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// A static entry and a discovered theme claim the same name
    #[error("entry name collision: '{name}' is declared in [entries] and discovered as theme '{}'", theme.display())]
    NameCollision { name: String, theme: PathBuf },

    /// An entry lists no source files
    #[error("entry '{name}' has an empty source list")]
    EmptySources { name: String },

    /// A referenced source file does not exist
    #[error("entry '{entry}': source file not found: {}", path.display())]
    MissingSource { entry: String, path: PathBuf },

    /// A discovered theme file has no usable stem
    #[error("cannot derive an entry name from theme file: {}", path.display())]
    UnnamableTheme { path: PathBuf },

    /// Theme discovery failed
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// Where an entry came from, kept for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOrigin {
    /// Declared in the [entries] table
    Static,
    /// Synthesized from a discovered theme variant file
    Theme,
}

/// A named unit of build output backed by an ordered list of source files.
///
/// Never mutated after graph construction; the pruner operates on emitted
/// artifacts, not on the graph.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Unique entry name (artifact logical name)
    pub name: String,
    /// Ordered source paths; order determines concatenation order
    pub sources: Vec<PathBuf>,
    /// Provenance of this entry
    pub origin: EntryOrigin,
}

/// The merged, validated entry graph.
#[derive(Debug, Default)]
pub struct EntryGraph {
    entries: Vec<Entry>,
}

impl EntryGraph {
    /// Build the graph from the context's configuration.
    ///
    /// Static entries come first in declaration (map) order, then discovered
    /// themes sorted by path. Performs path-level checks only; no file
    /// contents are read here.
    pub fn build(ctx: &BuildContext) -> Result<Self, GraphError> {
        let config = ctx.config();
        let mut entries = Vec::new();
        let mut names: HashSet<String> = HashSet::new();

        for (name, entry_config) in &config.entries {
            if entry_config.sources.is_empty() {
                return Err(GraphError::EmptySources { name: name.clone() });
            }
            let sources =
                entry_config.sources.iter().map(|p| ctx.resolve_path(p)).collect();
            names.insert(name.clone());
            entries.push(Entry { name: name.clone(), sources, origin: EntryOrigin::Static });
        }

        if let Some(themes) = &config.themes {
            let dir = ctx.resolve_path(&themes.dir);
            for path in discover_variants(&dir, &themes.extension)? {
                let name = variant_name(&path)
                    .ok_or_else(|| GraphError::UnnamableTheme { path: path.clone() })?;
                if !names.insert(name.clone()) {
                    return Err(GraphError::NameCollision { name, theme: path });
                }
                entries.push(Entry { name, sources: vec![path], origin: EntryOrigin::Theme });
            }
        }

        for entry in &entries {
            for path in &entry.sources {
                if !path.is_file() {
                    return Err(GraphError::MissingSource {
                        entry: entry.name.clone(),
                        path: path.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// All entries, static first then discovered themes.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries in the graph.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipeConfig;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_file(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(&path).unwrap().write_all(b"x").unwrap();
        path
    }

    fn context(root: &Path, toml: &str) -> BuildContext {
        let config: PipeConfig = toml::from_str(toml).unwrap();
        BuildContext::new(config, root.to_path_buf())
    }

    #[test]
    fn test_graph_merges_static_and_themes() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "js/index.js");
        create_file(temp.path(), "themes/dark.less");
        create_file(temp.path(), "themes/light.less");

        let ctx = context(
            temp.path(),
            r#"
[project]
name = "site"

[entries.index]
sources = ["js/index.js"]

[themes]
dir = "themes"
"#,
        );

        let graph = EntryGraph::build(&ctx).unwrap();
        assert_eq!(graph.len(), 3);

        let names: Vec<_> = graph.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["index", "dark", "light"]);

        assert_eq!(graph.get("index").unwrap().origin, EntryOrigin::Static);
        assert_eq!(graph.get("dark").unwrap().origin, EntryOrigin::Theme);
    }

    #[test]
    fn test_graph_without_themes_section() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "a.js");

        let ctx = context(
            temp.path(),
            r#"
[project]
name = "site"

[entries.main]
sources = ["a.js"]
"#,
        );

        let graph = EntryGraph::build(&ctx).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_graph_name_collision() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "dark.js");
        create_file(temp.path(), "themes/dark.less");

        let ctx = context(
            temp.path(),
            r#"
[project]
name = "site"

[entries.dark]
sources = ["dark.js"]

[themes]
dir = "themes"
"#,
        );

        let err = EntryGraph::build(&ctx).unwrap_err();
        match err {
            GraphError::NameCollision { name, theme } => {
                assert_eq!(name, "dark");
                assert!(theme.ends_with("dark.less"));
            }
            other => panic!("expected NameCollision, got {other:?}"),
        }
    }

    #[test]
    fn test_graph_missing_source() {
        let temp = TempDir::new().unwrap();

        let ctx = context(
            temp.path(),
            r#"
[project]
name = "site"

[entries.index]
sources = ["missing.js"]
"#,
        );

        let err = EntryGraph::build(&ctx).unwrap_err();
        assert!(matches!(err, GraphError::MissingSource { .. }));
        assert!(err.to_string().contains("missing.js"));
    }

    #[test]
    fn test_graph_preserves_source_order() {
        let temp = TempDir::new().unwrap();
        create_file(temp.path(), "b.js");
        create_file(temp.path(), "a.js");
        create_file(temp.path(), "c.less");

        let ctx = context(
            temp.path(),
            r#"
[project]
name = "site"

[entries.index]
sources = ["b.js", "a.js", "c.less"]
"#,
        );

        let graph = EntryGraph::build(&ctx).unwrap();
        let sources = &graph.get("index").unwrap().sources;
        assert!(sources[0].ends_with("b.js"));
        assert!(sources[1].ends_with("a.js"));
        assert!(sources[2].ends_with("c.less"));
    }

    #[test]
    fn test_graph_missing_themes_dir_is_error() {
        let temp = TempDir::new().unwrap();

        let ctx = context(
            temp.path(),
            r#"
[project]
name = "site"

[themes]
dir = "themes"
"#,
        );

        let err = EntryGraph::build(&ctx).unwrap_err();
        assert!(matches!(err, GraphError::Discovery(_)));
    }
}
