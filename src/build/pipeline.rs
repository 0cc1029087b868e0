//! The build pipeline: transform, assemble, prune, write, check.
//!
//! Entries are independent by construction, so the transform stage fans out
//! across a rayon worker pool and fans back in by graph index, keeping reports
//! and output deterministic regardless of scheduling. Failures are isolated
//! per entry; one broken source never blocks its siblings unless fail-fast is
//! requested.

use crate::build::artifact::{ArtifactKind, EmittedArtifact};
use crate::build::budget::check_budget;
use crate::build::context::BuildContext;
use crate::build::emit::write_artifacts;
use crate::build::graph::{Entry, EntryGraph, GraphError};
use crate::build::prune::is_trivial_script;
use crate::build::result::{BuildReport, EntryReport, EntryStatus};
use crate::sourcemap::{count_lines, ArtifactMap, LineMap};
use crate::transform::{classify, ChainError, ChainRegistry, SourceKind, TransformContext};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Fatal pipeline error. Per-entry failures are reported, not raised.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The entry graph could not be assembled
    #[error(transparent)]
    Config(#[from] GraphError),

    /// The worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Fail-fast was requested and an entry failed
    #[error("entry '{entry}' failed: {message}")]
    FailFast { entry: String, message: String },
}

/// Failure of a single entry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EntryError {
    /// A source file has an extension no chain handles
    #[error("unsupported file type: {}", path.display())]
    UnsupportedFileType { path: PathBuf },

    /// A source file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transform unit rejected a source file
    #[error("{}: {source}", path.display())]
    Transform {
        path: PathBuf,
        #[source]
        source: ChainError,
    },
}

/// Transformed output of one source file.
struct SourcePart {
    /// Source label used in map sections, relative to the project root
    source: String,
    bytes: Vec<u8>,
    map: Option<LineMap>,
}

/// Assembled but not yet written output of one entry.
struct EntryOutput {
    script: Option<Vec<u8>>,
    script_map: Option<ArtifactMap>,
    stylesheet: Option<Vec<u8>>,
    has_script_sources: bool,
    warnings: Vec<String>,
}

/// Orchestrates a full build over a context.
pub struct BuildPipeline {
    context: BuildContext,
    chains: ChainRegistry,
    jobs: usize,
    fail_fast: bool,
}

impl BuildPipeline {
    /// Pipeline with the built-in transform chains.
    pub fn new(context: BuildContext) -> Self {
        Self { context, chains: ChainRegistry::builtin(), jobs: 0, fail_fast: false }
    }

    /// Replace the chain registry, for external transform units.
    pub fn with_chains(mut self, chains: ChainRegistry) -> Self {
        self.chains = chains;
        self
    }

    /// Limit the worker pool; zero means one worker per core.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Abort the run on the first failed entry instead of reporting it.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Run the build: graph, transform, prune, write, budget.
    ///
    /// Graph errors abort before anything is written. With fail-fast, a
    /// failed entry also aborts before the write stage, so the output tree
    /// is untouched.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();
        let graph = EntryGraph::build(&self.context)?;

        if self.context.is_verbose() {
            println!("building {} entries", graph.len());
        }

        let pool = rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build()?;
        let outputs: Vec<Result<EntryOutput, EntryError>> = pool.install(|| {
            graph.entries().par_iter().map(|entry| self.process_entry(entry)).collect()
        });

        if self.fail_fast {
            for (entry, output) in graph.entries().iter().zip(&outputs) {
                if let Err(e) = output {
                    return Err(BuildError::FailFast {
                        entry: entry.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let out_root = self.context.out_dir();
        let mut report = BuildReport::default();

        for (entry, output) in graph.entries().iter().zip(outputs) {
            match output {
                Ok(out) => {
                    let artifacts = self.plan_artifacts(&entry.name, &out);
                    let (written, errors) = write_artifacts(&out_root, &entry.name, &artifacts);

                    if self.context.is_verbose() {
                        for artifact in &written {
                            println!("  {} ({} bytes)", artifact.relative_path.display(), artifact.size);
                        }
                    }

                    report.write_errors.extend(errors);
                    report.entries.push(EntryReport {
                        name: entry.name.clone(),
                        status: EntryStatus::Built,
                        artifacts: written,
                        warnings: out.warnings,
                    });
                }
                Err(e) => {
                    report.entries.push(EntryReport {
                        name: entry.name.clone(),
                        status: EntryStatus::Failed(e.to_string()),
                        artifacts: Vec::new(),
                        warnings: Vec::new(),
                    });
                }
            }
        }

        let written: Vec<_> =
            report.entries.iter().flat_map(|e| e.artifacts.iter().cloned()).collect();
        report.violations = check_budget(&written, &self.context.config().budget);
        report.duration = start.elapsed();
        Ok(report)
    }

    /// Transform every source of one entry and assemble its bundles.
    fn process_entry(&self, entry: &Entry) -> Result<EntryOutput, EntryError> {
        let mut script_parts: Vec<SourcePart> = Vec::new();
        let mut style_parts: Vec<SourcePart> = Vec::new();
        let mut has_script_sources = false;

        for path in &entry.sources {
            let kind = classify(path)
                .ok_or_else(|| EntryError::UnsupportedFileType { path: path.clone() })?;
            let input = std::fs::read(path)
                .map_err(|source| EntryError::Read { path: path.clone(), source })?;

            let ctx = TransformContext {
                source_path: path.clone(),
                entry_name: entry.name.clone(),
            };
            let transform_err =
                |source: ChainError| EntryError::Transform { path: path.clone(), source };

            let label = self.source_label(path);
            match kind {
                SourceKind::Script => {
                    has_script_sources = true;
                    let out =
                        self.chains.chain_for(kind).apply(&input, &ctx).map_err(transform_err)?;
                    script_parts.push(SourcePart { source: label, bytes: out.bytes, map: out.map });
                }
                SourceKind::Component => {
                    has_script_sources = true;
                    // compile first, then the compiled fragment re-enters the
                    // script chain; the two maps compose back to the component
                    let compiled =
                        self.chains.chain_for(kind).apply(&input, &ctx).map_err(transform_err)?;
                    let out = self
                        .chains
                        .script_chain()
                        .apply(&compiled.bytes, &ctx)
                        .map_err(transform_err)?;
                    let map = match (out.map, compiled.map) {
                        (Some(step), Some(upstream)) => Some(step.compose(&upstream)),
                        _ => None,
                    };
                    script_parts.push(SourcePart { source: label, bytes: out.bytes, map });
                }
                SourceKind::Stylesheet => {
                    let out =
                        self.chains.chain_for(kind).apply(&input, &ctx).map_err(transform_err)?;
                    style_parts.push(SourcePart { source: label, bytes: out.bytes, map: out.map });
                }
            }
        }

        let mut warnings = Vec::new();
        let script = has_script_sources.then(|| join_parts(&script_parts));
        let script_map = if script.is_some() {
            self.assemble_map(&entry.name, &script_parts, &mut warnings)
        } else {
            None
        };
        let stylesheet = (!style_parts.is_empty()).then(|| join_parts(&style_parts));

        Ok(EntryOutput { script, script_map, stylesheet, has_script_sources, warnings })
    }

    /// Build the sectioned artifact map for an entry's script bundle.
    ///
    /// Excluded entries never get a map and no warning. An entry whose chain
    /// degraded its map (any section missing) gets no map either, but that
    /// one is worth a warning since the exclusion was not asked for.
    fn assemble_map(
        &self,
        name: &str,
        parts: &[SourcePart],
        warnings: &mut Vec<String>,
    ) -> Option<ArtifactMap> {
        if parts.is_empty() || self.context.config().maps.exclude.iter().any(|e| e == name) {
            return None;
        }
        if parts.iter().any(|p| p.map.is_none()) {
            warnings.push(format!("debug map withheld for '{name}': a transform emitted no map"));
            return None;
        }

        let mut map = ArtifactMap::new(format!("{name}.js"));
        let mut offset = 0u32;
        for part in parts {
            if let Some(lines) = &part.map {
                map.push_section(part.source.clone(), offset, lines.clone());
            }
            offset += count_lines(&part.bytes) as u32;
        }
        Some(map)
    }

    /// Plan the artifacts one built entry should write.
    fn plan_artifacts(&self, name: &str, out: &EntryOutput) -> Vec<EmittedArtifact> {
        let mut artifacts = Vec::new();

        if let Some(script) = &out.script {
            if is_trivial_script(out.has_script_sources, script) {
                if self.context.is_verbose() {
                    println!("  pruned empty script bundle for '{name}'");
                }
            } else {
                artifacts.push(EmittedArtifact::new(ArtifactKind::Script, name, script.clone()));
                if let Some(map) = &out.script_map {
                    match map.to_json() {
                        Ok(bytes) => {
                            artifacts.push(EmittedArtifact::new(ArtifactKind::Map, name, bytes));
                        }
                        Err(e) => {
                            // serialization of plain vectors should not fail;
                            // treat it as a withheld map rather than a crash
                            eprintln!("warning: could not serialize map for '{name}': {e}");
                        }
                    }
                }
            }
        }

        if let Some(stylesheet) = &out.stylesheet {
            artifacts.push(EmittedArtifact::new(ArtifactKind::Stylesheet, name, stylesheet.clone()));
        }

        artifacts
    }

    /// Label a source for map sections: relative to the project root when
    /// possible.
    fn source_label(&self, path: &Path) -> String {
        path.strip_prefix(self.context.project_root())
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

/// Concatenate transformed parts with single newline separators.
fn join_parts(parts: &[SourcePart]) -> Vec<u8> {
    let mut out = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 && !out.is_empty() && !part.bytes.is_empty() {
            out.push(b'\n');
        }
        out.extend_from_slice(&part.bytes);
    }
    out
}
