//! Output writing.
//!
//! Writes emitted artifacts into the kind-partitioned output tree, creating
//! directories as needed and overwriting stale files. Write failures are
//! collected per artifact instead of aborting the whole batch, so one bad
//! path never blocks sibling artifacts.

use crate::build::artifact::{ArtifactKind, EmittedArtifact};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failed artifact write.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteError {
    /// Absolute path of the artifact that failed
    pub path: PathBuf,
    /// Underlying IO error
    #[source]
    pub source: io::Error,
}

/// Record of one artifact successfully written to disk.
#[derive(Debug, Clone)]
pub struct WrittenArtifact {
    /// Entry the artifact belongs to
    pub entry: String,
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Path relative to the output root
    pub relative_path: PathBuf,
    /// Size on disk in bytes
    pub size: u64,
}

/// Write artifacts for one entry under the output root.
///
/// Successes and failures are both returned; callers decide whether failures
/// are fatal. Artifact paths are deterministic, so rebuilding over an existing
/// tree replaces exactly the files the build produces.
pub fn write_artifacts(
    out_root: &Path,
    entry: &str,
    artifacts: &[EmittedArtifact],
) -> (Vec<WrittenArtifact>, Vec<WriteError>) {
    let mut written = Vec::new();
    let mut errors = Vec::new();

    for artifact in artifacts {
        let relative = artifact.relative_path();
        let path = out_root.join(&relative);

        let result = path
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|()| fs::write(&path, &artifact.bytes));

        match result {
            Ok(()) => written.push(WrittenArtifact {
                entry: entry.to_string(),
                kind: artifact.kind,
                relative_path: relative,
                size: artifact.size(),
            }),
            Err(source) => errors.push(WriteError { path, source }),
        }
    }

    (written, errors)
}
