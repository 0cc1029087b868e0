//! Emitted artifacts and their output layout.
//!
//! Artifacts live under kind-partitioned subtrees of the output root:
//! `js/<name>.js`, `css/<name>.css`, and `js/<name>.js.map`.

use std::path::PathBuf;

/// Kind of an emitted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Bundled script
    Script,
    /// Bundled stylesheet
    Stylesheet,
    /// Debug map for a script
    Map,
}

impl ArtifactKind {
    /// Subdirectory under the output root for this kind.
    pub fn dir(&self) -> &'static str {
        match self {
            ArtifactKind::Script | ArtifactKind::Map => "js",
            ArtifactKind::Stylesheet => "css",
        }
    }

    /// File extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Script => "js",
            ArtifactKind::Stylesheet => "css",
            ArtifactKind::Map => "js.map",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Script => write!(f, "script"),
            ArtifactKind::Stylesheet => write!(f, "stylesheet"),
            ArtifactKind::Map => write!(f, "map"),
        }
    }
}

/// One artifact ready for the output writer.
#[derive(Debug, Clone)]
pub struct EmittedArtifact {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Logical name, derived from the entry name
    pub name: String,
    /// Byte payload
    pub bytes: Vec<u8>,
}

impl EmittedArtifact {
    /// Create an artifact.
    pub fn new(kind: ArtifactKind, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { kind, name: name.into(), bytes }
    }

    /// Deterministic path relative to the output root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.kind.dir()).join(format!("{}.{}", self.name, self.kind.extension()))
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
