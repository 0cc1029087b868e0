//! Build orchestration: entry graph, transform dispatch, output writing.

pub mod artifact;
pub mod budget;
pub mod context;
pub mod discovery;
pub mod emit;
pub mod graph;
pub mod pipeline;
pub mod prune;
pub mod result;

pub use artifact::{ArtifactKind, EmittedArtifact};
pub use budget::{check_budget, BudgetScope, BudgetViolation};
pub use context::BuildContext;
pub use discovery::{discover_variants, variant_name, DiscoveryError};
pub use emit::{write_artifacts, WriteError, WrittenArtifact};
pub use graph::{Entry, EntryGraph, EntryOrigin, GraphError};
pub use pipeline::{BuildError, BuildPipeline, EntryError};
pub use prune::is_trivial_script;
pub use result::{BuildReport, EntryReport, EntryStatus};
