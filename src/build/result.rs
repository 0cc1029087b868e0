//! Build reporting types.
//!
//! One `EntryReport` per entry in the graph, collected into a `BuildReport`
//! that the CLI renders. Failed entries carry their error message; built
//! entries list what they wrote.

use crate::build::budget::BudgetViolation;
use crate::build::emit::{WriteError, WrittenArtifact};
use std::time::Duration;

/// Outcome of building one entry.
#[derive(Debug, Clone)]
pub enum EntryStatus {
    /// All artifacts produced
    Built,
    /// The entry failed; no artifacts were written for it
    Failed(String),
}

/// Per-entry build record.
#[derive(Debug)]
pub struct EntryReport {
    /// Entry name
    pub name: String,
    /// Outcome
    pub status: EntryStatus,
    /// Artifacts written for this entry
    pub artifacts: Vec<WrittenArtifact>,
    /// Non-fatal notices (e.g. a withheld debug map)
    pub warnings: Vec<String>,
}

impl EntryReport {
    /// Whether the entry built successfully.
    pub fn is_built(&self) -> bool {
        matches!(self.status, EntryStatus::Built)
    }
}

/// Complete result of a build run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Per-entry outcomes, in graph order
    pub entries: Vec<EntryReport>,
    /// Budget violations across all written artifacts
    pub violations: Vec<BudgetViolation>,
    /// IO failures from the write stage
    pub write_errors: Vec<WriteError>,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl BuildReport {
    /// Number of entries that built.
    pub fn built_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_built()).count()
    }

    /// Number of entries that failed.
    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.built_count()
    }

    /// Total bytes written.
    pub fn bytes_written(&self) -> u64 {
        self.entries.iter().flat_map(|e| e.artifacts.iter()).map(|a| a.size).sum()
    }

    /// Whether the run produced everything it was asked for.
    ///
    /// Budget violations do not affect this; the caller decides whether they
    /// are fatal.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0 && self.write_errors.is_empty()
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        format!(
            "{} built, {} failed, {} bytes in {:.2}s",
            self.built_count(),
            self.failed_count(),
            self.bytes_written(),
            self.duration.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::artifact::ArtifactKind;
    use std::path::PathBuf;

    fn built(name: &str, size: u64) -> EntryReport {
        EntryReport {
            name: name.to_string(),
            status: EntryStatus::Built,
            artifacts: vec![WrittenArtifact {
                entry: name.to_string(),
                kind: ArtifactKind::Script,
                relative_path: PathBuf::from(format!("js/{name}.js")),
                size,
            }],
            warnings: Vec::new(),
        }
    }

    fn failed(name: &str, msg: &str) -> EntryReport {
        EntryReport {
            name: name.to_string(),
            status: EntryStatus::Failed(msg.to_string()),
            artifacts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_report_counts() {
        let report = BuildReport {
            entries: vec![built("index", 100), built("dark", 50), failed("bad", "syntax error")],
            ..BuildReport::default()
        };

        assert_eq!(report.built_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.bytes_written(), 150);
        assert!(!report.is_success());
    }

    #[test]
    fn test_report_success() {
        let report =
            BuildReport { entries: vec![built("index", 10)], ..BuildReport::default() };
        assert!(report.is_success());
        assert!(report.summary().contains("1 built, 0 failed"));
    }

    #[test]
    fn test_violations_do_not_fail_report() {
        use crate::build::budget::{BudgetScope, BudgetViolation};

        let report = BuildReport {
            entries: vec![built("index", 10)],
            violations: vec![BudgetViolation {
                name: "js/index.js".to_string(),
                scope: BudgetScope::Asset,
                size: 600_000,
                limit: 512_000,
            }],
            ..BuildReport::default()
        };
        assert!(report.is_success());
    }
}
