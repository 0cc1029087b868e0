//! Size budget checks over written artifacts.
//!
//! Budgets bound two things: the size of any single emitted asset, and the
//! combined size of everything one entry emits. Maps never count toward
//! either, and allow-listed entries are exempt from both.

use crate::build::artifact::ArtifactKind;
use crate::build::emit::WrittenArtifact;
use crate::config::BudgetConfig;
use std::collections::BTreeMap;

/// Which limit a violation exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetScope {
    /// A single asset exceeded `max_asset_size`
    Asset,
    /// An entry's combined assets exceeded `max_entry_size`
    Entry,
}

/// One budget violation, reported but not necessarily fatal.
#[derive(Debug, Clone)]
pub struct BudgetViolation {
    /// Asset path (for asset scope) or entry name (for entry scope)
    pub name: String,
    /// Which limit was exceeded
    pub scope: BudgetScope,
    /// Observed size in bytes
    pub size: u64,
    /// The configured limit in bytes
    pub limit: u64,
}

impl std::fmt::Display for BudgetViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scope {
            BudgetScope::Asset => write!(
                f,
                "asset '{}' is {} bytes, over the {} byte asset budget",
                self.name, self.size, self.limit
            ),
            BudgetScope::Entry => write!(
                f,
                "entry '{}' totals {} bytes, over the {} byte entry budget",
                self.name, self.size, self.limit
            ),
        }
    }
}

/// Check written artifacts against the configured budgets.
///
/// Violations come out in a stable order: asset violations in write order,
/// then entry violations sorted by entry name.
pub fn check_budget(written: &[WrittenArtifact], config: &BudgetConfig) -> Vec<BudgetViolation> {
    let mut violations = Vec::new();
    let mut entry_totals: BTreeMap<&str, u64> = BTreeMap::new();

    for artifact in written {
        if artifact.kind == ArtifactKind::Map || config.allow.contains(&artifact.entry) {
            continue;
        }
        if artifact.size > config.max_asset_size {
            violations.push(BudgetViolation {
                name: artifact.relative_path.to_string_lossy().into_owned(),
                scope: BudgetScope::Asset,
                size: artifact.size,
                limit: config.max_asset_size,
            });
        }
        *entry_totals.entry(artifact.entry.as_str()).or_insert(0) += artifact.size;
    }

    for (entry, total) in entry_totals {
        if total > config.max_entry_size {
            violations.push(BudgetViolation {
                name: entry.to_string(),
                scope: BudgetScope::Entry,
                size: total,
                limit: config.max_entry_size,
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn artifact(entry: &str, kind: ArtifactKind, rel: &str, size: u64) -> WrittenArtifact {
        WrittenArtifact {
            entry: entry.to_string(),
            kind,
            relative_path: PathBuf::from(rel),
            size,
        }
    }

    fn budget(asset: u64, entry: u64) -> BudgetConfig {
        BudgetConfig { max_asset_size: asset, max_entry_size: entry, ..BudgetConfig::default() }
    }

    #[test]
    fn test_within_budget_no_violations() {
        let written = vec![
            artifact("index", ArtifactKind::Script, "js/index.js", 100),
            artifact("index", ArtifactKind::Stylesheet, "css/index.css", 100),
        ];
        assert!(check_budget(&written, &budget(512_000, 512_000)).is_empty());
    }

    #[test]
    fn test_oversized_asset_flagged_once() {
        let written = vec![artifact("index", ArtifactKind::Script, "js/index.js", 600_000)];
        let violations = check_budget(&written, &BudgetConfig::default());

        // one asset violation and one entry violation, both from the same file
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].scope, BudgetScope::Asset);
        assert_eq!(violations[0].name, "js/index.js");
        assert_eq!(violations[0].size, 600_000);
        assert_eq!(violations[0].limit, 512_000);
        assert_eq!(violations[1].scope, BudgetScope::Entry);
        assert_eq!(violations[1].name, "index");
    }

    #[test]
    fn test_entry_total_exceeds_budget() {
        let written = vec![
            artifact("index", ArtifactKind::Script, "js/index.js", 300),
            artifact("index", ArtifactKind::Stylesheet, "css/index.css", 300),
        ];
        let violations = check_budget(&written, &budget(400, 500));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].scope, BudgetScope::Entry);
        assert_eq!(violations[0].size, 600);
    }

    #[test]
    fn test_maps_are_exempt() {
        let written = vec![
            artifact("index", ArtifactKind::Script, "js/index.js", 100),
            artifact("index", ArtifactKind::Map, "js/index.js.map", 900_000),
        ];
        assert!(check_budget(&written, &budget(200, 200)).is_empty());
    }

    #[test]
    fn test_allow_list_exempts_entry() {
        let written = vec![artifact("swagger", ArtifactKind::Script, "js/swagger.js", 900_000)];
        let config = BudgetConfig { allow: vec!["swagger".to_string()], ..BudgetConfig::default() };
        assert!(check_budget(&written, &config).is_empty());
    }

    #[test]
    fn test_violation_display() {
        let violation = BudgetViolation {
            name: "js/index.js".to_string(),
            scope: BudgetScope::Asset,
            size: 600_000,
            limit: 512_000,
        };
        let text = violation.to_string();
        assert!(text.contains("js/index.js"));
        assert!(text.contains("600000"));
        assert!(text.contains("512000"));
    }
}
