//! Line-oriented debug maps for transformed artifacts.
//!
//! Each transform unit may report a `LineMap` describing where every line of
//! its output came from in its input. Maps from consecutive units are composed
//! so the final map always points back into the original source. Concatenated
//! artifacts carry an `ArtifactMap` with one section per contributing source.

use serde::Serialize;

/// Count the lines of a byte payload.
///
/// Empty payloads have zero lines; a trailing newline does not open a new one.
pub fn count_lines(bytes: &[u8]) -> usize {
    if bytes.is_empty() {
        return 0;
    }
    let newlines = bytes.iter().filter(|b| **b == b'\n').count();
    if bytes.ends_with(b"\n") {
        newlines
    } else {
        newlines + 1
    }
}

/// A one-step remapping: `lines[i]` is the zero-based input line that produced
/// output line `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMap {
    lines: Vec<u32>,
}

impl LineMap {
    /// Create a map from explicit output-to-input line assignments.
    pub fn from_lines(lines: Vec<u32>) -> Self {
        Self { lines }
    }

    /// Identity map for a payload of `line_count` lines.
    pub fn identity(line_count: usize) -> Self {
        Self { lines: (0..line_count as u32).collect() }
    }

    /// Number of output lines covered by this map.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the map covers no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Input line for the given output line, clamped to the mapped range.
    pub fn lookup(&self, line: u32) -> u32 {
        match self.lines.get(line as usize) {
            Some(l) => *l,
            None => self.lines.last().copied().unwrap_or(0),
        }
    }

    /// Compose with the map of the upstream step.
    ///
    /// `self` maps this step's output into its input; `upstream` maps that
    /// input into the original source. The result maps this step's output
    /// directly into the original source.
    pub fn compose(&self, upstream: &LineMap) -> LineMap {
        let lines = self.lines.iter().map(|l| upstream.lookup(*l)).collect();
        LineMap { lines }
    }

    fn into_lines(self) -> Vec<u32> {
        self.lines
    }
}

/// Debug map for one emitted artifact, serialized as JSON.
///
/// Artifacts are concatenations of independently transformed sources, so the
/// map is sectioned: each section names a source file, the artifact line at
/// which its output begins, and the per-line mapping back into that source.
#[derive(Debug, Serialize)]
pub struct ArtifactMap {
    /// Map format version
    pub version: u32,
    /// Artifact file name this map describes (e.g. "index.js")
    pub file: String,
    /// Per-source sections in concatenation order
    pub sections: Vec<MapSection>,
}

/// One source's contribution to an artifact map.
#[derive(Debug, Serialize)]
pub struct MapSection {
    /// Source file path as referenced by the entry
    pub source: String,
    /// First artifact line occupied by this source's output
    pub offset: u32,
    /// Zero-based original line for each output line of this section
    pub lines: Vec<u32>,
}

impl ArtifactMap {
    /// Create an empty map for the named artifact file.
    pub fn new(file: impl Into<String>) -> Self {
        Self { version: 1, file: file.into(), sections: Vec::new() }
    }

    /// Append a section for one source's output.
    pub fn push_section(&mut self, source: impl Into<String>, offset: u32, map: LineMap) {
        self.sections.push(MapSection { source: source.into(), offset, lines: map.into_lines() });
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"one"), 1);
        assert_eq!(count_lines(b"one\n"), 1);
        assert_eq!(count_lines(b"one\ntwo"), 2);
        assert_eq!(count_lines(b"one\ntwo\n"), 2);
    }

    #[test]
    fn test_identity_map() {
        let map = LineMap::identity(3);
        assert_eq!(map.len(), 3);
        assert_eq!(map.lookup(0), 0);
        assert_eq!(map.lookup(2), 2);
    }

    #[test]
    fn test_lookup_clamps_out_of_range() {
        let map = LineMap::from_lines(vec![4, 7]);
        assert_eq!(map.lookup(5), 7);
    }

    #[test]
    fn test_lookup_empty_map() {
        let map = LineMap::from_lines(vec![]);
        assert_eq!(map.lookup(0), 0);
    }

    #[test]
    fn test_compose_points_into_original() {
        // Original has 4 lines. First step drops line 1: output lines map to
        // [0, 2, 3]. Second step drops its line 0: output maps to [1, 2].
        let first = LineMap::from_lines(vec![0, 2, 3]);
        let second = LineMap::from_lines(vec![1, 2]);

        let composed = second.compose(&first);
        assert_eq!(composed, LineMap::from_lines(vec![2, 3]));
    }

    #[test]
    fn test_compose_with_identity_is_noop() {
        let map = LineMap::from_lines(vec![3, 1, 2]);
        let identity = LineMap::identity(4);

        assert_eq!(map.compose(&identity), map);
        assert_eq!(identity.compose(&LineMap::identity(4)).len(), 4);
    }

    #[test]
    fn test_artifact_map_json() {
        let mut map = ArtifactMap::new("index.js");
        map.push_section("a.js", 0, LineMap::from_lines(vec![0, 2]));
        map.push_section("b.js", 2, LineMap::from_lines(vec![0]));

        let json = map.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["file"], "index.js");
        assert_eq!(value["sections"][0]["source"], "a.js");
        assert_eq!(value["sections"][1]["offset"], 2);
    }
}
