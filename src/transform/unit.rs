//! Core transform contract and error definitions.
//!
//! A `TransformUnit` is a single byte-to-byte conversion step: transpiling,
//! compiling a component, preprocessing a stylesheet, or minifying. Units are
//! black boxes to the pipeline; all it relies on is the
//! `(bytes, context) -> (bytes, optional map)` contract.

use crate::sourcemap::LineMap;
use std::path::PathBuf;

/// Errors a transform unit can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// Input is not well-formed for this unit
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Input bytes are not valid UTF-8
    #[error("invalid UTF-8 input: {0}")]
    InvalidUtf8(String),
}

/// Context handed to every unit invocation.
#[derive(Debug, Clone)]
pub struct TransformContext {
    /// Path of the source file being transformed
    pub source_path: PathBuf,
    /// Name of the entry this file belongs to
    pub entry_name: String,
}

/// Output of one transform unit: the converted bytes and, when the unit can
/// account for its edits, a one-step line map into its input.
#[derive(Debug)]
pub struct TransformOutput {
    /// Converted payload
    pub bytes: Vec<u8>,
    /// Output-to-input line mapping, if the unit tracks one
    pub map: Option<LineMap>,
}

impl TransformOutput {
    /// Output with an accompanying map.
    pub fn mapped(bytes: Vec<u8>, map: LineMap) -> Self {
        Self { bytes, map: Some(map) }
    }

    /// Output without a map.
    pub fn unmapped(bytes: Vec<u8>) -> Self {
        Self { bytes, map: None }
    }
}

/// A single-responsibility conversion step.
///
/// Implementations must be deterministic: the same input bytes always produce
/// the same output bytes for a given build configuration.
pub trait TransformUnit: Send + Sync {
    /// Stable unit name, used in error reports.
    fn name(&self) -> &'static str;

    /// Convert `input`, optionally reporting a line map into it.
    fn transform(
        &self,
        input: &[u8],
        ctx: &TransformContext,
    ) -> Result<TransformOutput, TransformError>;
}

/// Decode unit input as UTF-8, reporting a unit-level error otherwise.
pub(crate) fn input_str(input: &[u8]) -> Result<&str, TransformError> {
    std::str::from_utf8(input).map_err(|e| TransformError::InvalidUtf8(e.to_string()))
}
