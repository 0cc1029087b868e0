//! Built-in component compile unit.
//!
//! Single-file components mix template, script, and style blocks in one
//! source. Compilation here means extracting the script block as a plain
//! script fragment; the dispatcher then runs that fragment through the full
//! script chain, so compile always precedes downlevel and minification.

use crate::sourcemap::LineMap;
use crate::transform::unit::{
    input_str, TransformContext, TransformError, TransformOutput, TransformUnit,
};

/// Compiles a single-file component into a script fragment.
///
/// Only the `<script>` block is kept; template and style blocks are dropped.
/// A component without a script block compiles to an empty fragment, which
/// the style-only pruner later treats as trivial.
#[derive(Debug, Default)]
pub struct ComponentCompile;

impl ComponentCompile {
    pub fn new() -> Self {
        Self
    }
}

impl TransformUnit for ComponentCompile {
    fn name(&self) -> &'static str {
        "component-compile"
    }

    fn transform(
        &self,
        input: &[u8],
        _ctx: &TransformContext,
    ) -> Result<TransformOutput, TransformError> {
        let content = input_str(input)?;

        let mut kept = Vec::new();
        let mut mapping = Vec::new();
        let mut in_script = false;

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if in_script {
                if trimmed.starts_with("</script") {
                    in_script = false;
                } else {
                    kept.push(line.to_string());
                    mapping.push(idx as u32);
                }
            } else if trimmed.starts_with("<script") && trimmed.ends_with('>') {
                in_script = true;
            }
        }

        if in_script {
            return Err(TransformError::Syntax("unterminated <script> block".to_string()));
        }

        let bytes = kept.join("\n").into_bytes();
        Ok(TransformOutput::mapped(bytes, LineMap::from_lines(mapping)))
    }
}
