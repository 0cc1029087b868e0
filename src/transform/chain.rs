//! Transform chains and the per-file-type chain registry.
//!
//! Files are classified by extension into a `SourceKind`; the registry maps
//! each kind to an ordered `TransformChain`, resolved once at configuration
//! time. The same kind always yields the same chain in the same order, which
//! keeps builds reproducible.

use crate::sourcemap::{count_lines, LineMap};
use crate::transform::component::ComponentCompile;
use crate::transform::script::{ScriptDownlevel, ScriptMinify};
use crate::transform::style::{StyleMinify, StylePreprocess};
use crate::transform::unit::{TransformContext, TransformError, TransformOutput, TransformUnit};
use std::path::Path;
use std::sync::Arc;

/// Inferred type of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Plain script source
    Script,
    /// Single-file component (compiles to a script fragment)
    Component,
    /// Stylesheet source
    Stylesheet,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Script => write!(f, "script"),
            SourceKind::Component => write!(f, "component"),
            SourceKind::Stylesheet => write!(f, "stylesheet"),
        }
    }
}

/// Classify a path by extension. Unknown extensions return `None`; the
/// dispatcher turns that into a per-entry failure.
pub fn classify(path: &Path) -> Option<SourceKind> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") | Some("mjs") | Some("cjs") => Some(SourceKind::Script),
        Some("vue") => Some(SourceKind::Component),
        Some("css") | Some("less") | Some("scss") => Some(SourceKind::Stylesheet),
        _ => None,
    }
}

/// A chain application failure, carrying the name of the unit that failed.
#[derive(Debug, thiserror::Error)]
#[error("unit '{unit}': {source}")]
pub struct ChainError {
    /// Name of the failing unit
    pub unit: &'static str,
    /// Underlying unit error
    #[source]
    pub source: TransformError,
}

/// An ordered sequence of transform units applied to one file.
#[derive(Clone)]
pub struct TransformChain {
    units: Vec<Arc<dyn TransformUnit>>,
}

impl TransformChain {
    /// Create a chain from ordered units.
    pub fn new(units: Vec<Arc<dyn TransformUnit>>) -> Self {
        Self { units }
    }

    /// The units in application order.
    pub fn units(&self) -> &[Arc<dyn TransformUnit>] {
        &self.units
    }

    /// Apply every unit in order, threading the byte payload and composing
    /// line maps so the result maps into the chain's original input.
    ///
    /// A unit that emits no map breaks the composition: the running map
    /// degrades to `None` and stays there, since later maps would point into
    /// an intermediate form nobody can resolve.
    pub fn apply(
        &self,
        input: &[u8],
        ctx: &TransformContext,
    ) -> Result<TransformOutput, ChainError> {
        let mut bytes = input.to_vec();
        let mut map = Some(LineMap::identity(count_lines(input)));

        for unit in &self.units {
            let out = unit
                .transform(&bytes, ctx)
                .map_err(|source| ChainError { unit: unit.name(), source })?;
            bytes = out.bytes;
            map = match (out.map, map) {
                (Some(step), Some(running)) => Some(step.compose(&running)),
                _ => None,
            };
        }

        Ok(TransformOutput { bytes, map })
    }
}

/// Per-kind transform chains, resolved once per build configuration.
///
/// The component chain only compiles; its output is a script fragment that
/// re-enters the script chain, so compile always precedes downlevel and
/// minification.
#[derive(Clone)]
pub struct ChainRegistry {
    script: TransformChain,
    component: TransformChain,
    stylesheet: TransformChain,
}

impl ChainRegistry {
    /// Registry wired with the built-in reference units.
    pub fn builtin() -> Self {
        Self {
            script: TransformChain::new(vec![
                Arc::new(ScriptDownlevel::new()),
                Arc::new(ScriptMinify::new()),
            ]),
            component: TransformChain::new(vec![Arc::new(ComponentCompile::new())]),
            stylesheet: TransformChain::new(vec![
                Arc::new(StylePreprocess::new()),
                Arc::new(StyleMinify::new()),
            ]),
        }
    }

    /// Registry with explicit chains, for swapping in external units.
    pub fn new(
        script: TransformChain,
        component: TransformChain,
        stylesheet: TransformChain,
    ) -> Self {
        Self { script, component, stylesheet }
    }

    /// Chain for the given source kind.
    pub fn chain_for(&self, kind: SourceKind) -> &TransformChain {
        match kind {
            SourceKind::Script => &self.script,
            SourceKind::Component => &self.component,
            SourceKind::Stylesheet => &self.stylesheet,
        }
    }

    /// The script chain, which compiled component fragments re-enter.
    pub fn script_chain(&self) -> &TransformChain {
        &self.script
    }
}
