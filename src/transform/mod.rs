//! Transform units and per-file-type chains.
//!
//! Everything the pipeline knows about converting bytes lives here: the
//! `TransformUnit` contract, the ordered `TransformChain` per source kind,
//! and the built-in reference units (script downlevel/minify, component
//! compile, stylesheet preprocess/minify). External transpilers or minifiers
//! plug in by implementing `TransformUnit` and building a custom
//! `ChainRegistry`.

pub mod chain;
pub mod component;
pub mod script;
pub mod style;
pub mod unit;

pub use chain::{classify, ChainError, ChainRegistry, SourceKind, TransformChain};
pub use component::ComponentCompile;
pub use script::{ScriptDownlevel, ScriptMinify};
pub use style::{StyleMinify, StylePreprocess};
pub use unit::{TransformContext, TransformError, TransformOutput, TransformUnit};
