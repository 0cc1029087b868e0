//! assetpipe: a static front-end asset build pipeline.
//!
//! Reads an `assetpipe.toml` describing named entries (ordered lists of
//! source files) and optional theme variant discovery, pushes every source
//! through a per-file-type transform chain, concatenates the results into
//! kind-partitioned bundles under the output root, emits line-oriented debug
//! maps for script bundles, prunes empty script husks from style-only
//! entries, and checks everything against size budgets.
//!
//! # Example
//!
//! ```no_run
//! use assetpipe::build::{BuildContext, BuildPipeline};
//! use assetpipe::config::load_config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (config, path) = load_config(None)?;
//! let root = path.parent().map(|p| p.to_path_buf()).unwrap_or_default();
//! let report = BuildPipeline::new(BuildContext::new(config, root)).build()?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod sourcemap;
pub mod transform;

pub use build::{BuildContext, BuildPipeline, BuildReport};
pub use config::{load_config, PipeConfig};
