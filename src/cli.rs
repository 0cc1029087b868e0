//! Command-line interface.

use crate::build::{BuildContext, BuildPipeline, BuildReport, EntryGraph, EntryOrigin};
use crate::config::{load_config, merge_cli_overrides, project_root, CliOverrides};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for success.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for build or configuration errors.
pub const EXIT_ERROR: u8 = 1;

#[derive(Parser)]
#[command(name = "assetpipe")]
#[command(about = "Static front-end asset build pipeline", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all entries into the output tree
    Build {
        /// Path to assetpipe.toml (default: search upward from cwd)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the output root directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Worker threads (0 = one per core)
        #[arg(short, long, default_value_t = 0)]
        jobs: usize,

        /// Treat budget violations as a fatal error
        #[arg(long)]
        fail_on_budget: bool,

        /// Abort on the first failed entry
        #[arg(long)]
        fail_fast: bool,

        /// Print per-artifact progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the resolved entry graph without building
    Graph {
        /// Path to assetpipe.toml (default: search upward from cwd)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { config, out, jobs, fail_on_budget, fail_fast, verbose } => {
            run_build(config, out, jobs, fail_on_budget, fail_fast, verbose)
        }
        Commands::Graph { config } => run_graph(config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_build(
    config_path: Option<PathBuf>,
    out: Option<PathBuf>,
    jobs: usize,
    fail_on_budget: bool,
    fail_fast: bool,
    verbose: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (mut config, loaded_from) = load_config(config_path.as_deref())?;
    let overrides =
        CliOverrides { out, fail_on_budget: fail_on_budget.then_some(true) };
    merge_cli_overrides(&mut config, &overrides);

    let root = project_root(&loaded_from).unwrap_or_else(|| std::path::Path::new("."));
    let fail_on_violation = config.budget.fail_on_violation;

    let context = BuildContext::new(config, root.to_path_buf()).with_verbose(verbose);
    let pipeline = BuildPipeline::new(context).with_jobs(jobs).with_fail_fast(fail_fast);
    let report = pipeline.build()?;

    print_report(&report);

    if !report.is_success() || (fail_on_violation && !report.violations.is_empty()) {
        return Ok(ExitCode::from(EXIT_ERROR));
    }
    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn run_graph(config_path: Option<PathBuf>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (config, loaded_from) = load_config(config_path.as_deref())?;
    let root = project_root(&loaded_from).unwrap_or_else(|| std::path::Path::new("."));

    let context = BuildContext::new(config, root.to_path_buf());
    let graph = EntryGraph::build(&context)?;

    for entry in graph.entries() {
        let origin = match entry.origin {
            EntryOrigin::Static => "static",
            EntryOrigin::Theme => "theme",
        };
        println!("{} ({origin})", entry.name);
        for source in &entry.sources {
            println!("  {}", source.display());
        }
    }
    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn print_report(report: &BuildReport) {
    for entry in &report.entries {
        match &entry.status {
            crate::build::EntryStatus::Built => {}
            crate::build::EntryStatus::Failed(msg) => {
                eprintln!("error: entry '{}' failed: {msg}", entry.name);
            }
        }
        for warning in &entry.warnings {
            eprintln!("warning: {warning}");
        }
    }
    for error in &report.write_errors {
        eprintln!("error: {error}");
    }
    for violation in &report.violations {
        eprintln!("warning: {violation}");
    }
    println!("{}", report.summary());
}
