//! Idempotent anchor-based text file patcher.
//!
//! Applies a TOML plan of guarded transform steps to one or more text files,
//! printing one report line per step per file. Re-running the same plan is a
//! no-op: already-applied steps are detected by their markers and skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use patcher::core::report::TransformReport;
use patcher::io::plan::load_plan;
use patcher::run::{RunOptions, run_plan};
use patcher::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "patcher",
    version,
    about = "Idempotent anchor-based text file patcher"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply the plan to each file, rewriting files whose steps fire.
    Apply {
        /// TOML plan with the ordered `[[step]]` list.
        #[arg(long)]
        plan: PathBuf,
        /// Target files, patched independently in the order given.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print each report as pretty JSON instead of per-step lines.
        #[arg(long)]
        json: bool,
    },
    /// Dry run: report what `apply` would do without writing anything.
    Check {
        /// TOML plan with the ordered `[[step]]` list.
        #[arg(long)]
        plan: PathBuf,
        /// Target files, checked independently in the order given.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print each report as pretty JSON instead of per-step lines.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Apply { plan, files, json } => {
            run_batch(&plan, &files, RunOptions { dry_run: false }, json)
        }
        Command::Check { plan, files, json } => {
            run_batch(&plan, &files, RunOptions { dry_run: true }, json)
        }
    }
}

/// One driver run per file. A file that cannot be read or written is
/// reported and the batch keeps going; the exit status still ends up
/// non-zero, unlike step-level failures which never affect it.
fn run_batch(plan_path: &Path, files: &[PathBuf], options: RunOptions, json: bool) -> Result<i32> {
    let steps = load_plan(plan_path)?;

    let mut failed_files = 0usize;
    let mut pending = false;
    for file in files {
        match run_plan(file, &steps, options) {
            Ok(report) => {
                pending = pending || (options.dry_run && report.any_applied());
                print_report(&report, json)?;
            }
            Err(err) => {
                failed_files += 1;
                eprintln!("{err}");
            }
        }
    }

    if failed_files > 0 {
        return Ok(exit_codes::INVALID);
    }
    if options.dry_run && pending {
        return Ok(exit_codes::PENDING);
    }
    Ok(exit_codes::OK)
}

fn print_report(report: &TransformReport, json: bool) -> Result<()> {
    if json {
        let payload = serde_json::to_string_pretty(report).context("serialize report")?;
        println!("{payload}");
    } else {
        println!("{}", report.render());
    }
    Ok(())
}
