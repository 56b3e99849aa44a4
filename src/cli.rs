//! CLI argument surface for the `parlay-eval` binary, kept thin the way the
//! teacher keeps `cli::legacy` thin — `main.rs` owns the actual command
//! dispatch, this module just defines the shape `clap` parses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "parlay-eval", about = "Correlated Monte Carlo parlay evaluator")]
pub struct Cli {
    /// Path to a TOML config file (or a directory containing `default.toml`).
    #[arg(long, global = true, default_value = "config")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a parlay from a JSON request file, printing the result JSON.
    Evaluate {
        /// Path to an `EvaluateRequest` JSON file.
        #[arg(long)]
        request: PathBuf,
        /// Overrides the request's seed (if any).
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Runs the copula sampler's startup warmup and exits; for smoke-testing
    /// a deployment without evaluating a real parlay.
    Warmup,
}
