//! antpath CLI - ant colony pathfinding
//!
//! Command-line interface for running grid scenarios.

use std::process::ExitCode;

use antpath::cli::{run_cli, Args};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("antpath={}", args.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run_cli(args)
}
