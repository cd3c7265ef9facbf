//! CLI argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Reproducible ant colony pathfinding over obstacle grids.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "antpath", version, about, long_about = None)]
pub struct Args {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run a scenario and print the best path
    Run {
        /// Path to the scenario YAML file.
        scenario: PathBuf,
        /// Override the scenario seed.
        #[arg(long)]
        seed: Option<u64>,
        /// Override the source waypoint name.
        #[arg(long)]
        source: Option<String>,
        /// Override the sink waypoint name.
        #[arg(long)]
        sink: Option<String>,
        /// Write the pheromone field and best path as JSON.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Run a scenario several times and check the results are identical
    Verify {
        /// Path to the scenario YAML file.
        scenario: PathBuf,
        /// Number of runs to compare.
        #[arg(long, default_value_t = 3)]
        runs: usize,
    },
    /// Check a scenario file without running it
    Validate {
        /// Path to the scenario YAML file.
        scenario: PathBuf,
    },
    /// Show version and build information
    Version,
}

impl Args {
    /// Log filter directive for the requested verbosity.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
