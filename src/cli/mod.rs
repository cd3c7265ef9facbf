//! CLI module for antpath.
//!
//! Parsing lives in `args`, command handlers in `commands` and printing in
//! `output`, so everything except `main` itself can be unit tested.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{
    check_geometry, error_exit_code, prepare_scenario, run_cli, run_scenario, validate_scenario,
    verify_reproducibility, verify_runs, RunOverrides, VerifySummary,
};
pub use output::{format_path, print_run_result, print_scenario_summary, print_version, write_report};
