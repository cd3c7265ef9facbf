//! CLI command handlers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::process::ExitCode;

use super::output::{print_run_result, print_scenario_summary, print_version, write_report};
use super::{Args, Command};
use crate::error::{AcoError, AcoResult, EndpointRole};
use crate::scenario::{Scenario, ScenarioRun};

/// Overrides applied to a loaded scenario before running it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOverrides {
    pub seed: Option<u64>,
    pub source: Option<String>,
    pub sink: Option<String>,
}

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            scenario,
            seed,
            source,
            sink,
            output,
        } => run_scenario(
            &scenario,
            &RunOverrides { seed, source, sink },
            output.as_deref(),
        ),
        Command::Verify { scenario, runs } => verify_reproducibility(&scenario, runs),
        Command::Validate { scenario } => validate_scenario(&scenario),
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Load a scenario and apply overrides.
///
/// # Errors
///
/// Returns error if loading fails or an override names an unknown waypoint.
pub fn prepare_scenario(path: &Path, overrides: &RunOverrides) -> AcoResult<Scenario> {
    let mut scenario = Scenario::load(path)?;
    if let Some(seed) = overrides.seed {
        scenario = scenario.with_seed(seed);
    }
    if overrides.source.is_some() || overrides.sink.is_some() {
        let source = overrides
            .source
            .clone()
            .unwrap_or_else(|| scenario.route.source.clone());
        let sink = overrides
            .sink
            .clone()
            .unwrap_or_else(|| scenario.route.sink.clone());
        scenario = scenario.with_route(source, sink)?;
    }
    Ok(scenario)
}

/// Exit status for a failed command: 1 when the caller's input was at
/// fault, 3 when the run itself failed (I/O, corrupted field).
#[must_use]
pub fn error_exit_code(err: &AcoError) -> ExitCode {
    if err.is_input_error() {
        ExitCode::from(1)
    } else {
        ExitCode::from(3)
    }
}

/// Run a scenario file.
///
/// Exits 0 when a path was found, 2 when no ant reached the sink, and
/// [`error_exit_code`] otherwise.
#[must_use]
pub fn run_scenario(path: &Path, overrides: &RunOverrides, output: Option<&Path>) -> ExitCode {
    let result = prepare_scenario(path, overrides).and_then(|scenario| {
        print_scenario_summary(&scenario);
        let run = scenario.run()?;
        print_run_result(&scenario, &run);
        if let Some(out) = output {
            write_report(out, &run.report())?;
            println!("\nReport written to {}", out.display());
        }
        Ok(run)
    });

    match result {
        Ok(run) if run.outcome.found() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e}");
            error_exit_code(&e)
        }
    }
}

/// Outcome of running the same scenario several times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifySummary {
    pub runs: usize,
    pub reference_hash: String,
    pub run_hashes: Vec<String>,
}

impl VerifySummary {
    /// True when every run hashed identically.
    #[must_use]
    pub fn identical(&self) -> bool {
        self.run_hashes.iter().all(|h| h == &self.reference_hash)
    }
}

fn report_hash(run: &ScenarioRun) -> AcoResult<String> {
    let json = serde_json::to_string(&run.report())?;
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);
    Ok(format!("{:016x}", hasher.finish()))
}

/// Run `scenario` `runs` times and hash each report.
///
/// # Errors
///
/// Returns error if any run fails.
pub fn verify_runs(scenario: &Scenario, runs: usize) -> AcoResult<VerifySummary> {
    let run_hashes = (0..runs.max(1))
        .map(|_| scenario.run().and_then(|run| report_hash(&run)))
        .collect::<AcoResult<Vec<_>>>()?;
    Ok(VerifySummary {
        runs: run_hashes.len(),
        reference_hash: run_hashes[0].clone(),
        run_hashes,
    })
}

/// Verify that a scenario reproduces bit-for-bit.
#[must_use]
pub fn verify_reproducibility(path: &Path, runs: usize) -> ExitCode {
    println!("Verifying reproducibility: {}", path.display());

    match Scenario::load(path).and_then(|scenario| verify_runs(&scenario, runs)) {
        Ok(summary) => {
            println!("  Runs:           {}", summary.runs);
            println!("  Reference hash: {}", summary.reference_hash);
            for (i, hash) in summary.run_hashes.iter().enumerate() {
                let mark = if hash == &summary.reference_hash { "=" } else { "!" };
                println!("    Run {}: {hash} {mark}", i + 1);
            }
            if summary.identical() {
                println!("✓ Result: PASSED");
                ExitCode::SUCCESS
            } else {
                println!("✗ Result: FAILED");
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            error_exit_code(&e)
        }
    }
}

/// Validate a scenario file without running it.
#[must_use]
pub fn validate_scenario(path: &Path) -> ExitCode {
    match Scenario::load(path).and_then(|scenario| check_geometry(&scenario).map(|()| scenario)) {
        Ok(scenario) => {
            print_scenario_summary(&scenario);
            println!("\n✓ Scenario is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {}: {e}", path.display());
            error_exit_code(&e)
        }
    }
}

/// Check that the route endpoints are open cells of the grid.
///
/// # Errors
///
/// Returns `AcoError::InvalidEndpoint` for a blocked or out-of-bounds endpoint.
pub fn check_geometry(scenario: &Scenario) -> AcoResult<()> {
    let graph = scenario.build_graph()?;
    for (role, name) in [
        (EndpointRole::Source, &scenario.route.source),
        (EndpointRole::Sink, &scenario.route.sink),
    ] {
        let cell = scenario.waypoint(name)?;
        if !graph.contains(cell) {
            return Err(AcoError::InvalidEndpoint { role, cell });
        }
    }
    Ok(())
}
