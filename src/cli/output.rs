//! CLI output formatting.

use std::path::Path;

use crate::colony::SearchReport;
use crate::error::AcoResult;
use crate::scenario::{Scenario, ScenarioRun};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    println!("antpath {}", env!("ANTPATH_VERSION"));
    println!("revision {}", env!("ANTPATH_GIT_HASH"));
}

/// Print a short description of a validated scenario.
pub fn print_scenario_summary(scenario: &Scenario) {
    println!("{RULE}");
    println!("Scenario: {}", scenario.meta.id);
    if !scenario.meta.description.is_empty() {
        println!("  {}", scenario.meta.description);
    }
    println!("{RULE}\n");
    println!(
        "Grid:       {}x{} ({})",
        scenario.grid.width,
        scenario.grid.height,
        if scenario.grid.diagonal {
            "8-connected"
        } else {
            "4-connected"
        }
    );
    println!("Obstacles:  {} cells", scenario.obstacle_set().len());
    println!("Waypoints:  {}", scenario.waypoints.len());
    for (name, cell) in &scenario.waypoints {
        println!("  {name:<16} {cell}");
    }
    println!("Route:      {} → {}", scenario.route.source, scenario.route.sink);
    let c = &scenario.colony;
    println!(
        "Colony:     ants={} iter={} α={} β={} ρ={} Q={} max_steps={}",
        c.n_ants, c.n_iter, c.alpha, c.beta, c.rho, c.q, c.max_steps
    );
    println!("Seed:       {}", scenario.seed);
}

/// Format a path as `(x, y) → (x, y) → …`.
#[must_use]
pub fn format_path(report: &SearchReport) -> Option<String> {
    report.best_path.as_ref().map(|path| {
        path.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" → ")
    })
}

/// Print the result of a run.
pub fn print_run_result(scenario: &Scenario, run: &ScenarioRun) {
    let report = run.report();
    println!("\n{RULE}");
    println!(
        "Route {} {} → {} {}",
        scenario.route.source, run.source, scenario.route.sink, run.sink
    );
    println!("{RULE}\n");
    println!("Graph:      {} nodes, {} edges", run.graph.node_count(), run.graph.edge_count());
    println!("Iterations: {}", report.iterations);
    println!("Peak field: {:.3}", run.outcome.pheromone.max_weight());

    match (report.best_cost, format_path(&report)) {
        (Some(cost), Some(path)) => {
            let steps = report.best_path.as_ref().map_or(0, |p| p.len().saturating_sub(1));
            println!("Best cost:  {cost:.3} ({steps} steps)");
            println!("Best path:  {path}");
        }
        _ => println!("✗ No path found"),
    }
}

/// Write the report as pretty JSON.
///
/// # Errors
///
/// Returns error if serialization or the write fails.
pub fn write_report(path: &Path, report: &SearchReport) -> AcoResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
