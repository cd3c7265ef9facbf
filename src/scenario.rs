//! Scenario files.
//!
//! A scenario is the immutable description of one run: the rectangle, its
//! obstacles, a table of named waypoints, which two of them to connect and
//! the colony hyperparameters. It is loaded from YAML, validated once and
//! then handed to the engine.
//!
//! # Example YAML
//!
//! ```yaml
//! meta:
//!   id: "ACO-TX-001"
//!   description: "El Paso to Houston across a Texas outline"
//! grid:
//!   width: 60
//!   height: 50
//!   diagonal: true
//! obstacles:
//!   mask: texas
//!   cells: [[30, 30]]
//! waypoints:
//!   El Paso: [10, 35]
//!   Houston: [40, 25]
//! route:
//!   source: "El Paso"
//!   sink: "Houston"
//! colony:
//!   n_ants: 100
//!   n_iter: 250
//!   beta: 5.0
//!   rho: 0.25
//!   q: 80.0
//! seed: 10
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::colony::{ColonyParams, ColonySearch, SearchOutcome, SearchReport};
use crate::error::{AcoError, AcoResult};
use crate::grid::{Adjacency, Cell, GridGraph, MaskPreset, ObstacleSet, RowBand, ShapeMask};

/// Scenario metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioMeta {
    /// Unique scenario identifier.
    #[serde(default = "default_id")]
    pub id: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

fn default_id() -> String {
    "ACO-UNNAMED".to_string()
}

impl Default for ScenarioMeta {
    fn default() -> Self {
        Self {
            id: default_id(),
            description: String::new(),
        }
    }
}

/// Rectangle and neighborhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    #[validate(range(min = 1))]
    pub width: i32,
    #[validate(range(min = 1))]
    pub height: i32,
    /// Connect diagonal neighbors.
    #[serde(default = "default_true")]
    pub diagonal: bool,
}

const fn default_true() -> bool {
    true
}

/// Obstacle sources; the blocked set is their union.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleConfig {
    /// Built-in outline.
    #[serde(default)]
    pub mask: Option<MaskPreset>,
    /// Custom row bands.
    #[serde(default)]
    pub bands: Vec<RowBand>,
    /// Individually blocked cells.
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl ObstacleConfig {
    /// Blocked cells within `width × height`, plus any explicit cells.
    #[must_use]
    pub fn resolve(&self, width: i32, height: i32) -> ObstacleSet {
        let mut bands = self.mask.map(MaskPreset::bands).unwrap_or_default();
        bands.extend(self.bands.iter().copied());

        let mut blocked = ShapeMask::new(bands).blocked_cells(width, height);
        blocked.extend(self.cells.iter().copied());
        blocked
    }
}

/// Waypoint names to connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub source: String,
    pub sink: String,
}

/// Complete run description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub meta: ScenarioMeta,
    #[validate(nested)]
    pub grid: GridConfig,
    #[serde(default)]
    pub obstacles: ObstacleConfig,
    /// Name → coordinate table, in file order.
    #[serde(default)]
    pub waypoints: IndexMap<String, Cell>,
    pub route: RouteConfig,
    #[validate(nested)]
    #[serde(default)]
    pub colony: ColonyParams,
    /// Master seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_seed() -> u64 {
    42
}

/// Graph and outcome of a finished scenario.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub graph: GridGraph,
    pub source: Cell,
    pub sink: Cell,
    pub outcome: SearchOutcome,
}

impl ScenarioRun {
    /// Serializable report of the run.
    #[must_use]
    pub fn report(&self) -> SearchReport {
        self.outcome.to_report(&self.graph)
    }
}

impl Scenario {
    /// Load a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> AcoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a scenario.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> AcoResult<Self> {
        let scenario: Self = serde_yaml::from_str(yaml)?;
        scenario.check()?;
        Ok(scenario)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> AcoResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Schema plus semantic validation.
    ///
    /// # Errors
    ///
    /// Returns error for invalid fields or unknown route names.
    pub fn check(&self) -> AcoResult<()> {
        self.validate()?;
        self.colony.check()?;
        self.waypoint(&self.route.source)?;
        self.waypoint(&self.route.sink)?;
        Ok(())
    }

    /// Coordinate of a named waypoint.
    ///
    /// # Errors
    ///
    /// Returns `AcoError::UnknownWaypoint` if the name is not in the table.
    pub fn waypoint(&self, name: &str) -> AcoResult<Cell> {
        self.waypoints
            .get(name)
            .copied()
            .ok_or_else(|| AcoError::UnknownWaypoint(name.to_string()))
    }

    /// Replace the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the route.
    ///
    /// # Errors
    ///
    /// Returns `AcoError::UnknownWaypoint` if either name is unknown.
    pub fn with_route(mut self, source: impl Into<String>, sink: impl Into<String>) -> AcoResult<Self> {
        self.route = RouteConfig {
            source: source.into(),
            sink: sink.into(),
        };
        self.waypoint(&self.route.source)?;
        self.waypoint(&self.route.sink)?;
        Ok(self)
    }

    #[must_use]
    pub const fn adjacency(&self) -> Adjacency {
        Adjacency::from_diagonal(self.grid.diagonal)
    }

    #[must_use]
    pub fn obstacle_set(&self) -> ObstacleSet {
        self.obstacles.resolve(self.grid.width, self.grid.height)
    }

    /// Build the grid graph.
    ///
    /// # Errors
    ///
    /// Returns error for a non-positive rectangle.
    pub fn build_graph(&self) -> AcoResult<GridGraph> {
        GridGraph::build(
            self.grid.width,
            self.grid.height,
            &self.obstacle_set(),
            self.adjacency(),
        )
    }

    /// Build the graph and run the colony along the route.
    ///
    /// # Errors
    ///
    /// Returns error for invalid geometry or parameters.
    pub fn run(&self) -> AcoResult<ScenarioRun> {
        let source = self.waypoint(&self.route.source)?;
        let sink = self.waypoint(&self.route.sink)?;
        let graph = self.build_graph()?;

        tracing::info!(
            id = %self.meta.id,
            source = %self.route.source,
            sink = %self.route.sink,
            seed = self.seed,
            "running scenario"
        );

        let outcome = ColonySearch::new(&graph, self.colony.clone(), self.seed)?.search(source, sink)?;
        Ok(ScenarioRun {
            graph,
            source,
            sink,
            outcome,
        })
    }
}
