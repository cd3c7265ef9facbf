//! Ant colony search engine.
//!
//! Runs `n_iter` iterations over a [`GridGraph`]. Each iteration:
//!
//! 1. constructs `n_ants` independent paths against the field as it stood
//!    at the start of the iteration (optionally on the rayon pool),
//! 2. replaces the best-so-far path on strict improvement,
//! 3. evaporates every edge by `1 − ρ`,
//! 4. deposits `Q / cost` on every edge of every successful path.
//!
//! Steps 3 and 4 take `&mut PheromoneField` after all ants are collected, so
//! no ant ever sees a half-updated field. Each ant draws from its own RNG
//! stream, which makes a run reproducible for a fixed seed no matter how
//! many threads build the ants.
//!
//! # Example
//!
//! ```rust
//! use antpath::colony::{ColonyParams, ColonySearch};
//! use antpath::grid::{Adjacency, Cell, GridGraph, ObstacleSet};
//!
//! let graph = GridGraph::build(3, 3, &ObstacleSet::new(), Adjacency::Eight).unwrap();
//! let params = ColonyParams { n_ants: 50, n_iter: 50, ..Default::default() };
//! let mut search = ColonySearch::new(&graph, params, 42).unwrap();
//! let outcome = search.search(Cell::new(0, 0), Cell::new(2, 2)).unwrap();
//! assert!(outcome.best.is_some());
//! ```

pub mod ant;
pub mod pheromone;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AcoError, AcoResult, EndpointRole};
use crate::grid::{Cell, GridGraph};
use crate::rng::ColonyRng;

pub use ant::{AntContext, AntPath};
pub use pheromone::{DirectedWeight, PheromoneField, INITIAL_PHEROMONE};

/// Default cap on moves per ant.
///
/// A simple path can never be longer than the node count, so the cap only
/// bites on graphs with more than 1000 open cells; there it cuts off ants
/// that are lost in a large region and would otherwise dominate run time.
///
/// The cap counts moves, not sink checks: an ant that arrives on its
/// `max_steps`-th move succeeds, so the default admits paths of up to 1000
/// edges. A loop that tests for the sink only before each of 1000 moves
/// would stop one edge short.
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Colony hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ColonyParams {
    /// Ants constructed per iteration.
    #[serde(default = "default_n_ants")]
    pub n_ants: usize,
    /// Evaporate/reinforce cycles.
    #[serde(default = "default_n_iter")]
    pub n_iter: usize,
    /// Pheromone exponent.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Inverse-distance exponent.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Evaporation rate.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_rho")]
    pub rho: f64,
    /// Reinforcement constant.
    #[serde(default = "default_q", alias = "Q")]
    pub q: f64,
    /// Moves an ant may take before it is discarded.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Construct ants on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Log progress every this many iterations (0 disables).
    #[serde(default = "default_report_every")]
    pub report_every: usize,
}

const fn default_n_ants() -> usize {
    100
}

const fn default_n_iter() -> usize {
    250
}

const fn default_alpha() -> f64 {
    1.0
}

const fn default_beta() -> f64 {
    4.0
}

const fn default_rho() -> f64 {
    0.3
}

const fn default_q() -> f64 {
    100.0
}

const fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

const fn default_parallel() -> bool {
    true
}

const fn default_report_every() -> usize {
    25
}

impl Default for ColonyParams {
    fn default() -> Self {
        Self {
            n_ants: default_n_ants(),
            n_iter: default_n_iter(),
            alpha: default_alpha(),
            beta: default_beta(),
            rho: default_rho(),
            q: default_q(),
            max_steps: default_max_steps(),
            parallel: default_parallel(),
            report_every: default_report_every(),
        }
    }
}

impl ColonyParams {
    /// Schema checks plus the constraints `validator` cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AcoError::Validation` or `AcoError::Config`.
    pub fn check(&self) -> AcoResult<()> {
        self.validate()?;

        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("q", self.q)] {
            if !value.is_finite() {
                return Err(AcoError::config(format!("{name} must be finite, got {value}")));
            }
        }
        if self.q <= 0.0 {
            return Err(AcoError::config(format!("q must be positive, got {}", self.q)));
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(AcoError::config(format!("rho must lie in [0, 1], got {}", self.rho)));
        }
        Ok(())
    }
}

/// Summary of one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    pub iteration: usize,
    /// Ants that reached the sink.
    pub successes: usize,
    /// Cheapest path of this iteration.
    pub iteration_best: Option<f64>,
    /// Best cost seen so far, including this iteration.
    pub best_so_far: Option<f64>,
}

/// Final state of a search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Field after the last iteration.
    pub pheromone: PheromoneField,
    /// Cheapest path found, `None` if no ant ever reached the sink.
    pub best: Option<AntPath>,
    /// One entry per iteration.
    pub history: Vec<IterationStats>,
}

impl SearchOutcome {
    /// True if some ant reached the sink.
    #[must_use]
    pub const fn found(&self) -> bool {
        self.best.is_some()
    }

    /// Best cost.
    #[must_use]
    pub fn best_cost(&self) -> Option<f64> {
        self.best.as_ref().map(|p| p.cost)
    }

    /// Best-so-far cost after each iteration.
    #[must_use]
    pub fn best_cost_trace(&self) -> Vec<Option<f64>> {
        self.history.iter().map(|s| s.best_so_far).collect()
    }

    /// Serializable view for external renderers.
    #[must_use]
    pub fn to_report(&self, graph: &GridGraph) -> SearchReport {
        SearchReport {
            found: self.found(),
            best_path: self.best.as_ref().map(|p| p.nodes.clone()),
            best_cost: self.best_cost(),
            iterations: self.history.len(),
            pheromone: self.pheromone.to_directed(graph),
        }
    }
}

/// What a renderer needs: the directed pheromone field and the best path.
///
/// Weights are raw; consumers normalize them as they see fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub found: bool,
    pub best_path: Option<Vec<Cell>>,
    pub best_cost: Option<f64>,
    pub iterations: usize,
    pub pheromone: Vec<DirectedWeight>,
}

/// Colony search over a fixed graph.
#[derive(Debug)]
pub struct ColonySearch<'g> {
    graph: &'g GridGraph,
    params: ColonyParams,
    heuristic: Vec<f64>,
    rng: ColonyRng,
}

impl<'g> ColonySearch<'g> {
    /// Create a search with validated parameters and a master seed.
    ///
    /// # Errors
    ///
    /// Returns error if the parameters are invalid.
    pub fn new(graph: &'g GridGraph, params: ColonyParams, seed: u64) -> AcoResult<Self> {
        params.check()?;
        let heuristic = graph
            .edges()
            .iter()
            .map(|e| (1.0 / e.length).powf(params.beta))
            .collect();
        Ok(Self {
            graph,
            params,
            heuristic,
            rng: ColonyRng::new(seed),
        })
    }

    #[must_use]
    pub const fn params(&self) -> &ColonyParams {
        &self.params
    }

    #[must_use]
    pub const fn graph(&self) -> &GridGraph {
        self.graph
    }

    fn endpoint(&self, role: EndpointRole, cell: Cell) -> AcoResult<usize> {
        self.graph
            .node_index(cell)
            .ok_or(AcoError::InvalidEndpoint { role, cell })
    }

    /// Run the full search from `source` to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `AcoError::InvalidEndpoint` if either endpoint is not a node
    /// of the graph, or `AcoError::NonFinitePheromone` if an update
    /// corrupts the field.
    pub fn search(&mut self, source: Cell, sink: Cell) -> AcoResult<SearchOutcome> {
        let source_idx = self.endpoint(EndpointRole::Source, source)?;
        let sink_idx = self.endpoint(EndpointRole::Sink, sink)?;

        tracing::info!(
            %source,
            %sink,
            seed = self.rng.master_seed(),
            n_ants = self.params.n_ants,
            n_iter = self.params.n_iter,
            nodes = self.graph.node_count(),
            "starting colony search"
        );

        let mut field = PheromoneField::uniform(self.graph.edge_count());
        let mut best: Option<AntPath> = None;
        let mut history = Vec::with_capacity(self.params.n_iter);

        for iteration in 0..self.params.n_iter {
            let paths = self.construct_ants(&field, source_idx, sink_idx);

            let mut iteration_best: Option<&AntPath> = None;
            for path in &paths {
                if iteration_best.map_or(true, |b| path.cost < b.cost) {
                    iteration_best = Some(path);
                }
            }
            let iteration_cost = iteration_best.map(|p| p.cost);
            if let Some(candidate) = iteration_best {
                if best.as_ref().map_or(true, |b| candidate.cost < b.cost) {
                    tracing::debug!(iteration, cost = candidate.cost, "new best path");
                    best = Some(candidate.clone());
                }
            }

            field.evaporate(self.params.rho);
            for path in paths.iter().filter(|p| !p.edges().is_empty()) {
                field.deposit(path.edges(), self.params.q / path.cost);
            }
            field.check(iteration)?;

            let stats = IterationStats {
                iteration,
                successes: paths.len(),
                iteration_best: iteration_cost,
                best_so_far: best.as_ref().map(|p| p.cost),
            };
            if self.params.report_every > 0 && iteration % self.params.report_every == 0 {
                tracing::info!(
                    iteration,
                    successes = stats.successes,
                    best = ?stats.best_so_far,
                    "colony progress"
                );
            }
            history.push(stats);
        }

        match &best {
            Some(path) => tracing::info!(cost = path.cost, steps = path.steps(), "search finished"),
            None => tracing::warn!(%source, %sink, "no ant reached the sink"),
        }

        Ok(SearchOutcome {
            pheromone: field,
            best,
            history,
        })
    }

    /// Build this iteration's ants; failed ants are dropped.
    fn construct_ants(&mut self, field: &PheromoneField, source: usize, sink: usize) -> Vec<AntPath> {
        let streams = self.rng.partition(self.params.n_ants);
        let ctx = AntContext {
            graph: self.graph,
            field,
            heuristic: &self.heuristic,
            alpha: self.params.alpha,
            max_steps: self.params.max_steps,
        };

        if self.params.parallel {
            streams
                .into_par_iter()
                .filter_map(|mut rng| ctx.construct(source, sink, &mut rng))
                .collect()
        } else {
            streams
                .into_iter()
                .filter_map(|mut rng| ctx.construct(source, sink, &mut rng))
                .collect()
        }
    }
}
