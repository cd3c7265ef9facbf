//! # antpath
//!
//! Reproducible ant colony pathfinding over obstacle grids.
//!
//! The crate has two halves:
//! - [`grid`]: turns a rectangle minus an obstacle set into an undirected
//!   graph whose edges carry Euclidean lengths
//! - [`colony`]: runs an Ant Colony Optimization search between two nodes of
//!   that graph and returns the pheromone field plus the best path
//!
//! Scenarios tie both together and are loaded from YAML (see [`scenario`]).
//! A run is a pure function of the scenario and its master seed.
//!
//! ## Example
//!
//! ```rust
//! use antpath::prelude::*;
//!
//! let graph = GridGraph::build(4, 4, &ObstacleSet::new(), Adjacency::Eight).unwrap();
//! let params = ColonyParams { n_ants: 20, n_iter: 20, ..Default::default() };
//! let outcome = ColonySearch::new(&graph, params, 42)
//!     .unwrap()
//!     .search(Cell::new(0, 0), Cell::new(3, 3))
//!     .unwrap();
//! assert!(outcome.found());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod colony;
pub mod error;
pub mod grid;
pub mod rng;
pub mod scenario;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::colony::{
        AntPath, ColonyParams, ColonySearch, PheromoneField, SearchOutcome, SearchReport,
    };
    pub use crate::error::{AcoError, AcoResult};
    pub use crate::grid::{Adjacency, Cell, GridGraph, MaskPreset, ObstacleSet, ShapeMask};
    pub use crate::rng::ColonyRng;
    pub use crate::scenario::{Scenario, ScenarioRun};
}

/// Re-export for public API
pub use error::{AcoError, AcoResult};
