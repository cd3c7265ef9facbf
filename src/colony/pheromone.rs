//! Pheromone field.
//!
//! One weight per undirected edge. Both directed lookups of an edge resolve
//! to the same slot, so `τ(u, v) == τ(v, u)` holds by construction rather
//! than by keeping two copies in step.
//!
//! ```text
//! Evaporation:    τ ← (1 − ρ)·τ
//! Reinforcement:  τ ← τ + Q / L(path)   for every edge on a successful path
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AcoError, AcoResult};
use crate::grid::{Cell, GridGraph};

/// Weight every edge starts with.
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Pheromone weight on one direction of an edge, as handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectedWeight {
    pub from: Cell,
    pub to: Cell,
    pub weight: f64,
}

/// Edge-indexed pheromone weights.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneField {
    weights: Vec<f64>,
}

impl PheromoneField {
    /// Uniform field over `edge_count` edges.
    #[must_use]
    pub fn uniform(edge_count: usize) -> Self {
        Self {
            weights: vec![INITIAL_PHEROMONE; edge_count],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of an edge id.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is out of range.
    #[must_use]
    pub fn weight(&self, edge: usize) -> f64 {
        self.weights[edge]
    }

    /// All weights, indexed like [`GridGraph::edges`].
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight on the directed edge `u → v`, `None` when the cells are not
    /// adjacent.
    #[must_use]
    pub fn get(&self, graph: &GridGraph, u: Cell, v: Cell) -> Option<f64> {
        graph.edge_between(u, v).map(|e| self.weights[e])
    }

    /// Largest weight, 0.0 for an empty field.
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        self.weights.iter().copied().fold(0.0, f64::max)
    }

    /// Multiply every weight by `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for w in &mut self.weights {
            *w *= keep;
        }
    }

    /// Add `amount` to every listed edge.
    pub fn deposit(&mut self, edges: &[usize], amount: f64) {
        for &e in edges {
            self.weights[e] += amount;
        }
    }

    /// Stop the run if any weight is NaN, infinite or negative.
    ///
    /// # Errors
    ///
    /// Returns `AcoError::NonFinitePheromone` for the first bad edge.
    pub fn check(&self, iteration: usize) -> AcoResult<()> {
        match self
            .weights
            .iter()
            .position(|w| !w.is_finite() || *w < 0.0)
        {
            Some(edge) => Err(AcoError::NonFinitePheromone {
                edge,
                value: self.weights[edge],
                iteration,
            }),
            None => Ok(()),
        }
    }

    /// Both directions of every edge, `a → b` first.
    #[must_use]
    pub fn to_directed(&self, graph: &GridGraph) -> Vec<DirectedWeight> {
        graph
            .edges()
            .iter()
            .zip(&self.weights)
            .flat_map(|(edge, &weight)| {
                [
                    DirectedWeight {
                        from: edge.a,
                        to: edge.b,
                        weight,
                    },
                    DirectedWeight {
                        from: edge.b,
                        to: edge.a,
                        weight,
                    },
                ]
            })
            .collect()
    }
}
