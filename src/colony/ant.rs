//! Single-ant path construction.
//!
//! ```text
//! w(n) = τ(c, n)^α · (1 / d(c, n))^β        for unvisited neighbors n of c
//! P(n) = w(n) / Σ w
//! ```
//!
//! The ant starts at the source, marks it visited and repeatedly picks an
//! unvisited neighbor by roulette-wheel selection until it stands on the
//! sink. A dead end, or running out of steps, discards the ant.

use serde::{Deserialize, Serialize};

use super::pheromone::PheromoneField;
use crate::grid::{Cell, GridGraph};
use crate::rng::ColonyRng;

/// A completed walk from source to sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntPath {
    /// Visited cells, source first, sink last, no repeats.
    pub nodes: Vec<Cell>,
    /// Sum of traversed edge lengths.
    pub cost: f64,
    /// Traversed edge ids, one fewer than `nodes`.
    #[serde(skip)]
    pub(crate) edges: Vec<usize>,
}

impl AntPath {
    /// Edge ids along the path.
    #[must_use]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    /// Number of moves taken.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.edges.len()
    }
}

/// Read-only inputs shared by every ant of one iteration.
#[derive(Debug, Clone, Copy)]
pub struct AntContext<'a> {
    pub graph: &'a GridGraph,
    pub field: &'a PheromoneField,
    /// `(1 / length)^β` per edge, computed once per run.
    pub heuristic: &'a [f64],
    pub alpha: f64,
    pub max_steps: usize,
}

struct Candidate {
    node: usize,
    edge: usize,
    weight: f64,
}

impl AntContext<'_> {
    /// Walk one ant from `source` to `sink` (node indices).
    ///
    /// Returns `None` on a dead end or after `max_steps` moves without
    /// reaching the sink.
    pub fn construct(&self, source: usize, sink: usize, rng: &mut ColonyRng) -> Option<AntPath> {
        let mut visited = vec![false; self.graph.node_count()];
        visited[source] = true;

        let mut nodes = vec![self.graph.node(source)];
        let mut edges = Vec::new();
        let mut cost = 0.0;
        let mut current = source;
        let mut candidates = Vec::new();

        loop {
            if current == sink {
                return Some(AntPath { nodes, cost, edges });
            }
            if edges.len() >= self.max_steps {
                return None;
            }

            candidates.clear();
            let mut total = 0.0;
            for n in self.graph.neighbors(current) {
                if visited[n.node] {
                    continue;
                }
                let weight = self.field.weight(n.edge).powf(self.alpha) * self.heuristic[n.edge];
                total += weight;
                candidates.push(Candidate {
                    node: n.node,
                    edge: n.edge,
                    weight,
                });
            }

            let chosen = roulette(&candidates, total, rng)?;
            visited[chosen.node] = true;
            nodes.push(self.graph.node(chosen.node));
            edges.push(chosen.edge);
            cost += self.graph.edges()[chosen.edge].length;
            current = chosen.node;
        }
    }
}

/// First candidate whose cumulative weight reaches `u · total`.
fn roulette<'c>(candidates: &'c [Candidate], total: f64, rng: &mut ColonyRng) -> Option<&'c Candidate> {
    let last = candidates.last()?;
    let draw = rng.gen_f64() * total;
    let mut cumulative = 0.0;
    for candidate in candidates {
        cumulative += candidate.weight;
        if cumulative >= draw {
            return Some(candidate);
        }
    }
    // rounding left the draw just above the running sum
    Some(last)
}
