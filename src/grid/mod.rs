//! Grid graph builder.
//!
//! Turns a `width × height` rectangle and a set of blocked cells into an
//! undirected graph: one node per open cell, one edge per unordered pair of
//! adjacent open cells, each edge weighted by Euclidean length.
//!
//! # Edge deduplication
//!
//! While scanning in raster order every node looks at all of its neighbor
//! offsets, so each adjacency is discovered twice. An edge `(p, q)` is only
//! emitted when `p < q` (lexicographic on `x`, then `y`), which keeps exactly
//! one of the two discoveries.
//!
//! # Example
//!
//! ```rust
//! use antpath::grid::{Adjacency, Cell, GridGraph, ObstacleSet};
//!
//! let graph = GridGraph::build(3, 3, &ObstacleSet::new(), Adjacency::Eight).unwrap();
//! assert_eq!(graph.node_count(), 9);
//! assert_eq!(graph.edge_count(), 20);
//! assert!(graph.edge_between(Cell::new(0, 0), Cell::new(1, 1)).is_some());
//! ```

pub mod mask;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{AcoError, AcoResult};

pub use mask::{MaskPreset, RowBand, ShapeMask};

/// Set of blocked cells. Entries outside the rectangle are ignored.
pub type ObstacleSet = HashSet<Cell>;

/// Integer grid coordinate.
///
/// Ordering is lexicographic on `x`, then `y`; the edge deduplication rule
/// depends on it. Serialized as a two-element `[x, y]` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a cell at `(x, y)`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by an offset.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another cell.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        f64::from(other.x - self.x).hypot(f64::from(other.y - self.y))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Neighborhood used when connecting cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Adjacency {
    /// Orthogonal neighbors only (von Neumann).
    Four,
    /// Orthogonal plus diagonal neighbors (Moore).
    #[default]
    Eight,
}

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

impl Adjacency {
    /// Build from the `diagonal` flag used in scenario files.
    #[must_use]
    pub const fn from_diagonal(diagonal: bool) -> Self {
        if diagonal {
            Self::Eight
        } else {
            Self::Four
        }
    }

    /// Neighbor offsets in scan order.
    #[must_use]
    pub fn offsets(self) -> Vec<(i32, i32)> {
        match self {
            Self::Four => ORTHOGONAL.to_vec(),
            Self::Eight => ORTHOGONAL.iter().chain(DIAGONAL.iter()).copied().collect(),
        }
    }
}

/// Undirected edge between two adjacent open cells, with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridEdge {
    pub a: Cell,
    pub b: Cell,
    /// Euclidean length: 1.0 orthogonal, √2 diagonal.
    pub length: f64,
}

/// Entry of a node's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Index of the neighboring node.
    pub node: usize,
    /// Index of the connecting edge.
    pub edge: usize,
}

/// Read-only grid graph with adjacency index.
#[derive(Debug, Clone)]
pub struct GridGraph {
    width: i32,
    height: i32,
    adjacency: Adjacency,
    nodes: Vec<Cell>,
    index: HashMap<Cell, usize>,
    edges: Vec<GridEdge>,
    neighbors: Vec<Vec<Neighbor>>,
}

impl GridGraph {
    /// Build the graph for a rectangle with obstacles.
    ///
    /// # Errors
    ///
    /// Returns `AcoError::Config` if `width` or `height` is not positive.
    pub fn build(
        width: i32,
        height: i32,
        obstacles: &ObstacleSet,
        adjacency: Adjacency,
    ) -> AcoResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(AcoError::config(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }

        let open = |c: Cell| {
            (0..width).contains(&c.x) && (0..height).contains(&c.y) && !obstacles.contains(&c)
        };

        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        for y in 0..height {
            for x in 0..width {
                let cell = Cell::new(x, y);
                if open(cell) {
                    index.insert(cell, nodes.len());
                    nodes.push(cell);
                }
            }
        }

        let offsets = adjacency.offsets();
        let mut edges = Vec::new();
        let mut neighbors = vec![Vec::new(); nodes.len()];
        for (p_idx, &p) in nodes.iter().enumerate() {
            for &(dx, dy) in &offsets {
                let q = p.offset(dx, dy);
                if !open(q) || p >= q {
                    continue;
                }
                let Some(&q_idx) = index.get(&q) else {
                    continue;
                };
                let edge = edges.len();
                edges.push(GridEdge {
                    a: p,
                    b: q,
                    length: p.distance_to(q),
                });
                neighbors[p_idx].push(Neighbor { node: q_idx, edge });
                neighbors[q_idx].push(Neighbor { node: p_idx, edge });
            }
        }

        tracing::debug!(
            width,
            height,
            nodes = nodes.len(),
            edges = edges.len(),
            ?adjacency,
            "built grid graph"
        );

        Ok(Self {
            width,
            height,
            adjacency,
            nodes,
            index,
            edges,
            neighbors,
        })
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Open cells in raster order.
    #[must_use]
    pub fn nodes(&self) -> &[Cell] {
        &self.nodes
    }

    /// Deduplicated edges in emission order.
    #[must_use]
    pub fn edges(&self) -> &[GridEdge] {
        &self.edges
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if `cell` is an open node of this graph.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell)
    }

    /// Node index of a cell.
    #[must_use]
    pub fn node_index(&self, cell: Cell) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    /// Cell at a node index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn node(&self, idx: usize) -> Cell {
        self.nodes[idx]
    }

    /// Adjacency list of a node.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn neighbors(&self, idx: usize) -> &[Neighbor] {
        &self.neighbors[idx]
    }

    /// Edge id joining two cells, in either direction.
    #[must_use]
    pub fn edge_between(&self, u: Cell, v: Cell) -> Option<usize> {
        let u_idx = self.node_index(u)?;
        let v_idx = self.node_index(v)?;
        self.neighbors[u_idx]
            .iter()
            .find(|n| n.node == v_idx)
            .map(|n| n.edge)
    }

    /// Length of the edge joining two cells.
    #[must_use]
    pub fn edge_length(&self, u: Cell, v: Cell) -> Option<f64> {
        self.edge_between(u, v).map(|e| self.edges[e].length)
    }

    /// Sum of edge lengths along a cell sequence, `None` if any hop is not
    /// an edge.
    #[must_use]
    pub fn path_cost(&self, path: &[Cell]) -> Option<f64> {
        path.windows(2)
            .map(|w| self.edge_length(w[0], w[1]))
            .sum()
    }
}
