//! Error types for antpath.
//!
//! Every fallible operation returns `Result<T, AcoError>`. An unreachable
//! sink is *not* an error: the search reports it as an outcome without a
//! best path.

use thiserror::Error;

use crate::grid::Cell;

/// Result type alias for antpath operations.
pub type AcoResult<T> = Result<T, AcoError>;

/// Which end of a route an endpoint error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    /// Route start.
    Source,
    /// Route destination.
    Sink,
}

impl std::fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Sink => write!(f, "sink"),
        }
    }
}

/// Unified error type for all antpath operations.
#[derive(Debug, Error)]
pub enum AcoError {
    // ===== Geometry =====
    /// Source or sink is outside the grid or sits on an obstacle.
    #[error("{role} {cell} is not a traversable grid node")]
    InvalidEndpoint {
        /// Which endpoint was rejected.
        role: EndpointRole,
        /// The offending coordinate.
        cell: Cell,
    },

    /// A route references a waypoint name that is not in the table.
    #[error("unknown waypoint '{0}'")]
    UnknownWaypoint(String),

    // ===== Field guard =====
    /// Pheromone weight became NaN, infinite or negative.
    #[error("pheromone on edge {edge} became {value} at iteration {iteration}")]
    NonFinitePheromone {
        /// Edge id inside the graph.
        edge: usize,
        /// The offending weight.
        value: f64,
        /// Iteration in which the update happened.
        iteration: usize,
    },

    // ===== Configuration =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AcoError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// True for errors raised by the caller's input rather than by the run.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEndpoint { .. }
                | Self::UnknownWaypoint(_)
                | Self::Config { .. }
                | Self::YamlParse(_)
                | Self::Validation(_)
        )
    }
}

impl From<serde_json::Error> for AcoError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
