//! Error types for graph instance construction

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = InstanceError> = std::result::Result<T, E>;

/// Which per-node or per-edge array failed a shape check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    /// Node feature matrix (one row per node)
    NodeFeatures,
    /// Edge feature matrix (one row per nonzero adjacency entry)
    EdgeFeatures,
    /// Edge weight vector (one entry per nonzero adjacency entry)
    EdgeWeights,
}

impl fmt::Display for ArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NodeFeatures => "node_features",
            Self::EdgeFeatures => "edge_features",
            Self::EdgeWeights => "edge_weights",
        };
        f.write_str(name)
    }
}

/// Errors raised while building matrices or graph instances.
///
/// Only construction can fail. Queries, sync operations and cloning are
/// total over a validated instance.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// A feature or weight array disagrees with the node/edge count of the
    /// adjacency matrix.
    #[error("shape mismatch in {array}: expected {expected} rows, got {actual}")]
    ShapeMismatch {
        /// Offending array
        array: ArrayKind,
        /// Count derived from the adjacency matrix
        expected: usize,
        /// Count actually supplied
        actual: usize,
    },

    /// Adjacency matrix is not square.
    #[error("adjacency matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count of the first row that broke squareness
        cols: usize,
    },

    /// A feature matrix row has a different width than the first row.
    #[error("ragged feature rows: row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        /// Index of the ragged row
        row: usize,
        /// Width of row 0
        expected: usize,
        /// Width of the ragged row
        actual: usize,
    },

    /// An edge endpoint is outside `0..num_nodes`.
    #[error("node {node} out of range for graph with {num_nodes} nodes")]
    NodeOutOfRange {
        /// Offending node index
        node: u32,
        /// Number of nodes in the matrix
        num_nodes: usize,
    },
}

impl InstanceError {
    pub(crate) const fn shape_mismatch(array: ArrayKind, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            array,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = InstanceError::shape_mismatch(ArrayKind::EdgeWeights, 4, 3);
        assert_eq!(
            err.to_string(),
            "shape mismatch in edge_weights: expected 4 rows, got 3"
        );
    }

    #[test]
    fn test_not_square_message() {
        let err = InstanceError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.to_string(), "adjacency matrix must be square, got 2x3");
    }
}
