//! Default feature rules and shape validation
//!
//! Defaults are derived from the adjacency matrix alone, so they can be
//! regenerated at any time (sync) without other state.

use crate::error::{ArrayKind, InstanceError, Result};
use crate::matrix::{AdjacencyMatrix, FeatureMatrix};

/// Fill value of default node features
pub const DEFAULT_NODE_FEATURE: f32 = 0.0;

/// Fill value of default edge features
pub const DEFAULT_EDGE_FEATURE: f32 = 1.0;

/// Default edge weight
pub const DEFAULT_EDGE_WEIGHT: f32 = 1.0;

/// Width of default node and edge feature vectors
pub const DEFAULT_FEATURE_WIDTH: usize = 1;

/// `N x 1` zeros
pub(crate) fn default_node_features(adjacency: &AdjacencyMatrix) -> FeatureMatrix {
    FeatureMatrix::filled(
        adjacency.num_nodes(),
        DEFAULT_FEATURE_WIDTH,
        DEFAULT_NODE_FEATURE,
    )
}

/// `E x 1` ones
pub(crate) fn default_edge_features(adjacency: &AdjacencyMatrix) -> FeatureMatrix {
    FeatureMatrix::filled(
        adjacency.count_nonzero(),
        DEFAULT_FEATURE_WIDTH,
        DEFAULT_EDGE_FEATURE,
    )
}

/// Length-`E` ones
pub(crate) fn default_edge_weights(adjacency: &AdjacencyMatrix) -> Vec<f32> {
    vec![DEFAULT_EDGE_WEIGHT; adjacency.count_nonzero()]
}

/// Check every array against the node/edge counts of `adjacency`
pub(crate) fn check_shapes(
    adjacency: &AdjacencyMatrix,
    node_features: &FeatureMatrix,
    edge_features: &FeatureMatrix,
    edge_weights: &[f32],
) -> Result<()> {
    let num_nodes = adjacency.num_nodes();
    let num_edges = adjacency.count_nonzero();

    let checks = [
        (ArrayKind::NodeFeatures, num_nodes, node_features.rows()),
        (ArrayKind::EdgeFeatures, num_edges, edge_features.rows()),
        (ArrayKind::EdgeWeights, num_edges, edge_weights.len()),
    ];

    for (array, expected, actual) in checks {
        if expected != actual {
            return Err(InstanceError::shape_mismatch(array, expected, actual));
        }
    }

    Ok(())
}
