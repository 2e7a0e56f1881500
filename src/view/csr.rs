//! Labeled CSR graph view
//!
//! A denormalized join of the adjacency matrix with the node features, edge
//! features and edge weights of an instance.
//!
//! # Layout
//!
//! ```text
//! Matrix: [[0, 1, 0],      Edges (row-major): 0 → 1, 1 → 0, 1 → 2, 2 → 1
//!          [1, 0, 1],
//!          [0, 1, 0]]      row_offsets:     [0, 1, 3, 4]
//!                          col_indices:     [1, 0, 2, 1]
//!                          rev_row_offsets: [0, 1, 3, 4]
//!                          rev_col_indices: [1, 0, 2, 1]   (sources)
//!                          rev_edge_ids:    [1, 0, 3, 2]   (positions in forward order)
//! ```
//!
//! Forward CSR position `i` is edge `i` of the canonical order, so edge
//! attributes are indexed by that position directly.

use crate::error::{InstanceError, Result};
use crate::instance::normalize::{
    DEFAULT_EDGE_FEATURE, DEFAULT_EDGE_WEIGHT, DEFAULT_FEATURE_WIDTH, DEFAULT_NODE_FEATURE,
};
use crate::matrix::{AdjacencyMatrix, FeatureMatrix, NodeId};
use tracing::{debug, warn};

/// Borrowed view of a single edge and its attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef<'a> {
    /// Position in the canonical (row-major) edge order
    pub index: usize,
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Raw adjacency entry
    pub value: f32,
    /// Edge weight attribute
    pub weight: f32,
    /// Edge feature vector
    pub features: &'a [f32],
}

/// Labeled graph built from a [`GraphInstance`](crate::GraphInstance)
///
/// Nodes carry their feature vector; edges carry their feature vector,
/// weight and raw adjacency value. Callers own the view outright: changing
/// it never touches the instance it came from.
///
/// # Example
///
/// ```
/// use graph_instance::{AdjacencyMatrix, GraphInstance, InstanceId, Label, NodeId};
///
/// let adj = AdjacencyMatrix::from_rows(&[[0, 1], [0, 0]]).unwrap();
/// let instance = GraphInstance::new(InstanceId(0), Label::Class(1), adj).unwrap();
///
/// let view = instance.view();
/// let edge = view.edge(NodeId(0), NodeId(1)).unwrap();
/// assert_eq!(edge.weight, 1.0);
/// assert_eq!(edge.features, &[1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    /// Forward CSR: node i's edges start at `row_offsets`[i]
    /// Length: `num_nodes` + 1
    row_offsets: Vec<u32>,

    /// Forward CSR: edge targets
    /// Length: `num_edges`
    col_indices: Vec<u32>,

    /// Edge weight attribute, forward order
    /// Length: `num_edges`
    edge_weights: Vec<f32>,

    /// Raw adjacency entries, forward order
    /// Length: `num_edges`
    edge_values: Vec<f32>,

    /// Edge feature vectors, forward order
    /// Length: `num_edges`
    edge_features: Vec<Vec<f32>>,

    /// Reverse CSR: node i's incoming edges start at `rev_row_offsets`[i]
    /// Length: `num_nodes` + 1
    rev_row_offsets: Vec<u32>,

    /// Reverse CSR: edge sources
    /// Length: `num_edges`
    rev_col_indices: Vec<u32>,

    /// Reverse CSR: forward position of each incoming edge
    /// Length: `num_edges`
    rev_edge_ids: Vec<u32>,

    /// Node feature vectors
    /// Length: `num_nodes`
    node_features: Vec<Vec<f32>>,

    num_nodes: usize,
}

impl GraphView {
    /// Join the adjacency matrix with its aligned feature arrays
    ///
    /// Arrays shorter than the node/edge count (left out of step by direct
    /// edits) are padded with the default row or weight.
    pub(crate) fn build(
        adjacency: &AdjacencyMatrix,
        node_features: &FeatureMatrix,
        edge_features: &FeatureMatrix,
        edge_weights: &[f32],
    ) -> Self {
        let num_nodes = adjacency.num_nodes();
        let num_edges = adjacency.count_nonzero();

        if node_features.rows() != num_nodes
            || edge_features.rows() != num_edges
            || edge_weights.len() != num_edges
        {
            warn!(
                num_nodes,
                num_edges,
                node_feature_rows = node_features.rows(),
                edge_feature_rows = edge_features.rows(),
                edge_weights = edge_weights.len(),
                "feature arrays out of step with adjacency matrix; padding with defaults"
            );
        }

        // Build adjacency lists (temporary) for both forward and reverse
        let mut out_degree = vec![0_u32; num_nodes];
        let mut rev_adj_list: Vec<Vec<(u32, u32)>> = vec![Vec::new(); num_nodes];

        let mut col_indices = Vec::with_capacity(num_edges);
        let mut edge_values = Vec::with_capacity(num_edges);
        let mut weights = Vec::with_capacity(num_edges);
        let mut features = Vec::with_capacity(num_edges);

        for (i, (src, dst, value)) in adjacency.nonzero_entries().enumerate() {
            out_degree[src as usize] += 1;
            #[allow(clippy::cast_possible_truncation)] // Graphs >4B edges not supported yet
            let edge_id = i as u32;
            rev_adj_list[dst as usize].push((src, edge_id));

            col_indices.push(dst);
            edge_values.push(value);
            weights.push(edge_weights.get(i).copied().unwrap_or(DEFAULT_EDGE_WEIGHT));
            features.push(edge_features.get_row(i).map_or_else(
                || vec![DEFAULT_EDGE_FEATURE; DEFAULT_FEATURE_WIDTH],
                <[f32]>::to_vec,
            ));
        }

        // Forward CSR offsets
        let mut row_offsets = Vec::with_capacity(num_nodes + 1);
        let mut offset = 0_u32;
        row_offsets.push(offset);
        for degree in out_degree {
            offset += degree;
            row_offsets.push(offset);
        }

        // Reverse CSR
        let mut rev_row_offsets = Vec::with_capacity(num_nodes + 1);
        let mut rev_col_indices = Vec::with_capacity(num_edges);
        let mut rev_edge_ids = Vec::with_capacity(num_edges);

        let mut rev_offset = 0_u32;
        rev_row_offsets.push(rev_offset);

        for rev_neighbors in &rev_adj_list {
            #[allow(clippy::cast_possible_truncation)]
            let len_u32 = rev_neighbors.len() as u32;
            rev_offset += len_u32;
            rev_row_offsets.push(rev_offset);

            for &(source, edge_id) in rev_neighbors {
                rev_col_indices.push(source);
                rev_edge_ids.push(edge_id);
            }
        }

        let node_features = (0..num_nodes)
            .map(|node| {
                node_features.get_row(node).map_or_else(
                    || vec![DEFAULT_NODE_FEATURE; DEFAULT_FEATURE_WIDTH],
                    <[f32]>::to_vec,
                )
            })
            .collect();

        debug!(num_nodes, num_edges, "built graph view");

        Self {
            row_offsets,
            col_indices,
            edge_weights: weights,
            edge_values,
            edge_features: features,
            rev_row_offsets,
            rev_col_indices,
            rev_edge_ids,
            node_features,
            num_nodes,
        }
    }

    /// Get number of nodes
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Get number of edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.col_indices.len()
    }

    /// Iterate node ids `0..num_nodes`
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        #[allow(clippy::cast_possible_truncation)]
        let to_id = |n: usize| NodeId(n as u32);
        (0..self.num_nodes).map(to_id)
    }

    /// Iterate edges in canonical order
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        (0..self.num_nodes).flat_map(move |src| {
            let start = self.row_offsets[src] as usize;
            let end = self.row_offsets[src + 1] as usize;
            #[allow(clippy::cast_possible_truncation)]
            let src = src as u32;
            (start..end).map(move |i| self.edge_at(src, i))
        })
    }

    /// Look up edge `src → dst`
    #[must_use]
    pub fn edge(&self, src: NodeId, dst: NodeId) -> Option<EdgeRef<'_>> {
        let i = self.position(src, dst)?;
        Some(self.edge_at(src.0, i))
    }

    /// Feature vector of `node`
    #[must_use]
    pub fn node_features(&self, node: NodeId) -> Option<&[f32]> {
        self.node_features.get(node.0 as usize).map(Vec::as_slice)
    }

    /// Targets of edges leaving `node`, ascending
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        let idx = self.check_node(node)?;
        let start = self.row_offsets[idx] as usize;
        let end = self.row_offsets[idx + 1] as usize;

        Ok(&self.col_indices[start..end])
    }

    /// Sources of edges entering `node`, ascending
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn incoming_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        let idx = self.check_node(node)?;
        let start = self.rev_row_offsets[idx] as usize;
        let end = self.rev_row_offsets[idx + 1] as usize;

        Ok(&self.rev_col_indices[start..end])
    }

    /// Incoming edges of `node` with their attributes
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn incoming_edges(&self, node: NodeId) -> Result<Vec<EdgeRef<'_>>> {
        let idx = self.check_node(node)?;
        let start = self.rev_row_offsets[idx] as usize;
        let end = self.rev_row_offsets[idx + 1] as usize;

        Ok((start..end)
            .map(|r| self.edge_at(self.rev_col_indices[r], self.rev_edge_ids[r] as usize))
            .collect())
    }

    /// Replace the feature vector of `node`, returning the previous one
    ///
    /// Returns `None` (and changes nothing) if the node does not exist.
    pub fn set_node_features(&mut self, node: NodeId, features: Vec<f32>) -> Option<Vec<f32>> {
        let slot = self.node_features.get_mut(node.0 as usize)?;
        Some(std::mem::replace(slot, features))
    }

    /// Replace the weight of edge `src → dst`, returning the previous weight
    ///
    /// Returns `None` (and changes nothing) if the edge does not exist.
    pub fn set_edge_weight(&mut self, src: NodeId, dst: NodeId, weight: f32) -> Option<f32> {
        let i = self.position(src, dst)?;
        Some(std::mem::replace(&mut self.edge_weights[i], weight))
    }

    /// Get forward CSR components (offsets, targets, weights)
    #[must_use]
    pub fn csr_components(&self) -> (&[u32], &[u32], &[f32]) {
        (&self.row_offsets, &self.col_indices, &self.edge_weights)
    }

    fn check_node(&self, node: NodeId) -> Result<usize> {
        let idx = node.0 as usize;
        if idx >= self.num_nodes {
            return Err(InstanceError::NodeOutOfRange {
                node: node.0,
                num_nodes: self.num_nodes,
            });
        }
        Ok(idx)
    }

    fn position(&self, src: NodeId, dst: NodeId) -> Option<usize> {
        let idx = src.0 as usize;
        if idx >= self.num_nodes {
            return None;
        }
        let start = self.row_offsets[idx] as usize;
        let end = self.row_offsets[idx + 1] as usize;

        // Targets within a row are ascending (row-major scan)
        self.col_indices[start..end]
            .binary_search(&dst.0)
            .ok()
            .map(|offset| start + offset)
    }

    fn edge_at(&self, src: u32, i: usize) -> EdgeRef<'_> {
        EdgeRef {
            index: i,
            source: NodeId(src),
            target: NodeId(self.col_indices[i]),
            value: self.edge_values[i],
            weight: self.edge_weights[i],
            features: &self.edge_features[i],
        }
    }
}
