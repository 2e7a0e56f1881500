//! Graph instance: dense adjacency matrix plus aligned feature arrays
//!
//! # Alignment
//!
//! ```text
//! data (N x N)           node_features (N x F_n)   row i  ↔ node i
//!   nonzero scan  ──►    edge_features (E x F_e)   row k  ↔ k-th nonzero entry
//!   (row-major)          edge_weights  (E)         entry k ↔ k-th nonzero entry
//! ```
//!
//! Every nonzero entry is one directed edge, so a symmetric matrix stores an
//! undirected edge as two edges. Construction sizing, sync and the graph view
//! all use this count.
//!
//! # Cached view
//!
//! [`GraphInstance::view`] builds a [`GraphView`] on first use and caches it.
//! Every `&mut self` method that can change the matrix or the feature arrays
//! drops the cache, so the next call rebuilds.

use super::normalize::{
    check_shapes, default_edge_features, default_edge_weights, default_node_features,
};
use super::{DatasetHandle, Instance, InstanceId, Label};
use crate::error::Result;
use crate::matrix::{AdjacencyMatrix, Element, FeatureInput, FeatureMatrix};
use crate::view::GraphView;
use std::cell::OnceCell;
use std::ops::Range;
use tracing::debug;

/// Labeled graph instance
///
/// Owns its adjacency matrix and feature arrays exclusively. The only shared
/// state is the optional [`DatasetHandle`].
///
/// `GraphInstance` is `Send` but not `Sync`: the view cache is not internally
/// synchronized, so concurrent access to one instance needs external locking.
///
/// # Example
///
/// ```
/// use graph_instance::{AdjacencyMatrix, FeatureMatrix, GraphInstance, InstanceId, Label};
///
/// let adj = AdjacencyMatrix::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
/// let instance = GraphInstance::builder(InstanceId(7), Label::Class(0), adj)
///     .node_features(FeatureMatrix::from_rows(&[[0.5, 1.0], [0.0, 1.0], [1.0, 0.0]]).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(instance.num_nodes(), 3);
/// assert_eq!(instance.num_edges(), 4);
/// assert_eq!(instance.edge_weights(), &[1.0, 1.0, 1.0, 1.0]);
/// assert_eq!(instance.degrees(), vec![1, 2, 1]);
/// ```
#[derive(Debug)]
pub struct GraphInstance {
    id: InstanceId,
    label: Label,
    data: AdjacencyMatrix,
    node_features: FeatureMatrix,
    edge_features: FeatureMatrix,
    edge_weights: Vec<f32>,
    graph_features: Option<Vec<f32>>,
    dataset: Option<DatasetHandle>,
    view: OnceCell<GraphView>,
}

/// Builder for [`GraphInstance`]
///
/// Unset arrays take their defaults: `N x 1` zero node features, `E x 1`
/// one edge features and length-`E` one edge weights.
#[derive(Debug)]
#[must_use]
pub struct GraphInstanceBuilder {
    id: InstanceId,
    label: Label,
    data: AdjacencyMatrix,
    node_features: FeatureInput,
    edge_features: FeatureInput,
    edge_weights: Option<Vec<f32>>,
    graph_features: Option<Vec<f32>>,
    dataset: Option<DatasetHandle>,
}

impl GraphInstanceBuilder {
    /// Node features, or a placeholder meaning "use the default"
    pub fn node_features(mut self, features: impl Into<FeatureInput>) -> Self {
        self.node_features = features.into();
        self
    }

    /// Edge features, or a placeholder meaning "use the default"
    pub fn edge_features(mut self, features: impl Into<FeatureInput>) -> Self {
        self.edge_features = features.into();
        self
    }

    /// Edge weights in canonical edge order, coerced to `f32`
    pub fn edge_weights<T, I>(mut self, weights: I) -> Self
    where
        T: Element,
        I: IntoIterator<Item = T>,
    {
        self.edge_weights = Some(weights.into_iter().map(Element::to_f32).collect());
        self
    }

    /// Instance-level features (no shape constraint)
    pub fn graph_features(mut self, features: Vec<f32>) -> Self {
        self.graph_features = Some(features);
        self
    }

    /// Attach to an enclosing dataset
    pub fn dataset(mut self, dataset: DatasetHandle) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Normalize inputs and validate shapes
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::ShapeMismatch`](crate::InstanceError::ShapeMismatch)
    /// if node-feature rows differ from the node count, or edge-feature rows
    /// or edge-weight length differ from the nonzero count of the matrix.
    pub fn build(self) -> Result<GraphInstance> {
        let data = self.data;
        let node_features = self
            .node_features
            .resolve_or_else(|| default_node_features(&data));
        let edge_features = self
            .edge_features
            .resolve_or_else(|| default_edge_features(&data));
        let edge_weights = self
            .edge_weights
            .unwrap_or_else(|| default_edge_weights(&data));

        check_shapes(&data, &node_features, &edge_features, &edge_weights)?;

        debug!(
            id = self.id.0,
            num_nodes = data.num_nodes(),
            num_edges = edge_weights.len(),
            "constructed graph instance"
        );

        Ok(GraphInstance {
            id: self.id,
            label: self.label,
            data,
            node_features,
            edge_features,
            edge_weights,
            graph_features: self.graph_features,
            dataset: self.dataset,
            view: OnceCell::new(),
        })
    }
}

impl GraphInstance {
    /// Start building an instance over `data`
    pub fn builder(id: InstanceId, label: Label, data: AdjacencyMatrix) -> GraphInstanceBuilder {
        GraphInstanceBuilder {
            id,
            label,
            data,
            node_features: FeatureInput::Absent,
            edge_features: FeatureInput::Absent,
            edge_weights: None,
            graph_features: None,
            dataset: None,
        }
    }

    /// Instance with default features and weights
    ///
    /// # Errors
    ///
    /// Never fails for default arrays; the `Result` mirrors [`GraphInstanceBuilder::build`].
    pub fn new(id: InstanceId, label: Label, data: AdjacencyMatrix) -> Result<Self> {
        Self::builder(id, label, data).build()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Adjacency matrix
    #[must_use]
    pub const fn adjacency(&self) -> &AdjacencyMatrix {
        &self.data
    }

    /// Node feature matrix (`N x F_n`)
    #[must_use]
    pub const fn node_features(&self) -> &FeatureMatrix {
        &self.node_features
    }

    /// Edge feature matrix (`E x F_e`)
    #[must_use]
    pub const fn edge_features(&self) -> &FeatureMatrix {
        &self.edge_features
    }

    /// Edge weights (length `E`)
    #[must_use]
    pub fn edge_weights(&self) -> &[f32] {
        &self.edge_weights
    }

    /// Instance-level features
    #[must_use]
    pub fn graph_features(&self) -> Option<&[f32]> {
        self.graph_features.as_deref()
    }

    /// Replace instance-level features
    ///
    /// The graph view does not carry graph features, so the cache is kept.
    pub fn set_graph_features(&mut self, features: Option<Vec<f32>>) {
        self.graph_features = features;
    }

    /// Mutable adjacency matrix
    ///
    /// Drops the cached view. Changing which entries are nonzero leaves the
    /// edge arrays out of step until [`sync_edge_features`](Self::sync_edge_features)
    /// and [`sync_edge_weights`](Self::sync_edge_weights) run;
    /// [`validate`](Self::validate) reports that state.
    pub fn adjacency_mut(&mut self) -> &mut AdjacencyMatrix {
        self.invalidate_view();
        &mut self.data
    }

    /// Mutable node features. Drops the cached view.
    pub fn node_features_mut(&mut self) -> &mut FeatureMatrix {
        self.invalidate_view();
        &mut self.node_features
    }

    /// Mutable edge features. Drops the cached view.
    pub fn edge_features_mut(&mut self) -> &mut FeatureMatrix {
        self.invalidate_view();
        &mut self.edge_features
    }

    /// Mutable edge weights. Drops the cached view.
    pub fn edge_weights_mut(&mut self) -> &mut Vec<f32> {
        self.invalidate_view();
        &mut self.edge_weights
    }

    /// Re-check the shape invariants
    ///
    /// Construction already guarantees them; this catches direct edits made
    /// through the `*_mut` accessors.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::ShapeMismatch`](crate::InstanceError::ShapeMismatch)
    /// for the first array out of step with the matrix.
    pub fn validate(&self) -> Result<()> {
        check_shapes(
            &self.data,
            &self.node_features,
            &self.edge_features,
            &self.edge_weights,
        )
    }

    // ------------------------------------------------------------------
    // Sync
    // ------------------------------------------------------------------

    /// Reset node features to `N x 1` zeros, discarding custom values
    pub fn sync_node_features(&mut self) {
        self.node_features = default_node_features(&self.data);
        self.invalidate_view();
    }

    /// Reset edge features to `E x 1` ones, discarding custom values
    pub fn sync_edge_features(&mut self) {
        self.edge_features = default_edge_features(&self.data);
        self.invalidate_view();
    }

    /// Reset edge weights to length-`E` ones, discarding custom values
    pub fn sync_edge_weights(&mut self) {
        self.edge_weights = default_edge_weights(&self.data);
        self.invalidate_view();
    }

    /// Reset node features, edge features and edge weights to their defaults
    pub fn sync_features_and_weights(&mut self) {
        self.sync_node_features();
        self.sync_edge_features();
        self.sync_edge_weights();
    }

    /// Sync this instance to default features, then clone it
    ///
    /// Any custom features or weights on `self` are discarded. Use
    /// [`Clone::clone`] for a copy that leaves the source untouched.
    #[must_use]
    pub fn clone_with_synced_defaults(&mut self) -> Self {
        self.sync_features_and_weights();
        self.clone()
    }

    // ------------------------------------------------------------------
    // Graph view
    // ------------------------------------------------------------------

    /// Labeled graph view, built on first use
    ///
    /// Returns an independent copy of the cached view on every call.
    #[must_use]
    pub fn view(&self) -> GraphView {
        self.cached_view().clone()
    }

    /// Drop the cached view so the next access rebuilds it
    pub fn invalidate_view(&mut self) {
        if self.view.take().is_some() {
            debug!(id = self.id.0, "invalidated cached graph view");
        }
    }

    /// Whether a view is currently cached
    #[must_use]
    pub fn has_cached_view(&self) -> bool {
        self.view.get().is_some()
    }

    fn cached_view(&self) -> &GraphView {
        self.view.get_or_init(|| {
            GraphView::build(
                &self.data,
                &self.node_features,
                &self.edge_features,
                &self.edge_weights,
            )
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of nodes (rows of the adjacency matrix)
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.data.num_nodes()
    }

    /// Number of edges, read from the graph view
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.cached_view().num_edges()
    }

    /// Node indices `0..num_nodes`
    #[must_use]
    pub const fn nodes(&self) -> Range<usize> {
        0..self.data.num_nodes()
    }

    /// Nonzero entries of row `node` (values, not indices)
    ///
    /// # Panics
    ///
    /// Panics if `node >= num_nodes`.
    #[must_use]
    pub fn neighbors(&self, node: usize) -> Vec<f32> {
        self.data
            .row(node)
            .iter()
            .copied()
            .filter(|&v| v != 0.0)
            .collect()
    }

    /// Column indices of the nonzero entries of row `node`
    ///
    /// # Panics
    ///
    /// Panics if `node >= num_nodes`.
    #[must_use]
    pub fn neighbor_indices(&self, node: usize) -> Vec<usize> {
        self.data
            .row(node)
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(j, _)| j)
            .collect()
    }

    /// Out-degree of `node`
    ///
    /// # Panics
    ///
    /// Panics if `node >= num_nodes`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// Out-degree of every node, in node order
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        self.nodes().map(|node| self.degree(node)).collect()
    }
}

/// Deep copy of matrix, features and labels; the dataset handle is shared
/// and the copy starts without a cached view. The source is not modified.
impl Clone for GraphInstance {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: self.label,
            data: self.data.clone(),
            node_features: self.node_features.clone(),
            edge_features: self.edge_features.clone(),
            edge_weights: self.edge_weights.clone(),
            graph_features: self.graph_features.clone(),
            dataset: self.dataset.clone(),
            view: OnceCell::new(),
        }
    }
}

/// Compares identity, label, matrix and feature arrays. The view cache and
/// the dataset handle are ignored.
impl PartialEq for GraphInstance {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.data == other.data
            && self.node_features == other.node_features
            && self.edge_features == other.edge_features
            && self.edge_weights == other.edge_weights
            && self.graph_features == other.graph_features
    }
}

impl Instance for GraphInstance {
    type Data = AdjacencyMatrix;

    fn id(&self) -> InstanceId {
        self.id
    }

    fn label(&self) -> &Label {
        &self.label
    }

    fn data(&self) -> &AdjacencyMatrix {
        &self.data
    }

    fn dataset(&self) -> Option<&DatasetHandle> {
        self.dataset.as_ref()
    }
}
