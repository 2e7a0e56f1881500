//! graph-instance: labeled graph instances for graph-learning pipelines
//!
//! # Overview
//!
//! A [`GraphInstance`] bundles a dense adjacency matrix with node features,
//! edge features, edge weights and optional graph-level features, and keeps
//! them aligned. A traversal-friendly [`GraphView`] is built lazily, cached,
//! and handed out as an independent copy.
//!
//! # Quick Start
//!
//! ```
//! use graph_instance::{AdjacencyMatrix, GraphInstance, InstanceId, Label, NodeId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Two undirected edges stored symmetrically = four directed edges
//! let adj = AdjacencyMatrix::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]])?;
//! let mut instance = GraphInstance::builder(InstanceId(0), Label::Class(1), adj)
//!     .edge_weights([0.5, 1.0, 1.0, 0.5])
//!     .build()?;
//!
//! assert_eq!(instance.num_edges(), 4);
//! assert_eq!(instance.neighbors(1), vec![1.0, 1.0]);
//!
//! // Edge attributes follow row-major nonzero order
//! let view = instance.view();
//! assert_eq!(view.edge(NodeId(0), NodeId(1)).map(|e| e.weight), Some(0.5));
//!
//! // Reset to default features; the cached view is rebuilt on next access
//! instance.sync_features_and_weights();
//! assert_eq!(instance.edge_weights(), &[1.0; 4]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Architecture
//!
//! - **Matrix**: dense row-major adjacency and feature storage
//! - **Instance**: construction, normalization, sync and copy semantics
//! - **View**: forward/reverse CSR graph joined with node and edge attributes
//!
//! Every nonzero adjacency entry is one directed edge. Symmetric matrices are
//! not collapsed to undirected edges.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod instance;
pub mod matrix;
pub mod view;

// Re-export core types
pub use error::{ArrayKind, InstanceError, Result};
pub use instance::{
    DatasetHandle, GraphInstance, GraphInstanceBuilder, Instance, InstanceId, Label,
    DEFAULT_EDGE_FEATURE, DEFAULT_EDGE_WEIGHT, DEFAULT_FEATURE_WIDTH, DEFAULT_NODE_FEATURE,
};
pub use matrix::{AdjacencyMatrix, Element, FeatureInput, FeatureMatrix, NodeId};
pub use view::{EdgeRef, GraphView};
