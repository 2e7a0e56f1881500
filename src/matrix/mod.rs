//! Dense matrix storage
//!
//! Provides the adjacency matrix backing every instance and the feature
//! matrices aligned with its nodes and edges.

pub mod adjacency;
pub mod element;
pub mod features;

pub use adjacency::{AdjacencyMatrix, NodeId};
pub use element::Element;
pub use features::{FeatureInput, FeatureMatrix};
