//! Labeled graph views
//!
//! Traversal-friendly CSR representation handed to consumers of an instance.

pub mod csr;

pub use csr::{EdgeRef, GraphView};
