//! Dense adjacency matrix
//!
//! Row-major `N x N` storage. A nonzero entry `(i, j)` is a directed edge
//! `i → j` whose value doubles as an implicit weight.
//!
//! # Canonical edge order
//!
//! ```text
//! Matrix:            Row-major nonzero scan:
//!   [0 1 0]            edge 0: 0 → 1
//!   [1 0 1]            edge 1: 1 → 0
//!   [0 1 0]            edge 2: 1 → 2
//!                      edge 3: 2 → 1
//! ```
//!
//! Every edge-aligned array (edge features, edge weights, view edges) uses
//! this order.

use super::Element;
use crate::error::{InstanceError, Result};

/// Node identifier (zero-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Square dense adjacency matrix with `f32` entries
///
/// # Example
///
/// ```
/// use graph_instance::AdjacencyMatrix;
///
/// let adj = AdjacencyMatrix::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
/// assert_eq!(adj.num_nodes(), 3);
/// assert_eq!(adj.count_nonzero(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdjacencyMatrix {
    /// Row-major entries
    /// Length: `num_nodes` * `num_nodes`
    values: Vec<f32>,

    /// Number of rows (== number of columns)
    num_nodes: usize,
}

impl AdjacencyMatrix {
    /// Create an edgeless matrix with `num_nodes` nodes
    #[must_use]
    pub fn zeros(num_nodes: usize) -> Self {
        Self {
            values: vec![0.0; num_nodes * num_nodes],
            num_nodes,
        }
    }

    /// Build from nested rows of any numeric type, coercing to `f32`
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NotSquare`] if any row length differs from the
    /// number of rows.
    pub fn from_rows<T, R>(rows: &[R]) -> Result<Self>
    where
        T: Element,
        R: AsRef<[T]>,
    {
        let num_nodes = rows.len();
        let mut values = Vec::with_capacity(num_nodes * num_nodes);

        for row in rows {
            let row = row.as_ref();
            if row.len() != num_nodes {
                return Err(InstanceError::NotSquare {
                    rows: num_nodes,
                    cols: row.len(),
                });
            }
            values.extend(row.iter().map(|&v| v.to_f32()));
        }

        Ok(Self { values, num_nodes })
    }

    /// Build from an edge list of `(source, target, value)` triples
    ///
    /// Later duplicates overwrite earlier ones; a zero value leaves no edge.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NodeOutOfRange`] if an endpoint is `>= num_nodes`.
    pub fn from_edge_list(num_nodes: usize, edges: &[(NodeId, NodeId, f32)]) -> Result<Self> {
        let mut matrix = Self::zeros(num_nodes);

        for &(src, dst, value) in edges {
            for node in [src, dst] {
                if node.0 as usize >= num_nodes {
                    return Err(InstanceError::NodeOutOfRange {
                        node: node.0,
                        num_nodes,
                    });
                }
            }
            matrix.set(src.0 as usize, dst.0 as usize, value);
        }

        Ok(matrix)
    }

    /// Number of nodes (rows)
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Entry `(src, dst)`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, src: usize, dst: usize) -> f32 {
        self.values[self.offset(src, dst)]
    }

    /// Overwrite entry `(src, dst)`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn set(&mut self, src: usize, dst: usize, value: f32) {
        let idx = self.offset(src, dst);
        self.values[idx] = value;
    }

    /// Row `node` as a slice
    ///
    /// # Panics
    ///
    /// Panics if `node >= num_nodes`.
    #[must_use]
    pub fn row(&self, node: usize) -> &[f32] {
        let start = node * self.num_nodes;
        &self.values[start..start + self.num_nodes]
    }

    /// Number of nonzero entries (directed edge count)
    #[must_use]
    pub fn count_nonzero(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }

    /// Iterate nonzero entries as `(source, target, value)` in row-major order
    pub fn nonzero_entries(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        let n = self.num_nodes;
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(move |(idx, &v)| {
                #[allow(clippy::cast_possible_truncation)] // Graphs >4B nodes not supported yet
                let (src, dst) = ((idx / n) as u32, (idx % n) as u32);
                (src, dst, v)
            })
    }

    /// Raw row-major entries
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    fn offset(&self, src: usize, dst: usize) -> usize {
        assert!(
            src < self.num_nodes && dst < self.num_nodes,
            "entry ({src}, {dst}) out of bounds for {n}x{n} adjacency matrix",
            n = self.num_nodes
        );
        src * self.num_nodes + dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix() {
        let adj = AdjacencyMatrix::zeros(0);
        assert_eq!(adj.num_nodes(), 0);
        assert_eq!(adj.count_nonzero(), 0);
        assert_eq!(adj.nonzero_entries().count(), 0);
    }

    #[test]
    fn test_from_rows_coerces_integers() {
        let adj = AdjacencyMatrix::from_rows(&[[0_i32, 2], [5, 0]]).unwrap();
        assert_eq!(adj.get(0, 1), 2.0);
        assert_eq!(adj.get(1, 0), 5.0);
        assert_eq!(adj.as_slice(), &[0.0, 2.0, 5.0, 0.0]);
    }

    #[test]
    fn test_from_rows_accepts_wide_integers() {
        let from_i64 = AdjacencyMatrix::from_rows(&[[0_i64, 3], [-1, 0]]).unwrap();
        assert_eq!(from_i64.as_slice(), &[0.0, 3.0, -1.0, 0.0]);

        let from_usize = AdjacencyMatrix::from_rows(&[vec![0_usize, 1], vec![1, 0]]).unwrap();
        assert_eq!(from_usize.count_nonzero(), 2);
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        let err = AdjacencyMatrix::from_rows(&[vec![0.0_f64, 1.0, 0.0], vec![1.0, 0.0, 1.0]])
            .unwrap_err();
        assert_eq!(err, InstanceError::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn test_nonzero_entries_row_major() {
        let adj = AdjacencyMatrix::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
        let entries: Vec<_> = adj.nonzero_entries().map(|(s, d, _)| (s, d)).collect();
        assert_eq!(entries, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
        assert_eq!(adj.count_nonzero(), 4);
    }

    #[test]
    fn test_self_loop_is_single_edge() {
        let adj = AdjacencyMatrix::from_rows(&[[3.0_f32, 0.0], [0.0, 0.0]]).unwrap();
        assert_eq!(adj.count_nonzero(), 1);
        assert_eq!(adj.nonzero_entries().collect::<Vec<_>>(), vec![(0, 0, 3.0)]);
    }

    #[test]
    fn test_from_edge_list() {
        let edges = vec![
            (NodeId(0), NodeId(1), 1.0),
            (NodeId(0), NodeId(2), 2.0),
            (NodeId(0), NodeId(1), 4.0), // overwrites the first entry
        ];
        let adj = AdjacencyMatrix::from_edge_list(3, &edges).unwrap();

        assert_eq!(adj.row(0), &[0.0, 4.0, 2.0]);
        assert_eq!(adj.count_nonzero(), 2);
    }

    #[test]
    fn test_from_edge_list_out_of_range() {
        let edges = vec![(NodeId(0), NodeId(3), 1.0)];
        let err = AdjacencyMatrix::from_edge_list(3, &edges).unwrap_err();
        assert_eq!(
            err,
            InstanceError::NodeOutOfRange {
                node: 3,
                num_nodes: 3
            }
        );
    }

    #[test]
    fn test_set_removes_edge_with_zero() {
        let mut adj = AdjacencyMatrix::from_rows(&[[0, 1], [1, 0]]).unwrap();
        adj.set(0, 1, 0.0);
        assert_eq!(adj.count_nonzero(), 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let adj = AdjacencyMatrix::zeros(2);
        let _ = adj.get(2, 0);
    }
}
