//! Feature matrices and their construction-time inputs
//!
//! A [`FeatureMatrix`] is a dense row-major `rows x cols` block of `f32`.
//! Row `i` belongs to node `i` (node features) or to edge `i` in row-major
//! nonzero order (edge features).

use super::Element;
use crate::error::{InstanceError, Result};

/// Dense row-major `f32` matrix of per-node or per-edge feature vectors
///
/// # Example
///
/// ```
/// use graph_instance::FeatureMatrix;
///
/// let features = FeatureMatrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
/// assert_eq!(features.rows(), 2);
/// assert_eq!(features.row(1), &[3.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    values: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl FeatureMatrix {
    /// Matrix with every entry set to `value`
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            values: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// All-zero matrix
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// All-one matrix
    #[must_use]
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 1.0)
    }

    /// Build from nested rows of any numeric type, coercing to `f32`
    ///
    /// An empty slice yields a `0 x 0` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::RaggedRows`] if rows differ in width.
    pub fn from_rows<T, R>(rows: &[R]) -> Result<Self>
    where
        T: Element,
        R: AsRef<[T]>,
    {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::with_capacity(rows.len() * cols);

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(InstanceError::RaggedRows {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            values.extend(row.iter().map(|&v| v.to_f32()));
        }

        Ok(Self {
            values,
            rows: rows.len(),
            cols,
        })
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (feature width)
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        &self.values[i * self.cols..(i + 1) * self.cols]
    }

    /// Row `i`, or `None` when out of bounds
    #[must_use]
    pub fn get_row(&self, i: usize) -> Option<&[f32]> {
        (i < self.rows).then(|| &self.values[i * self.cols..(i + 1) * self.cols])
    }

    /// Mutable row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row_mut(&mut self, i: usize) -> &mut [f32] {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        &mut self.values[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.rows).map(move |i| &self.values[i * self.cols..(i + 1) * self.cols])
    }

    /// Raw row-major entries
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Feature array supplied at construction
///
/// `Absent` and `Placeholder` both fall back to the default for that array;
/// `Placeholder` carries whatever marker the upstream loader used to say
/// "not provided".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeatureInput {
    /// No array supplied
    #[default]
    Absent,
    /// Sentinel meaning "not provided"
    Placeholder(String),
    /// Explicit feature values
    Provided(FeatureMatrix),
}

impl FeatureInput {
    /// Sentinel input
    pub fn placeholder(marker: impl Into<String>) -> Self {
        Self::Placeholder(marker.into())
    }

    /// Resolve to the provided matrix, or build the default
    pub(crate) fn resolve_or_else(self, default: impl FnOnce() -> FeatureMatrix) -> FeatureMatrix {
        match self {
            Self::Provided(matrix) => matrix,
            Self::Absent | Self::Placeholder(_) => default(),
        }
    }
}

impl From<FeatureMatrix> for FeatureInput {
    fn from(matrix: FeatureMatrix) -> Self {
        Self::Provided(matrix)
    }
}

impl From<Option<FeatureMatrix>> for FeatureInput {
    fn from(matrix: Option<FeatureMatrix>) -> Self {
        matrix.map_or(Self::Absent, Self::Provided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_shapes() {
        let zeros = FeatureMatrix::zeros(3, 1);
        assert_eq!((zeros.rows(), zeros.cols()), (3, 1));
        assert!(zeros.as_slice().iter().all(|&v| v == 0.0));

        let ones = FeatureMatrix::ones(2, 4);
        assert_eq!(ones.as_slice().len(), 8);
        assert!(ones.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = FeatureMatrix::from_rows(&[vec![1.0_f32, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_from_rows_accepts_wide_integers() {
        let features = FeatureMatrix::from_rows(&[[1_u64, 2], [3, 4]]).unwrap();
        assert_eq!(features.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        let features = FeatureMatrix::from_rows(&[[7_i64], [-7]]).unwrap();
        assert_eq!(features.row(1), &[-7.0]);
    }

    #[test]
    fn test_from_rows_empty() {
        let rows: [[f32; 0]; 0] = [];
        let features = FeatureMatrix::from_rows(&rows).unwrap();
        assert_eq!((features.rows(), features.cols()), (0, 0));
    }

    #[test]
    fn test_row_access() {
        let mut features = FeatureMatrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap();
        assert_eq!(features.row(2), &[5.0, 6.0]);
        assert_eq!(features.get_row(3), None);

        features.row_mut(0)[1] = 9.0;
        let rows: Vec<_> = features.iter_rows().collect();
        assert_eq!(rows[0], &[1.0, 9.0]);
    }

    #[test]
    fn test_feature_input_resolution() {
        let provided = FeatureMatrix::ones(1, 3);

        let resolved = FeatureInput::from(provided.clone()).resolve_or_else(|| unreachable!());
        assert_eq!(resolved, provided);

        let resolved = FeatureInput::placeholder("n/a").resolve_or_else(|| FeatureMatrix::zeros(2, 1));
        assert_eq!(resolved, FeatureMatrix::zeros(2, 1));

        let resolved = FeatureInput::from(None).resolve_or_else(|| FeatureMatrix::zeros(0, 1));
        assert_eq!(resolved.rows(), 0);
    }
}
