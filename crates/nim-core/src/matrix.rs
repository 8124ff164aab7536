//! InterfaceMatrix: outer product of a filtered signal and a weight vector

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Immutable `m × n` matrix where entry `(i, j)` is `signal[i] * weights[j]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMatrix {
    data: Array2<f64>,
}

impl InterfaceMatrix {
    /// Shape as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Number of rows (signal length)
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns (weight count)
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entry at `(row, col)`, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<ArrayView1<'_, f64>> {
        (row < self.rows()).then(|| self.data.row(row))
    }

    pub fn column(&self, col: usize) -> Option<ArrayView1<'_, f64>> {
        (col < self.cols()).then(|| self.data.column(col))
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }
}

/// Outer product of two vectors
///
/// Each entry is a single multiplication, so results are bit-exact with
/// `left[i] * right[j]`. Empty inputs give a zero-row or zero-column matrix.
pub fn outer_product(left: &[f64], right: &[f64]) -> InterfaceMatrix {
    let data = Array2::from_shape_fn((left.len(), right.len()), |(i, j)| left[i] * right[j]);
    InterfaceMatrix { data }
}
