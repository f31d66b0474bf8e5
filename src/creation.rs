//! Array constructors with fixed contents.

use num_traits::{One, Zero};

use crate::matrix::Matrix;

/// Array of the given extents filled with zeros.
pub fn zeros<T: Zero + Clone, const N: usize>(extents: [usize; N]) -> Matrix<T, N> {
    Matrix::from_elem(extents, T::zero())
}

/// Array of the given extents filled with ones.
pub fn ones<T: One + Clone, const N: usize>(extents: [usize; N]) -> Matrix<T, N> {
    Matrix::from_elem(extents, T::one())
}

/// `rows x cols` array with ones on the leading `min(rows, cols)` diagonal
/// and zeros elsewhere.
pub fn eye<T: Zero + One + Clone>(rows: usize, cols: usize) -> Matrix<T, 2> {
    let mut m = zeros([rows, cols]);
    let k = rows.min(cols);
    if k > 0 {
        // the leading k x k block is always in range
        if let Ok(mut d) = m
            .submat_mut(0, 0, k - 1, k - 1)
            .and_then(|sub| sub.into_diag())
        {
            d.fill(T::one());
        }
    }
    m
}
