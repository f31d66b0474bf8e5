//! Symmetric matrices over packed triangular storage.

use std::ops::{Index, IndexMut};

use num_traits::Zero;

use crate::matrix::Matrix;
use crate::packed::{PackedMatrix, Triangle};
use crate::{MatrixError, Result};

/// Symmetric `n x n` matrix storing one triangle.
///
/// Indexing `(i, j)` in the unstored half redirects to `(j, i)`, so reads and
/// writes through either coordinate alias the same element.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix<T> {
    packed: PackedMatrix<T>,
}

impl<T: Zero + Clone> SymmetricMatrix<T> {
    /// All-zero symmetric matrix backed by the `triangle` half.
    ///
    /// # Errors
    /// [`MatrixError::UnitDiagonalSymmetric`] for a unit-diagonal triangle.
    pub fn new(n: usize, triangle: Triangle) -> Result<Self> {
        Self::from_packed(PackedMatrix::new(n, triangle))
    }
}

impl<T> SymmetricMatrix<T> {
    /// Reuse existing packed storage.
    ///
    /// # Errors
    /// [`MatrixError::UnitDiagonalSymmetric`] for a unit-diagonal triangle.
    pub fn from_packed(packed: PackedMatrix<T>) -> Result<Self> {
        if packed.triangle().is_unit() {
            return Err(MatrixError::UnitDiagonalSymmetric);
        }
        Ok(Self { packed })
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.packed.n_rows()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.packed.n_cols()
    }

    #[inline]
    pub fn packed(&self) -> &PackedMatrix<T> {
        &self.packed
    }

    pub fn into_packed(self) -> PackedMatrix<T> {
        self.packed
    }

    /// Coordinates of the stored element that `(i, j)` aliases.
    #[inline]
    fn stored(&self, i: usize, j: usize) -> (usize, usize) {
        if self.packed.descriptor().other_half(i, j) {
            (j, i)
        } else {
            (i, j)
        }
    }

    /// Checked access.
    pub fn get(&self, i: usize, j: usize) -> Result<&T> {
        let (i, j) = self.stored(i, j);
        self.packed.get_ref(i, j)
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        let (i, j) = self.stored(i, j);
        self.packed.get_mut(i, j)
    }
}

impl<T: Clone> SymmetricMatrix<T> {
    /// Expand to a dense `n x n` array with both halves filled.
    pub fn to_dense(&self) -> Matrix<T, 2> {
        let n = self.n_rows();
        Matrix::from_fn([n, n], |[i, j]| self[[i, j]].clone())
    }
}

impl<T> Index<[usize; 2]> for SymmetricMatrix<T> {
    type Output = T;

    fn index(&self, [i, j]: [usize; 2]) -> &T {
        match self.get(i, j) {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<[usize; 2]> for SymmetricMatrix<T> {
    fn index_mut(&mut self, [i, j]: [usize; 2]) -> &mut T {
        match self.get_mut(i, j) {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_write() {
        for tri in [Triangle::Upper, Triangle::Lower] {
            let mut s = SymmetricMatrix::<i32>::new(4, tri).unwrap();
            s[[3, 1]] = 7;
            assert_eq!(s[[1, 3]], 7);
            s[[0, 2]] = -2;
            assert_eq!(s[[2, 0]], -2);
            assert_eq!(s.packed().size(), 10);
        }
    }

    #[test]
    fn test_unit_rejected() {
        assert!(matches!(
            SymmetricMatrix::<f64>::new(3, Triangle::UnitUpper),
            Err(MatrixError::UnitDiagonalSymmetric)
        ));
    }

    #[test]
    fn test_to_dense_is_symmetric() {
        let packed = PackedMatrix::from_vec(3, Triangle::Lower, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let s = SymmetricMatrix::from_packed(packed).unwrap();
        let d = s.to_dense();
        assert_eq!(d.data(), &[1, 2, 4, 2, 3, 5, 4, 5, 6]);
        assert_eq!(d, d.t());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_range() {
        let s = SymmetricMatrix::<f32>::new(2, Triangle::Upper).unwrap();
        let _ = s[[0, 2]];
    }
}
