//! Packed triangular storage.
//!
//! A [`PackedMatrix`] keeps only one triangle of an `n x n` matrix in a flat
//! row-major buffer. The [`Triangle`] variant selects which half is stored
//! and whether the diagonal is implicit ones.
//!
//! Address mapping (0-based, row-major packed):
//!
//! | variant     | stored      | offset(i, j)                      | size           |
//! |-------------|-------------|-----------------------------------|----------------|
//! | `Upper`     | `j >= i`    | `(2n - i + 1) * i / 2 + (j - i)`  | `n(n+1)/2`     |
//! | `Lower`     | `j <= i`    | `(1 + i) * i / 2 + j`             | `n(n+1)/2`     |
//! | `UnitUpper` | `j > i`     | `i * (2n - i - 1) / 2 + (j - i - 1)` | `n(n+1)/2 - n` |
//! | `UnitLower` | `j < i`     | `i * (i - 1) / 2 + j`             | `n(n+1)/2 - n` |

use num_traits::{One, Zero};

use crate::matrix::Matrix;
use crate::view::AsView;
use crate::{MatrixError, Result};

/// Which triangle a packed layout stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Triangle {
    Upper,
    Lower,
    /// Upper triangle with an implicit unit diagonal.
    UnitUpper,
    /// Lower triangle with an implicit unit diagonal.
    UnitLower,
}

impl Triangle {
    #[inline]
    pub fn is_unit(self) -> bool {
        matches!(self, Triangle::UnitUpper | Triangle::UnitLower)
    }

    #[inline]
    pub fn is_upper(self) -> bool {
        matches!(self, Triangle::Upper | Triangle::UnitUpper)
    }
}

/// Shape and address mapping of an `n x n` packed triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedDescriptor {
    n: usize,
    size: usize,
    triangle: Triangle,
}

impl PackedDescriptor {
    pub fn new(n: usize, triangle: Triangle) -> Self {
        let full = (1 + n) * n / 2;
        let size = if triangle.is_unit() { full - n } else { full };
        Self { n, size, triangle }
    }

    /// Number of stored elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn extents(&self) -> [usize; 2] {
        [self.n, self.n]
    }

    #[inline]
    pub fn triangle(&self) -> Triangle {
        self.triangle
    }

    /// True when `(i, j)` lies in the half this layout does not store.
    #[inline]
    pub fn other_half(&self, i: usize, j: usize) -> bool {
        if self.triangle.is_upper() {
            i > j
        } else {
            j > i
        }
    }

    /// Packed offset of `(i, j)`, or `None` for the other half and for an
    /// implicit unit diagonal.
    ///
    /// # Panics
    /// Panics if `i` or `j` is not below `n`.
    pub fn offset(&self, i: usize, j: usize) -> Option<usize> {
        assert!(
            i < self.n && j < self.n,
            "index ({}, {}) out of bounds for packed {}x{}",
            i,
            j,
            self.n,
            self.n
        );
        if self.other_half(i, j) || (self.triangle.is_unit() && i == j) {
            return None;
        }
        let n = self.n;
        let pos = match self.triangle {
            Triangle::Upper => (2 * n - i + 1) * i / 2 + (j - i),
            Triangle::Lower => (1 + i) * i / 2 + j,
            Triangle::UnitUpper => i * (2 * n - i - 1) / 2 + (j - i - 1),
            Triangle::UnitLower => i * (i - 1) / 2 + j,
        };
        Some(pos)
    }
}

/// Packed triangular matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMatrix<T> {
    desc: PackedDescriptor,
    elems: Vec<T>,
}

impl<T: Zero + Clone> PackedMatrix<T> {
    /// All stored elements zero.
    pub fn new(n: usize, triangle: Triangle) -> Self {
        let desc = PackedDescriptor::new(n, triangle);
        Self {
            elems: vec![T::zero(); desc.size()],
            desc,
        }
    }

    /// Pack the `triangle` half of a square array.
    ///
    /// # Errors
    /// [`MatrixError::NonSquare`] if `src` is not square.
    pub fn from_dense<V: AsView<T, 2> + ?Sized>(src: &V, triangle: Triangle) -> Result<Self> {
        let src = src.view();
        let [rows, cols] = *src.extents();
        if rows != cols {
            return Err(MatrixError::NonSquare { rows, cols });
        }
        let mut out = Self::new(rows, triangle);
        for i in 0..rows {
            for j in 0..cols {
                if let Some(pos) = out.desc.offset(i, j) {
                    out.elems[pos] = src[[i, j]].clone();
                }
            }
        }
        Ok(out)
    }
}

impl<T> PackedMatrix<T> {
    /// Wrap a flat buffer already in packed row-major order.
    ///
    /// # Errors
    /// [`MatrixError::PackedSizeMismatch`] unless `elems.len()` is exactly
    /// the layout's stored size.
    pub fn from_vec(n: usize, triangle: Triangle, elems: Vec<T>) -> Result<Self> {
        let desc = PackedDescriptor::new(n, triangle);
        if elems.len() != desc.size() {
            return Err(MatrixError::PackedSizeMismatch {
                expected: desc.size(),
                found: elems.len(),
            });
        }
        Ok(Self { desc, elems })
    }

    #[inline]
    pub fn descriptor(&self) -> &PackedDescriptor {
        &self.desc
    }

    #[inline]
    pub fn triangle(&self) -> Triangle {
        self.desc.triangle()
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.desc.n
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.desc.n
    }

    /// Number of stored elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.desc.size()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.elems
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.elems
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.elems.as_ptr()
    }

    /// Stored elements in packed order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elems.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elems
    }

    /// Reference to the stored element at `(i, j)`.
    ///
    /// # Errors
    /// [`MatrixError::IndexOutOfBounds`] outside `n x n`;
    /// [`MatrixError::NotStored`] for the other half or a unit diagonal.
    pub fn get_ref(&self, i: usize, j: usize) -> Result<&T> {
        let pos = self.checked_offset(i, j)?;
        Ok(&self.elems[pos])
    }

    /// Mutable reference to the stored element at `(i, j)`.
    ///
    /// # Errors
    /// Same as [`PackedMatrix::get_ref`].
    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        let pos = self.checked_offset(i, j)?;
        Ok(&mut self.elems[pos])
    }

    fn checked_offset(&self, i: usize, j: usize) -> Result<usize> {
        let n = self.desc.n;
        for (axis, index) in [(0, i), (1, j)] {
            if index >= n {
                return Err(MatrixError::IndexOutOfBounds {
                    axis,
                    index,
                    extent: n,
                });
            }
        }
        self.desc
            .offset(i, j)
            .ok_or(MatrixError::NotStored { row: i, col: j })
    }
}

impl<T: Zero + One + Clone> PackedMatrix<T> {
    /// Value at `(i, j)` of the full triangular matrix: zero in the other
    /// half, one on a unit diagonal.
    ///
    /// # Panics
    /// Panics if `i` or `j` is not below `n`.
    pub fn get(&self, i: usize, j: usize) -> T {
        match self.desc.offset(i, j) {
            Some(pos) => self.elems[pos].clone(),
            None if i == j => T::one(),
            None => T::zero(),
        }
    }

    /// Expand to a dense `n x n` array.
    pub fn to_dense(&self) -> Matrix<T, 2> {
        let n = self.desc.n;
        Matrix::from_fn([n, n], |[i, j]| self.get(i, j))
    }
}
