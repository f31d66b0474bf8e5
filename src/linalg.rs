//! Transpose and the flat-buffer contract for BLAS-style backends.
//!
//! # Key functions
//!
//! - [`transpose`]: copying transpose of a rank-2 array or view
//! - [`transpose_vector`]: a rank-1 array as a `(1, n)` row vector
//! - [`blas_layout`]: how a rank-2 view maps onto a row-major BLAS call

use crate::matrix::Matrix;
use crate::slicing;
use crate::view::{AsView, MatrixRef};

// ============================================================================
// Transpose
// ============================================================================

/// Copy of `a` with `result[[j, i]] == a[[i, j]]`.
///
/// A zero-copy alternative is [`MatrixRef::t`], which swaps strides.
pub fn transpose<T, V>(a: &V) -> Matrix<T, 2>
where
    T: Clone,
    V: AsView<T, 2> + ?Sized,
{
    let a = a.view();
    Matrix::from_view(&a.t())
}

/// Rank-1 array as a row vector of shape `(1, n)`.
pub fn transpose_vector<T, V>(v: &V) -> Matrix<T, 2>
where
    T: Clone,
    V: AsView<T, 1> + ?Sized,
{
    let v = v.view();
    let [n] = *v.extents();
    Matrix::from_fn([1, n], |[_, j]| v[[j]].clone())
}

// ============================================================================
// BLAS layout
// ============================================================================

/// BLAS transpose operation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlasTranspose {
    /// No transpose operation
    NoTrans,
    /// Transpose operation
    Trans,
}

impl BlasTranspose {
    /// Convert to CBLAS character representation.
    pub fn to_char(self) -> char {
        match self {
            BlasTranspose::NoTrans => 'N',
            BlasTranspose::Trans => 'T',
        }
    }
}

/// A rank-2 view normalized for a row-major BLAS call.
#[derive(Debug, Clone, Copy)]
pub struct BlasMatrixInfo<'a, T> {
    /// The view, transposed if needed so its last stride is 1
    pub view: MatrixRef<'a, T, 2>,
    /// The transpose flag to apply to `view` to recover the input
    pub trans: BlasTranspose,
    /// Leading dimension (`view.strides()[0]`)
    pub lda: usize,
}

/// Check if a rank-2 view can be handed to BLAS without copying.
///
/// A view qualifies when one of its strides is 1.
pub fn is_blas_matrix<T>(a: &MatrixRef<'_, T, 2>) -> bool {
    let [s0, s1] = *a.strides();
    s0 == 1 || s1 == 1
}

/// Normalize `a` for a row-major BLAS call, or `None` if neither stride is 1.
pub fn blas_layout<'a, T>(a: &MatrixRef<'a, T, 2>) -> Option<BlasMatrixInfo<'a, T>> {
    let [s0, s1] = *a.strides();
    if s1 == 1 {
        Some(BlasMatrixInfo {
            view: *a,
            trans: BlasTranspose::NoTrans,
            lda: s0.max(a.n_cols()).max(1),
        })
    } else if s0 == 1 {
        let view = MatrixRef::from_parts(a.data(), slicing::transpose(a.descriptor()));
        Some(BlasMatrixInfo {
            view,
            trans: BlasTranspose::Trans,
            lda: s1.max(a.n_rows()).max(1),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;

    #[test]
    fn test_transpose_copy() {
        let a = Matrix::from([[1, 2, 3], [4, 5, 6]]);
        let t = transpose(&a);
        assert_eq!(t.extents(), &[3, 2]);
        assert_eq!(t.data(), &[1, 4, 2, 5, 3, 6]);
        assert!(t.descriptor().is_contiguous());
    }

    #[test]
    fn test_transpose_twice() {
        let a = Matrix::from_fn([4, 7], |[i, j]| i as f64 - 0.5 * j as f64);
        assert_eq!(transpose(&transpose(&a)), a);
    }

    #[test]
    fn test_transpose_of_view() {
        let a = Matrix::from_fn([4, 4], |[i, j]| 10 * i + j);
        let t = transpose(&a.submat(1, 2, 3, 3).unwrap());
        assert_eq!(t.data(), &[12, 22, 32, 13, 23, 33]);
    }

    #[test]
    fn test_transpose_vector() {
        let v = Matrix::from([1.0, 2.0, 3.0]);
        let r = transpose_vector(&v);
        assert_eq!(r.extents(), &[1, 3]);
        assert_eq!(r.data(), v.data());
    }

    #[test]
    fn test_blas_layout_row_major() {
        let a = Matrix::<f64, 2>::new([3, 4]);
        let info = blas_layout(&a.view()).unwrap();
        assert_eq!(info.trans, BlasTranspose::NoTrans);
        assert_eq!(info.lda, 4);
    }

    #[test]
    fn test_blas_layout_transposed() {
        let a = Matrix::<f64, 2>::new([3, 4]);
        let t = a.view().t();
        let info = blas_layout(&t).unwrap();
        assert_eq!(info.trans, BlasTranspose::Trans);
        assert_eq!(info.view.extents(), &[3, 4]);
        assert_eq!(info.lda, 4);
        assert_eq!(info.trans.to_char(), 'T');
    }

    #[test]
    fn test_blas_layout_strided() {
        let a = Matrix::<f64, 2>::new([4, 6]);
        let v: MatrixRef<'_, f64, 2> = a.slice(s![.., crate::Slice::ALL.step_by(2)]).unwrap();
        assert!(!is_blas_matrix(&v));
        assert!(blas_layout(&v).is_none());
        let sub = a.submat(1, 1, 2, 3).unwrap();
        assert!(is_blas_matrix(&sub));
        assert_eq!(blas_layout(&sub).unwrap().lda, 6);
    }
}
