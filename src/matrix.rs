//! Owned contiguous row-major arrays.

use std::ops::{Index, IndexMut};

use log::trace;

use crate::descriptor::{ensure_same_extents, Descriptor};
use crate::init::Nested;
use crate::slice::SliceArg;
use crate::view::{AsView, MatrixRef, MatrixRefMut};
use crate::{MatrixError, Result};

// ============================================================================
// Matrix
// ============================================================================

/// Owned `N`-dimensional array.
///
/// The buffer is always contiguous and row-major with `start == 0`, and its
/// length always equals `descriptor().size()`. Every windowing method hands
/// out a [`MatrixRef`] or [`MatrixRefMut`] borrowing the buffer.
pub struct Matrix<T, const N: usize> {
    desc: Descriptor<N>,
    elems: Vec<T>,
}

impl<T: std::fmt::Debug, const N: usize> std::fmt::Debug for Matrix<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("extents", self.desc.extents())
            .field("elems", &self.elems)
            .finish()
    }
}

impl<T: Clone, const N: usize> Clone for Matrix<T, N> {
    fn clone(&self) -> Self {
        Self {
            desc: self.desc,
            elems: self.elems.clone(),
        }
    }
}

impl<T: Clone + Default, const N: usize> Default for Matrix<T, N> {
    fn default() -> Self {
        Self::new([0; N])
    }
}

impl<T: Clone + Default, const N: usize> Matrix<T, N> {
    /// Array of the given extents filled with `T::default()` (zero for numbers).
    pub fn new(extents: [usize; N]) -> Self {
        Self::from_elem(extents, T::default())
    }

    /// Reset to an empty array and release the buffer.
    ///
    /// A rank-0 array has no empty shape, so it keeps one default element.
    pub fn clear(&mut self) {
        self.desc.clear();
        self.elems = Vec::new();
        self.elems.resize(self.desc.size(), T::default());
    }
}

impl<T: Clone, const N: usize> Matrix<T, N> {
    /// Array of the given extents with every element set to `value`.
    pub fn from_elem(extents: [usize; N], value: T) -> Self {
        let desc = Descriptor::new(extents);
        Self {
            elems: vec![value; desc.size()],
            desc,
        }
    }

    /// Copy the elements visited by `view`, in its iteration order, into a
    /// fresh contiguous array.
    pub fn from_view<V: AsView<T, N> + ?Sized>(view: &V) -> Self {
        let view = view.view();
        let desc = view.descriptor().contiguous();
        trace!(
            "materializing view: extents={:?} strides={:?} start={}",
            view.extents(),
            view.strides(),
            view.descriptor().start()
        );
        Self {
            elems: view.iter().cloned().collect(),
            desc,
        }
    }

    /// Copy `other` element-wise into this array.
    ///
    /// # Errors
    /// [`MatrixError::ShapeMismatch`] if the extents differ.
    pub fn assign_view<V: AsView<T, N> + ?Sized>(&mut self, other: &V) -> Result<&mut Self> {
        self.apply_with(other, |a, b| *a = b.clone())
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) -> &mut Self {
        self.apply(|x| *x = value.clone())
    }
}

impl<T, const N: usize> Matrix<T, N> {
    /// Array whose element at `indices` is `f(indices)`.
    ///
    /// `f` is called in row-major index order.
    pub fn from_fn(extents: [usize; N], mut f: impl FnMut([usize; N]) -> T) -> Self {
        let desc = Descriptor::new(extents);
        let mut elems = Vec::with_capacity(desc.size());
        let mut idx = [0usize; N];
        for _ in 0..desc.size() {
            elems.push(f(idx));
            for d in (0..N).rev() {
                idx[d] += 1;
                if idx[d] < extents[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
        Self { desc, elems }
    }

    /// Wrap a row-major buffer.
    ///
    /// # Errors
    /// [`MatrixError::ShapeMismatch`] if `elems.len()` is not the product of
    /// the extents.
    pub fn from_vec(extents: [usize; N], elems: Vec<T>) -> Result<Self> {
        let desc = Descriptor::new(extents);
        if elems.len() != desc.size() {
            return Err(MatrixError::ShapeMismatch(
                extents.to_vec(),
                vec![elems.len()],
            ));
        }
        Ok(Self { desc, elems })
    }

    /// Build from a nested initializer whose depth is `N`.
    ///
    /// # Errors
    /// [`MatrixError::RaggedInitializer`] for a non-rectangular nesting or a
    /// depth other than `N`.
    pub fn from_nested(init: Nested<T>) -> Result<Self> {
        let extents = init.extents::<N>()?;
        Ok(Self {
            desc: Descriptor::new(extents),
            elems: init.flatten(),
        })
    }

    #[inline]
    pub fn descriptor(&self) -> &Descriptor<N> {
        &self.desc
    }

    #[inline]
    pub fn extents(&self) -> &[usize; N] {
        self.desc.extents()
    }

    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.desc.extent(axis)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.desc.extent(0)
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.desc.extent(1)
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        N
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.desc.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.elems
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.elems
    }

    /// Raw pointer to the first element, for BLAS-style callers.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.elems.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.elems.as_mut_ptr()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elems
    }

    /// Iterate over all elements in storage (row-major) order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elems.iter()
    }

    /// Mutable iteration over all elements in storage order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elems.iter_mut()
    }

    pub fn get(&self, indices: [usize; N]) -> Result<&T> {
        let pos = self.desc.checked_offset(indices)?;
        Ok(&self.elems[pos])
    }

    pub fn get_mut(&mut self, indices: [usize; N]) -> Result<&mut T> {
        let pos = self.desc.checked_offset(indices)?;
        Ok(&mut self.elems[pos])
    }

    /// Invoke `f` on every element in storage order.
    pub fn apply<F: FnMut(&mut T)>(&mut self, f: F) -> &mut Self {
        self.elems.iter_mut().for_each(f);
        self
    }

    /// Invoke `f(mine, theirs)` walking this array in storage order and
    /// `other` in its iteration order.
    ///
    /// # Errors
    /// [`MatrixError::ShapeMismatch`] if the extents differ.
    pub fn apply_with<V, F>(&mut self, other: &V, mut f: F) -> Result<&mut Self>
    where
        V: AsView<T, N> + ?Sized,
        F: FnMut(&mut T, &T),
    {
        let other = other.view();
        ensure_same_extents(&self.desc, other.descriptor())?;
        for (mine, theirs) in self.elems.iter_mut().zip(other.iter()) {
            f(mine, theirs);
        }
        Ok(self)
    }

    /// Immutable view of the whole array.
    pub fn view(&self) -> MatrixRef<'_, T, N> {
        MatrixRef::from_parts(&self.elems, self.desc)
    }

    /// Mutable view of the whole array.
    pub fn view_mut(&mut self) -> MatrixRefMut<'_, T, N> {
        MatrixRefMut::from_parts(&mut self.elems, self.desc)
    }

    /// General slicing: one [`SliceArg`] per dimension, `M` of them ranges.
    pub fn slice<const M: usize>(&self, args: [SliceArg; N]) -> Result<MatrixRef<'_, T, M>> {
        self.view().slice(args)
    }

    pub fn slice_mut<const M: usize>(
        &mut self,
        args: [SliceArg; N],
    ) -> Result<MatrixRefMut<'_, T, M>> {
        self.view_mut().into_slice(args)
    }

    /// Collapse dimension 0 at `n`.
    pub fn row<const M: usize>(&self, n: usize) -> Result<MatrixRef<'_, T, M>> {
        self.view().row(n)
    }

    pub fn row_mut<const M: usize>(&mut self, n: usize) -> Result<MatrixRefMut<'_, T, M>> {
        self.view_mut().into_row(n)
    }

    /// Collapse dimension 1 at `n`.
    pub fn col<const M: usize>(&self, n: usize) -> Result<MatrixRef<'_, T, M>> {
        self.view().col(n)
    }

    pub fn col_mut<const M: usize>(&mut self, n: usize) -> Result<MatrixRefMut<'_, T, M>> {
        self.view_mut().into_col(n)
    }

    /// Rows `i..=j` with every other dimension whole. Requires `i < j`.
    pub fn rows(&self, i: usize, j: usize) -> Result<MatrixRef<'_, T, N>> {
        self.view().rows(i, j)
    }

    pub fn rows_mut(&mut self, i: usize, j: usize) -> Result<MatrixRefMut<'_, T, N>> {
        self.view_mut().into_rows(i, j)
    }

    /// Columns `i..=j` with every other dimension whole. Requires `i < j`.
    pub fn cols(&self, i: usize, j: usize) -> Result<MatrixRef<'_, T, N>> {
        self.view().cols(i, j)
    }

    pub fn cols_mut(&mut self, i: usize, j: usize) -> Result<MatrixRefMut<'_, T, N>> {
        self.view_mut().into_cols(i, j)
    }

    /// Apply `f` to every element in parallel.
    #[cfg(feature = "parallel")]
    pub fn par_apply<F>(&mut self, f: F) -> &mut Self
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        use rayon::prelude::*;
        self.elems.par_iter_mut().for_each(f);
        self
    }
}

// ============================================================================
// Rank-specific surface
// ============================================================================

impl<T> Matrix<T, 0> {
    /// Rank-0 array holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            desc: Descriptor::new([]),
            elems: vec![value],
        }
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.elems[0]
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.elems[0]
    }
}

impl<T> Matrix<T, 1> {
    pub fn subvec(&self, first: usize, last: usize) -> Result<MatrixRef<'_, T, 1>> {
        self.view().subvec(first, last)
    }

    pub fn subvec_mut(&mut self, first: usize, last: usize) -> Result<MatrixRefMut<'_, T, 1>> {
        self.view_mut().into_subvec(first, last)
    }

    /// Copy a single-column rank-2 array into a vector.
    ///
    /// # Errors
    /// [`MatrixError::ShapeMismatch`] unless `src` has exactly one column.
    pub fn from_single_column<V>(src: &V) -> Result<Self>
    where
        V: AsView<T, 2> + ?Sized,
        T: Clone,
    {
        let src = src.view();
        let [rows, cols] = *src.extents();
        if cols != 1 {
            return Err(MatrixError::ShapeMismatch(vec![rows, cols], vec![rows, 1]));
        }
        let col: MatrixRef<'_, T, 1> = src.col(0)?;
        Ok(Matrix::from_view(&col))
    }
}

impl<T: Clone> Matrix<T, 1> {
    /// Row vector of shape `(1, n)`.
    pub fn t(&self) -> Matrix<T, 2> {
        crate::linalg::transpose_vector(self)
    }
}

impl<T> Matrix<T, 2> {
    /// Rows `first_row..=last_row`, columns `first_col..=last_col`.
    pub fn submat(
        &self,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<MatrixRef<'_, T, 2>> {
        self.view().submat(first_row, first_col, last_row, last_col)
    }

    pub fn submat_mut(
        &mut self,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<MatrixRefMut<'_, T, 2>> {
        self.view_mut()
            .into_submat(first_row, first_col, last_row, last_col)
    }

    /// Main diagonal of a square array.
    pub fn diag(&self) -> Result<MatrixRef<'_, T, 1>> {
        self.view().diag()
    }

    pub fn diag_mut(&mut self) -> Result<MatrixRefMut<'_, T, 1>> {
        self.view_mut().into_diag()
    }
}

impl<T: Clone> Matrix<T, 2> {
    /// Transposed copy.
    pub fn t(&self) -> Matrix<T, 2> {
        crate::linalg::transpose(self)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl<T, const L: usize> From<[T; L]> for Matrix<T, 1> {
    fn from(elems: [T; L]) -> Self {
        Self {
            desc: Descriptor::new([L]),
            elems: elems.into(),
        }
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, 2> {
    fn from(rows: [[T; C]; R]) -> Self {
        Self {
            desc: Descriptor::new([R, C]),
            elems: rows.into_iter().flatten().collect(),
        }
    }
}

impl<T, const P: usize, const R: usize, const C: usize> From<[[[T; C]; R]; P]> for Matrix<T, 3> {
    fn from(planes: [[[T; C]; R]; P]) -> Self {
        Self {
            desc: Descriptor::new([P, R, C]),
            elems: planes.into_iter().flatten().flatten().collect(),
        }
    }
}

impl<T: Clone, const N: usize> From<MatrixRef<'_, T, N>> for Matrix<T, N> {
    fn from(view: MatrixRef<'_, T, N>) -> Self {
        Self::from_view(&view)
    }
}

impl<T, const N: usize> TryFrom<Nested<T>> for Matrix<T, N> {
    type Error = MatrixError;

    fn try_from(init: Nested<T>) -> Result<Self> {
        Self::from_nested(init)
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T, const N: usize> AsView<T, N> for Matrix<T, N> {
    fn view(&self) -> MatrixRef<'_, T, N> {
        Matrix::view(self)
    }
}

impl<T, const N: usize> Index<[usize; N]> for Matrix<T, N> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        &self.elems[self.desc.offset(indices)]
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for Matrix<T, N> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        let pos = self.desc.offset(indices);
        &mut self.elems[pos]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Matrix<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for Matrix<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.desc.extents() == other.desc.extents() && self.elems == other.elems
    }
}

impl<T: PartialEq, const N: usize> PartialEq<MatrixRef<'_, T, N>> for Matrix<T, N> {
    fn eq(&self, other: &MatrixRef<'_, T, N>) -> bool {
        self.extents() == other.extents() && self.elems.iter().eq(other.iter())
    }
}

impl<T: PartialEq, const N: usize> PartialEq<Matrix<T, N>> for MatrixRef<'_, T, N> {
    fn eq(&self, other: &Matrix<T, N>) -> bool {
        other == self
    }
}

// ============================================================================
// Tests
// ============================================================================
