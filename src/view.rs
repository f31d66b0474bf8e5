//! Non-owning strided views.
//!
//! [`MatrixRef`] and [`MatrixRefMut`] pair a [`Descriptor`] with a borrowed
//! buffer. They own no memory; the borrow ties their lifetime to the array
//! (or slice) they window into. All windowing is delegated to
//! [`crate::slicing`], so a view sliced from a view and a view sliced from
//! the owning array agree.

use std::ops::{Index, IndexMut};

use crate::descriptor::{ensure_same_extents, validate_bounds, Descriptor};
use crate::iter::{Offsets, StridedEnumerate, StridedIter};
use crate::matrix::Matrix;
use crate::slice::SliceArg;
use crate::slicing;
use crate::Result;

/// Anything that can be read through a rank-`N` strided view.
///
/// Implemented by [`Matrix`], [`MatrixRef`] and [`MatrixRefMut`]; binary
/// element-wise operations accept any of them.
pub trait AsView<T, const N: usize> {
    fn view(&self) -> MatrixRef<'_, T, N>;
}

// ============================================================================
// MatrixRef
// ============================================================================

/// An immutable strided view.
///
/// # Type Parameters
/// - `'a`: Lifetime of the underlying data
/// - `T`: Element type
/// - `N`: Number of dimensions (const generic)
pub struct MatrixRef<'a, T, const N: usize> {
    data: &'a [T],
    desc: Descriptor<N>,
}

impl<T, const N: usize> Clone for MatrixRef<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for MatrixRef<'_, T, N> {}

impl<T, const N: usize> std::fmt::Debug for MatrixRef<'_, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixRef")
            .field("start", &self.desc.start())
            .field("extents", self.desc.extents())
            .field("strides", self.desc.strides())
            .finish()
    }
}

impl<'a, T, const N: usize> MatrixRef<'a, T, N> {
    /// Create a view of `data` through `desc`.
    ///
    /// # Errors
    /// Returns [`crate::MatrixError::OffsetOverflow`] if the descriptor
    /// reaches past the end of `data`.
    pub fn new(data: &'a [T], desc: Descriptor<N>) -> Result<Self> {
        validate_bounds(data.len(), &desc)?;
        Ok(Self { data, desc })
    }

    /// Callers guarantee `desc` stays inside `data`; out-of-range offsets
    /// still panic on access through slice indexing.
    #[inline]
    pub(crate) fn from_parts(data: &'a [T], desc: Descriptor<N>) -> Self {
        Self { data, desc }
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
    pub fn strides(&self) -> &[usize; N] {
        self.desc.strides()
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.desc.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.desc.size() == 0
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        N
    }

    /// Extent of dimension 0.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.desc.extent(0)
    }

    /// Extent of dimension 1.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.desc.extent(1)
    }

    /// The whole backing buffer, not just the window.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Raw pointer to the first element of the window.
    ///
    /// This is useful for BLAS interop.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        // an empty window may start one past the buffer
        self.data.as_ptr().wrapping_add(self.desc.start())
    }

    /// Element at `indices`, or [`crate::MatrixError::IndexOutOfBounds`].
    pub fn get(&self, indices: [usize; N]) -> Result<&'a T> {
        let pos = self.desc.checked_offset(indices)?;
        Ok(&self.data[pos])
    }

    /// Elements in row-major index order, following the strides.
    pub fn iter(&self) -> StridedIter<'a, T, N> {
        StridedIter::new(self.data, &self.desc)
    }

    /// `(indices, element)` pairs in row-major index order.
    pub fn indexed_iter(&self) -> StridedEnumerate<'a, T, N> {
        StridedEnumerate::new(self.iter())
    }

    /// General slicing: one [`SliceArg`] per dimension, `M` of them ranges.
    pub fn slice<const M: usize>(&self, args: [SliceArg; N]) -> Result<MatrixRef<'a, T, M>> {
        let desc = slicing::slice_descriptor(&self.desc, &args)?;
        Ok(MatrixRef::from_parts(self.data, desc))
    }

    /// Collapse dimension 0 at `n`.
    pub fn row<const M: usize>(&self, n: usize) -> Result<MatrixRef<'a, T, M>> {
        let desc = slicing::slice_dim(&self.desc, 0, n)?;
        Ok(MatrixRef::from_parts(self.data, desc))
    }

    /// Collapse dimension 1 at `n`.
    pub fn col<const M: usize>(&self, n: usize) -> Result<MatrixRef<'a, T, M>> {
        let desc = slicing::slice_dim(&self.desc, 1, n)?;
        Ok(MatrixRef::from_parts(self.data, desc))
    }

    /// Rows `i..=j` (requires `i < j`).
    pub fn rows(&self, i: usize, j: usize) -> Result<MatrixRef<'a, T, N>> {
        let desc = slicing::slice_range(&self.desc, 0, i, j)?;
        Ok(MatrixRef::from_parts(self.data, desc))
    }

    /// Columns `i..=j` (requires `i < j`).
    pub fn cols(&self, i: usize, j: usize) -> Result<MatrixRef<'a, T, N>> {
        let desc = slicing::slice_range(&self.desc, 1, i, j)?;
        Ok(MatrixRef::from_parts(self.data, desc))
    }

    /// Copy the visited elements into a new contiguous array.
    pub fn to_matrix(&self) -> Matrix<T, N>
    where
        T: Clone,
    {
        Matrix::from_view(self)
    }
}

impl<'a, T> MatrixRef<'a, T, 0> {
    /// The single element of a rank-0 view.
    #[inline]
    pub fn value(&self) -> &'a T {
        &self.data[self.desc.start()]
    }
}

impl<'a, T> MatrixRef<'a, T, 1> {
    /// Rank-0 view of element `i`.
    pub fn at(&self, i: usize) -> Result<MatrixRef<'a, T, 0>> {
        self.row(i)
    }

    /// Elements `first..=last`.
    pub fn subvec(&self, first: usize, last: usize) -> Result<MatrixRef<'a, T, 1>> {
        let desc = slicing::subvec(&self.desc, first, last)?;
        Ok(MatrixRef::from_parts(self.data, desc))
    }
}

impl<'a, T> MatrixRef<'a, T, 2> {
    /// Rows `first_row..=last_row`, columns `first_col..=last_col`.
    pub fn submat(
        &self,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<MatrixRef<'a, T, 2>> {
        let desc = slicing::submat(&self.desc, first_row, first_col, last_row, last_col)?;
        Ok(MatrixRef::from_parts(self.data, desc))
    }

    /// Main diagonal of a square view.
    pub fn diag(&self) -> Result<MatrixRef<'a, T, 1>> {
        let desc = slicing::diag(&self.desc)?;
        Ok(MatrixRef::from_parts(self.data, desc))
    }

    /// Transpose (zero-copy: swaps extents and strides).
    pub fn t(&self) -> MatrixRef<'a, T, 2> {
        MatrixRef::from_parts(self.data, slicing::transpose(&self.desc))
    }
}

impl<T, const N: usize> Index<[usize; N]> for MatrixRef<'_, T, N> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        &self.data[self.desc.offset(indices)]
    }
}

impl<'a, T, const N: usize> IntoIterator for MatrixRef<'a, T, N> {
    type Item = &'a T;
    type IntoIter = StridedIter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const N: usize> AsView<T, N> for MatrixRef<'_, T, N> {
    fn view(&self) -> MatrixRef<'_, T, N> {
        *self
    }
}

impl<T: PartialEq, const N: usize> PartialEq for MatrixRef<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.extents() == other.extents() && self.iter().eq(other.iter())
    }
}

// ============================================================================
// MatrixRefMut
// ============================================================================

/// A mutable strided view.
///
/// Same as [`MatrixRef`] but allows mutation. Windowing methods come in two
/// forms: `slice_mut(&mut self)` reborrows, `into_*(self)` keeps the original
/// lifetime.
pub struct MatrixRefMut<'a, T, const N: usize> {
    data: &'a mut [T],
    desc: Descriptor<N>,
}

impl<T, const N: usize> std::fmt::Debug for MatrixRefMut<'_, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixRefMut")
            .field("start", &self.desc.start())
            .field("extents", self.desc.extents())
            .field("strides", self.desc.strides())
            .finish()
    }
}

impl<'a, T, const N: usize> MatrixRefMut<'a, T, N> {
    /// Create a mutable view of `data` through `desc`.
    ///
    /// # Errors
    /// Returns [`crate::MatrixError::OffsetOverflow`] if the descriptor
    /// reaches past the end of `data`.
    pub fn new(data: &'a mut [T], desc: Descriptor<N>) -> Result<Self> {
        validate_bounds(data.len(), &desc)?;
        Ok(Self { data, desc })
    }

    #[inline]
    pub(crate) fn from_parts(data: &'a mut [T], desc: Descriptor<N>) -> Self {
        Self { data, desc }
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
    pub fn size(&self) -> usize {
        self.desc.size()
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.desc.extent(0)
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.desc.extent(1)
    }

    /// Raw mutable pointer to the first element of the window.
    ///
    /// This is useful for BLAS interop.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        let start = self.desc.start();
        self.data.as_mut_ptr().wrapping_add(start)
    }

    /// Reborrow with a shorter lifetime.
    #[inline]
    pub fn reborrow(&mut self) -> MatrixRefMut<'_, T, N> {
        MatrixRefMut::from_parts(self.data, self.desc)
    }

    pub fn get_mut(&mut self, indices: [usize; N]) -> Result<&mut T> {
        let pos = self.desc.checked_offset(indices)?;
        Ok(&mut self.data[pos])
    }

    /// Invoke `f` on every element of the window in row-major index order.
    pub fn apply<F: FnMut(&mut T)>(&mut self, mut f: F) -> &mut Self {
        for pos in Offsets::new(&self.desc) {
            f(&mut self.data[pos]);
        }
        self
    }

    /// Invoke `f(mine, theirs)` on corresponding elements.
    ///
    /// # Errors
    /// [`crate::MatrixError::ShapeMismatch`] if the extents differ.
    pub fn apply_with<V, F>(&mut self, other: &V, mut f: F) -> Result<&mut Self>
    where
        V: AsView<T, N> + ?Sized,
        F: FnMut(&mut T, &T),
    {
        let other = other.view();
        ensure_same_extents(&self.desc, other.descriptor())?;
        for (pos, theirs) in Offsets::new(&self.desc).zip(other.iter()) {
            f(&mut self.data[pos], theirs);
        }
        Ok(self)
    }

    /// Assign `value` to every element of the window.
    pub fn fill(&mut self, value: T) -> &mut Self
    where
        T: Clone,
    {
        self.apply(|x| *x = value.clone())
    }

    /// Copy `other` element-wise into the window.
    pub fn assign<V>(&mut self, other: &V) -> Result<&mut Self>
    where
        V: AsView<T, N> + ?Sized,
        T: Clone,
    {
        self.apply_with(other, |a, b| *a = b.clone())
    }

    pub fn into_slice<const M: usize>(self, args: [SliceArg; N]) -> Result<MatrixRefMut<'a, T, M>> {
        let desc = slicing::slice_descriptor(&self.desc, &args)?;
        Ok(MatrixRefMut::from_parts(self.data, desc))
    }

    pub fn slice_mut<const M: usize>(
        &mut self,
        args: [SliceArg; N],
    ) -> Result<MatrixRefMut<'_, T, M>> {
        self.reborrow().into_slice(args)
    }

    pub fn into_row<const M: usize>(self, n: usize) -> Result<MatrixRefMut<'a, T, M>> {
        let desc = slicing::slice_dim(&self.desc, 0, n)?;
        Ok(MatrixRefMut::from_parts(self.data, desc))
    }

    pub fn into_col<const M: usize>(self, n: usize) -> Result<MatrixRefMut<'a, T, M>> {
        let desc = slicing::slice_dim(&self.desc, 1, n)?;
        Ok(MatrixRefMut::from_parts(self.data, desc))
    }

    pub fn into_rows(self, i: usize, j: usize) -> Result<MatrixRefMut<'a, T, N>> {
        let desc = slicing::slice_range(&self.desc, 0, i, j)?;
        Ok(MatrixRefMut::from_parts(self.data, desc))
    }

    pub fn into_cols(self, i: usize, j: usize) -> Result<MatrixRefMut<'a, T, N>> {
        let desc = slicing::slice_range(&self.desc, 1, i, j)?;
        Ok(MatrixRefMut::from_parts(self.data, desc))
    }
}

impl<'a, T> MatrixRefMut<'a, T, 0> {
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.data[self.desc.start()]
    }
}

impl<'a, T> MatrixRefMut<'a, T, 1> {
    pub fn into_subvec(self, first: usize, last: usize) -> Result<MatrixRefMut<'a, T, 1>> {
        let desc = slicing::subvec(&self.desc, first, last)?;
        Ok(MatrixRefMut::from_parts(self.data, desc))
    }
}

impl<'a, T> MatrixRefMut<'a, T, 2> {
    pub fn into_submat(
        self,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<MatrixRefMut<'a, T, 2>> {
        let desc = slicing::submat(&self.desc, first_row, first_col, last_row, last_col)?;
        Ok(MatrixRefMut::from_parts(self.data, desc))
    }

    pub fn into_diag(self) -> Result<MatrixRefMut<'a, T, 1>> {
        let desc = slicing::diag(&self.desc)?;
        Ok(MatrixRefMut::from_parts(self.data, desc))
    }

    /// Zero-copy transpose; writes land in the same buffer.
    pub fn into_t(self) -> MatrixRefMut<'a, T, 2> {
        let desc = slicing::transpose(&self.desc);
        MatrixRefMut::from_parts(self.data, desc)
    }
}

impl<T, const N: usize> AsView<T, N> for MatrixRefMut<'_, T, N> {
    fn view(&self) -> MatrixRef<'_, T, N> {
        MatrixRef::from_parts(self.data, self.desc)
    }
}

impl<T, const N: usize> Index<[usize; N]> for MatrixRefMut<'_, T, N> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        &self.data[self.desc.offset(indices)]
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for MatrixRefMut<'_, T, N> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        let pos = self.desc.offset(indices);
        &mut self.data[pos]
    }
}
