//! Rank-parameterized shape descriptor.
//!
//! A [`Descriptor`] describes a window into a flat buffer: the offset of the
//! first element, the extent of every dimension, the buffer-offset delta per
//! unit step along every dimension, and the total element count. It owns no
//! storage and never validates itself against a buffer; that happens where a
//! descriptor is paired with data (see [`crate::MatrixRef::new`]).

use crate::{MatrixError, Result};

/// Compute row-major strides (last index varies fastest) and the element count.
///
/// The last stride is 1 and every preceding stride is the extent times the
/// stride of the next dimension. A rank-0 descriptor has no strides and a
/// size of 1.
pub fn compute_strides<const N: usize>(extents: &[usize; N]) -> ([usize; N], usize) {
    let mut strides = [0usize; N];
    let mut size = 1usize;
    for i in (0..N).rev() {
        strides[i] = size;
        size *= extents[i];
    }
    (strides, size)
}

/// Start offset, extents, strides and element count of an `N`-dimensional window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Descriptor<const N: usize> {
    start: usize,
    extents: [usize; N],
    strides: [usize; N],
    size: usize,
}

impl<const N: usize> Default for Descriptor<N> {
    fn default() -> Self {
        Self::new([0; N])
    }
}

impl<const N: usize> Descriptor<N> {
    /// Contiguous row-major descriptor starting at offset 0.
    pub fn new(extents: [usize; N]) -> Self {
        let (strides, size) = compute_strides(&extents);
        Self {
            start: 0,
            extents,
            strides,
            size,
        }
    }

    /// Descriptor with explicit start and strides. The size is derived from
    /// the extents.
    pub fn from_parts(start: usize, extents: [usize; N], strides: [usize; N]) -> Self {
        Self {
            start,
            extents,
            strides,
            size: extents.iter().product(),
        }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn extents(&self) -> &[usize; N] {
        &self.extents
    }

    #[inline]
    pub fn strides(&self) -> &[usize; N] {
        &self.strides
    }

    /// Total number of elements, the product of the extents.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn rank(&self) -> usize {
        N
    }

    /// Extent of dimension `axis`.
    ///
    /// # Panics
    /// Panics if `axis >= N`.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    /// Replace the extents, recomputing row-major strides and the size, and
    /// rebase the start to 0.
    pub fn set_extents(&mut self, extents: [usize; N]) {
        *self = Self::new(extents);
    }

    /// Reset to an empty descriptor.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The same window rebased onto a fresh contiguous buffer.
    pub fn contiguous(&self) -> Self {
        Self::new(self.extents)
    }

    /// Buffer offset of the element at `indices`.
    ///
    /// # Panics
    /// Panics if any index is outside its extent.
    #[inline]
    pub fn offset(&self, indices: [usize; N]) -> usize {
        let mut pos = self.start;
        for i in 0..N {
            assert!(
                indices[i] < self.extents[i],
                "index {} out of bounds for dim {} with extent {}",
                indices[i],
                i,
                self.extents[i]
            );
            pos += indices[i] * self.strides[i];
        }
        pos
    }

    /// Buffer offset of the element at `indices`, or
    /// [`MatrixError::IndexOutOfBounds`].
    pub fn checked_offset(&self, indices: [usize; N]) -> Result<usize> {
        let mut pos = self.start;
        for (axis, (&index, (&extent, &stride))) in indices
            .iter()
            .zip(self.extents.iter().zip(self.strides.iter()))
            .enumerate()
        {
            if index >= extent {
                return Err(MatrixError::IndexOutOfBounds {
                    axis,
                    index,
                    extent,
                });
            }
            pos += index * stride;
        }
        Ok(pos)
    }

    /// Largest buffer offset this descriptor can reach, or `None` when empty.
    pub fn max_offset(&self) -> Option<usize> {
        if self.size == 0 {
            return None;
        }
        let mut max = self.start;
        for i in 0..N {
            max += (self.extents[i] - 1) * self.strides[i];
        }
        Some(max)
    }

    /// Check if the window is laid out row-major without gaps.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 1usize;
        for i in (0..N).rev() {
            if self.extents[i] <= 1 {
                continue;
            }
            if self.strides[i] != expected {
                return false;
            }
            expected *= self.extents[i];
        }
        true
    }
}

/// True iff both descriptors have identical extents, dimension by dimension.
#[inline]
pub fn same_extents<const N: usize>(a: &Descriptor<N>, b: &Descriptor<N>) -> bool {
    a.extents == b.extents
}

/// Check that every offset reachable through `desc` lies inside a buffer of
/// `len` elements.
pub(crate) fn validate_bounds<const N: usize>(len: usize, desc: &Descriptor<N>) -> Result<()> {
    match desc.max_offset() {
        None => Ok(()),
        Some(max) if max < len => Ok(()),
        Some(_) => Err(MatrixError::OffsetOverflow),
    }
}

/// Return [`MatrixError::ShapeMismatch`] unless the extents agree.
pub(crate) fn ensure_same_extents<const N: usize>(
    a: &Descriptor<N>,
    b: &Descriptor<N>,
) -> Result<()> {
    if same_extents(a, b) {
        Ok(())
    } else {
        Err(MatrixError::ShapeMismatch(
            a.extents.to_vec(),
            b.extents.to_vec(),
        ))
    }
}
