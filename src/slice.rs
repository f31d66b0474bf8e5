//! Slice specifications and per-position slicing arguments.
//!
//! A slicing request is a list with one [`SliceArg`] per dimension. Each is
//! either a fixed index, which collapses that dimension, or a [`Slice`],
//! which keeps it with a possibly shorter extent and a larger stride.
//!
//! Rust ranges convert into both, so `s![1, .., 2..5]` reads like ndarray.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::{MatrixError, Result};

/// A `[start, end)` request along one dimension, taking every `stride`-th
/// element.
///
/// `end` is exclusive and in source units, so the number of selected
/// elements is `ceil((end - start) / stride)`. An `end` of `None` means "up
/// to the end of the dimension"; [`Slice::ALL`] is the whole dimension. An
/// `end` before `start` is kept as given and rejected by [`Slice::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: usize,
    pub end: Option<usize>,
    pub stride: usize,
}

impl Default for Slice {
    fn default() -> Self {
        Self::ALL
    }
}

impl Slice {
    /// The entire dimension.
    pub const ALL: Slice = Slice {
        start: 0,
        end: None,
        stride: 1,
    };

    /// `length` elements starting at `start`.
    pub fn new(start: usize, length: usize) -> Self {
        Self::with_stride(start, length, 1)
    }

    /// From `start` to the end of the dimension.
    pub fn from_start(start: usize) -> Self {
        Self {
            start,
            end: None,
            stride: 1,
        }
    }

    /// A span of `length` source positions from `start`, every `stride`-th taken.
    pub fn with_stride(start: usize, length: usize, stride: usize) -> Self {
        Self {
            start,
            end: Some(start.saturating_add(length)),
            stride,
        }
    }

    /// The same span, taking every `stride`-th element.
    pub fn step_by(self, stride: usize) -> Self {
        Self { stride, ..self }
    }

    /// Resolve sentinels against the extent of dimension `axis`.
    ///
    /// # Errors
    /// [`MatrixError::ZeroStride`] for a zero stride,
    /// [`MatrixError::InvalidRange`] if `end < start`,
    /// [`MatrixError::SliceOutOfBounds`] if the span leaves the dimension.
    pub fn resolve(&self, axis: usize, extent: usize) -> Result<ResolvedSlice> {
        if self.stride == 0 {
            return Err(MatrixError::ZeroStride { axis });
        }
        if let Some(end) = self.end {
            if end < self.start {
                return Err(MatrixError::InvalidRange {
                    first: self.start,
                    last: end,
                });
            }
        }
        let end = self.end.unwrap_or(extent);
        if self.start > extent || end > extent {
            return Err(MatrixError::SliceOutOfBounds {
                axis,
                start: self.start,
                end: self.end,
                extent,
            });
        }
        Ok(ResolvedSlice {
            start: self.start,
            length: end - self.start,
            stride: self.stride,
        })
    }
}

/// A slice with all sentinels replaced by concrete values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlice {
    pub start: usize,
    pub length: usize,
    pub stride: usize,
}

impl ResolvedSlice {
    /// Number of selected elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.length.div_ceil(self.stride)
    }
}

/// One slicing argument: a fixed index or a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceArg {
    /// Select a single position and drop the dimension.
    Index(usize),
    /// Keep the dimension, restricted to the slice.
    Range(Slice),
}

impl SliceArg {
    /// Keep the whole dimension.
    pub const ALL: SliceArg = SliceArg::Range(Slice::ALL);

    /// Whether this argument keeps its dimension in the result.
    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self, SliceArg::Range(_))
    }
}

impl From<usize> for SliceArg {
    fn from(index: usize) -> Self {
        SliceArg::Index(index)
    }
}

impl From<Slice> for SliceArg {
    fn from(slice: Slice) -> Self {
        SliceArg::Range(slice)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::ALL
    }
}

impl From<Range<usize>> for Slice {
    fn from(r: Range<usize>) -> Self {
        Slice {
            start: r.start,
            end: Some(r.end),
            stride: 1,
        }
    }
}

impl From<RangeFrom<usize>> for Slice {
    fn from(r: RangeFrom<usize>) -> Self {
        Slice::from_start(r.start)
    }
}

impl From<RangeTo<usize>> for Slice {
    fn from(r: RangeTo<usize>) -> Self {
        Slice::new(0, r.end)
    }
}

impl From<RangeInclusive<usize>> for Slice {
    fn from(r: RangeInclusive<usize>) -> Self {
        let (start, last) = r.into_inner();
        Slice {
            start,
            // `..=usize::MAX` never fits an extent; saturate and let resolve reject it
            end: Some(last.saturating_add(1)),
            stride: 1,
        }
    }
}

impl From<RangeToInclusive<usize>> for Slice {
    fn from(r: RangeToInclusive<usize>) -> Self {
        Slice {
            start: 0,
            end: Some(r.end.saturating_add(1)),
            stride: 1,
        }
    }
}

macro_rules! slice_arg_from_range {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SliceArg {
                fn from(r: $ty) -> Self {
                    SliceArg::Range(Slice::from(r))
                }
            }
        )*
    };
}

slice_arg_from_range!(
    RangeFull,
    Range<usize>,
    RangeFrom<usize>,
    RangeTo<usize>,
    RangeInclusive<usize>,
    RangeToInclusive<usize>
);

/// Build a `[SliceArg; N]` from indices, ranges and [`Slice`] values.
///
/// ```
/// use slab_matrix::{s, Slice, SliceArg};
///
/// let args = s![1usize, .., Slice::from_start(1).step_by(2)];
/// assert_eq!(args[0], SliceArg::Index(1));
/// assert_eq!(args[1], SliceArg::ALL);
/// ```
#[macro_export]
macro_rules! s {
    ($($arg:expr),* $(,)?) => {
        [$($crate::SliceArg::from($arg)),*]
    };
}
