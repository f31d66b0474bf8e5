//! Compile-time-rank strided arrays.
//!
//! `slab-matrix` provides dense `N`-dimensional arrays whose rank is a const
//! generic, non-owning strided views into them, and packed storage for
//! triangular and symmetric matrices. It is the layer BLAS/LAPACK-style
//! routines sit on: every array exposes a flat buffer plus a [`Descriptor`].
//!
//! # Core Types
//!
//! - [`Descriptor`]: start offset, extents, strides and size of a window
//! - [`Slice`] / [`SliceArg`]: per-dimension slicing requests, built with [`s!`]
//! - [`MatrixRef`] / [`MatrixRefMut`]: zero-copy strided views over borrowed data
//! - [`Matrix`]: owned contiguous row-major array
//! - [`PackedMatrix`] / [`SymmetricMatrix`]: packed triangular storage and
//!   its symmetric adapter
//!
//! # Example
//!
//! ```rust
//! use slab_matrix::{s, Matrix, MatrixRef};
//!
//! let a = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
//!
//! // Second column as a rank-1 view (no copy)
//! let col: MatrixRef<'_, f64, 1> = a.slice(s![.., 1usize]).unwrap();
//! assert_eq!(col.iter().copied().collect::<Vec<_>>(), vec![2.0, 5.0]);
//!
//! // Arithmetic produces new arrays
//! let b = &a + 5.0;
//! assert_eq!(b[[1, 2]], 11.0);
//! ```
//!
//! # Views and aliasing
//!
//! Views borrow the buffer they window into, so the borrow checker rejects
//! a view that would outlive its array. Any number of [`MatrixRef`]s may
//! alias one buffer; a [`MatrixRefMut`] is exclusive.

pub mod creation;
pub mod descriptor;
mod fmt;
pub mod init;
pub mod io;
pub mod iter;
pub mod linalg;
pub mod map;
pub mod matrix;
mod ops;
pub mod packed;
pub mod slice;
pub mod slicing;
pub mod symmetric;
pub mod view;

// ============================================================================
// Descriptors and slicing
// ============================================================================
pub use descriptor::{compute_strides, same_extents, Descriptor};
pub use slice::{ResolvedSlice, Slice, SliceArg};

// ============================================================================
// Array and view types
// ============================================================================
pub use init::Nested;
pub use iter::{Offsets, StridedEnumerate, StridedIter};
pub use matrix::Matrix;
pub use view::{AsView, MatrixRef, MatrixRefMut};

// ============================================================================
// Packed storage
// ============================================================================
pub use packed::{PackedDescriptor, PackedMatrix, Triangle};
pub use symmetric::SymmetricMatrix;

// ============================================================================
// Free functions
// ============================================================================
pub use creation::{eye, ones, zeros};
pub use linalg::{blas_layout, is_blas_matrix, transpose, transpose_vector, BlasTranspose};
pub use map::{exp, log, map, pow};

pub use slab_traits::Scalar;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during array construction, slicing and I/O.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// Number of kept dimensions does not match the requested rank.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Array shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Invalid axis index for the given array rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// Matrix is not square when a square matrix was required.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Nested initializer is not rectangular or has the wrong depth.
    #[error("malformed initializer at depth {depth}: expected {expected}, found {found}")]
    RaggedInitializer {
        depth: usize,
        expected: usize,
        found: usize,
    },

    /// An index range is empty or reversed.
    #[error("invalid range [{first}, {last}]")]
    InvalidRange { first: usize, last: usize },

    /// Index outside the extent of a dimension.
    #[error("index {index} out of bounds for dim {axis} with extent {extent}")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// Slice leaves the extent of a dimension.
    #[error("slice start={start} end={end:?} out of bounds for dim {axis} with extent {extent}")]
    SliceOutOfBounds {
        axis: usize,
        start: usize,
        end: Option<usize>,
        extent: usize,
    },

    /// Zero stride is not allowed for the specified dimension.
    #[error("invalid stride 0 for dim {axis}")]
    ZeroStride { axis: usize },

    /// A descriptor reaches past the end of its buffer.
    #[error("offset overflow: descriptor reaches past the buffer")]
    OffsetOverflow,

    /// The element is synthesized by a packed layout and has no storage.
    #[error("element ({row}, {col}) is not stored by this packed layout")]
    NotStored { row: usize, col: usize },

    /// Flat source length does not match the packed layout size.
    #[error("packed size mismatch: expected {expected} elements, found {found}")]
    PackedSizeMismatch { expected: usize, found: usize },

    /// Unit-diagonal layouts cannot back a symmetric matrix.
    #[error("symmetric storage requires a non-unit triangle")]
    UnitDiagonalSymmetric,

    /// Malformed persisted text.
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
