//! The slicing algorithm.
//!
//! Every windowing operation (general slicing, row/column extraction,
//! multi-row/multi-column ranges, sub-vectors, sub-matrices and diagonals)
//! is computed here on descriptors alone, so views and owning arrays produce
//! identical results.

use crate::descriptor::Descriptor;
use crate::slice::{Slice, SliceArg};
use crate::{MatrixError, Result};

/// Derive the descriptor selected by `args` from `src`.
///
/// A [`SliceArg::Index`] advances the start by `index * stride` and drops the
/// dimension. A [`SliceArg::Range`] advances the start by
/// `slice.start * stride` and contributes an output dimension with extent
/// `ceil(length / slice.stride)` and stride `slice.stride * stride`.
///
/// # Errors
/// [`MatrixError::RankMismatch`] if the number of range arguments is not `M`;
/// [`MatrixError::IndexOutOfBounds`], [`MatrixError::SliceOutOfBounds`] or
/// [`MatrixError::ZeroStride`] for requests outside the source window.
pub fn slice_descriptor<const N: usize, const M: usize>(
    src: &Descriptor<N>,
    args: &[SliceArg; N],
) -> Result<Descriptor<M>> {
    let ranges = args.iter().filter(|a| a.is_range()).count();
    if ranges != M {
        return Err(MatrixError::RankMismatch(ranges, M));
    }

    let mut start = src.start();
    let mut extents = [0usize; M];
    let mut strides = [0usize; M];
    let mut out = 0;
    for (axis, arg) in args.iter().enumerate() {
        let extent = src.extents()[axis];
        let stride = src.strides()[axis];
        match *arg {
            SliceArg::Index(index) => {
                if index >= extent {
                    return Err(MatrixError::IndexOutOfBounds {
                        axis,
                        index,
                        extent,
                    });
                }
                start += index * stride;
            }
            SliceArg::Range(slice) => {
                let r = slice.resolve(axis, extent)?;
                start += r.start * stride;
                extents[out] = r.count();
                strides[out] = r.stride * stride;
                out += 1;
            }
        }
    }
    Ok(Descriptor::from_parts(start, extents, strides))
}

/// Collapse dimension `axis` at position `index`.
///
/// Row extraction is `axis == 0`, column extraction `axis == 1`.
pub fn slice_dim<const N: usize, const M: usize>(
    src: &Descriptor<N>,
    axis: usize,
    index: usize,
) -> Result<Descriptor<M>> {
    if axis >= N {
        return Err(MatrixError::InvalidAxis { axis, rank: N });
    }
    if M + 1 != N {
        return Err(MatrixError::RankMismatch(N - 1, M));
    }
    let mut args = [SliceArg::ALL; N];
    args[axis] = SliceArg::Index(index);
    slice_descriptor(src, &args)
}

/// Keep the inclusive range `[first, last]` of dimension `axis`, all other
/// dimensions whole. Requires `first < last` and `last` within the extent.
pub fn slice_range<const N: usize>(
    src: &Descriptor<N>,
    axis: usize,
    first: usize,
    last: usize,
) -> Result<Descriptor<N>> {
    if axis >= N {
        return Err(MatrixError::InvalidAxis { axis, rank: N });
    }
    if first >= last {
        return Err(MatrixError::InvalidRange { first, last });
    }
    let mut args = [SliceArg::ALL; N];
    args[axis] = SliceArg::Range(Slice::new(first, last - first + 1));
    slice_descriptor(src, &args)
}

/// Inclusive `[first, last]` sub-window of a rank-1 descriptor.
pub fn subvec(src: &Descriptor<1>, first: usize, last: usize) -> Result<Descriptor<1>> {
    let span = inclusive_span(first, last)?;
    slice_descriptor(src, &[SliceArg::Range(span)])
}

/// Inclusive `[first_row, last_row] x [first_col, last_col]` sub-window of a
/// rank-2 descriptor.
pub fn submat(
    src: &Descriptor<2>,
    first_row: usize,
    first_col: usize,
    last_row: usize,
    last_col: usize,
) -> Result<Descriptor<2>> {
    let rows = inclusive_span(first_row, last_row)?;
    let cols = inclusive_span(first_col, last_col)?;
    slice_descriptor(src, &[SliceArg::Range(rows), SliceArg::Range(cols)])
}

/// Main diagonal of a square rank-2 descriptor.
///
/// The stride is the sum of both strides, which is `n_rows + 1` for a
/// contiguous array.
pub fn diag(src: &Descriptor<2>) -> Result<Descriptor<1>> {
    let [rows, cols] = *src.extents();
    if rows != cols {
        return Err(MatrixError::NonSquare { rows, cols });
    }
    let [s0, s1] = *src.strides();
    Ok(Descriptor::from_parts(src.start(), [rows], [s0 + s1]))
}

/// Swap the two dimensions of a rank-2 descriptor.
pub fn transpose(src: &Descriptor<2>) -> Descriptor<2> {
    let [rows, cols] = *src.extents();
    let [s0, s1] = *src.strides();
    Descriptor::from_parts(src.start(), [cols, rows], [s1, s0])
}

fn inclusive_span(first: usize, last: usize) -> Result<Slice> {
    if first > last {
        return Err(MatrixError::InvalidRange { first, last });
    }
    Ok(Slice::new(first, last - first + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;

    #[test]
    fn test_all_ranges_is_identity() {
        let d = Descriptor::new([3, 4]);
        let out: Descriptor<2> = slice_descriptor(&d, &s![.., ..]).unwrap();
        assert_eq!(out, d);
    }

    #[test]
    fn test_index_collapses_dimension() {
        let d = Descriptor::new([3, 5]);
        let out: Descriptor<1> = slice_descriptor(&d, &s![2usize, 1..4]).unwrap();
        assert_eq!(out.start(), 11);
        assert_eq!(out.extents(), &[3]);
        assert_eq!(out.strides(), &[1]);
    }

    #[test]
    fn test_strided_slice() {
        let d = Descriptor::new([4, 6]);
        let out: Descriptor<2> =
            slice_descriptor(&d, &s![Slice::from_start(1).step_by(2), Slice::with_stride(0, 5, 3)])
                .unwrap();
        assert_eq!(out.start(), 6);
        assert_eq!(out.extents(), &[2, 2]);
        assert_eq!(out.strides(), &[12, 3]);
        assert_eq!(out.size(), 4);
    }

    #[test]
    fn test_slice_of_slice_composes() {
        let d = Descriptor::new([6, 6]);
        let inner: Descriptor<2> = slice_descriptor(&d, &s![1..5, 2..6]).unwrap();
        let out: Descriptor<1> = slice_descriptor(&inner, &s![1usize, Slice::ALL.step_by(2)]).unwrap();
        // row 2, columns 2 and 4 of the original
        assert_eq!(out.offset([0]), 2 * 6 + 2);
        assert_eq!(out.offset([1]), 2 * 6 + 4);
    }

    #[test]
    fn test_all_indices_gives_offset() {
        let d = Descriptor::new([2, 3, 4]);
        let out: Descriptor<0> = slice_descriptor(&d, &s![1usize, 2usize, 3usize]).unwrap();
        assert_eq!(out.start(), d.offset([1, 2, 3]));
        assert_eq!(out.size(), 1);
    }

    #[test]
    fn test_rank_mismatch() {
        let d = Descriptor::new([3, 5]);
        let r: Result<Descriptor<2>> = slice_descriptor(&d, &s![0usize, ..]);
        assert!(matches!(r, Err(MatrixError::RankMismatch(1, 2))));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let d = Descriptor::new([3, 5]);
        let r: Result<Descriptor<1>> = slice_descriptor(&d, &s![3usize, ..]);
        assert!(matches!(
            r,
            Err(MatrixError::IndexOutOfBounds { axis: 0, index: 3, extent: 3 })
        ));
    }

    #[test]
    fn test_row_and_col() {
        let d = Descriptor::new([3, 4, 5]);
        let row: Descriptor<2> = slice_dim(&d, 0, 1).unwrap();
        assert_eq!(row.extents(), &[4, 5]);
        assert_eq!(row.start(), 20);
        let col: Descriptor<2> = slice_dim(&d, 1, 2).unwrap();
        assert_eq!(col.extents(), &[3, 5]);
        assert_eq!(col.strides(), &[20, 1]);
        assert_eq!(col.start(), 10);
        let bad: Result<Descriptor<1>> = slice_dim(&d, 0, 1);
        assert!(bad.is_err());
    }

    #[test]
    fn test_rows_and_cols() {
        let d = Descriptor::new([3, 5]);
        let rows = slice_range(&d, 0, 1, 2).unwrap();
        assert_eq!(rows.extents(), &[2, 5]);
        assert_eq!(rows.start(), 5);
        let cols = slice_range(&d, 1, 2, 4).unwrap();
        assert_eq!(cols.extents(), &[3, 3]);
        assert_eq!(cols.start(), 2);
        assert!(matches!(
            slice_range(&d, 0, 2, 2),
            Err(MatrixError::InvalidRange { first: 2, last: 2 })
        ));
        assert!(slice_range(&d, 0, 1, 3).is_err());
    }

    #[test]
    fn test_submat_and_subvec() {
        let d = Descriptor::new([4, 4]);
        let sub = submat(&d, 1, 1, 2, 3).unwrap();
        assert_eq!(sub.extents(), &[2, 3]);
        assert_eq!(sub.start(), 5);
        let v = subvec(&Descriptor::new([10]), 3, 3).unwrap();
        assert_eq!(v.extents(), &[1]);
        assert!(subvec(&Descriptor::new([10]), 4, 3).is_err());
    }

    #[test]
    fn test_diag() {
        let d = Descriptor::new([3, 3]);
        let dg = diag(&d).unwrap();
        assert_eq!(dg.extents(), &[3]);
        assert_eq!(dg.strides(), &[4]);
        assert!(matches!(
            diag(&Descriptor::new([2, 3])),
            Err(MatrixError::NonSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_transpose_descriptor() {
        let t = transpose(&Descriptor::new([2, 3]));
        assert_eq!(t.extents(), &[3, 2]);
        assert_eq!(t.strides(), &[1, 3]);
    }
}
