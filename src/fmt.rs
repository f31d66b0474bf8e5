//! Bracketed printing: a 2x2 array renders as `{{1,2},{3,4}}`.

use std::fmt::{self, Display, Formatter};

use crate::matrix::Matrix;
use crate::view::{AsView, MatrixRef, MatrixRefMut};

fn write_nested<T: Display>(
    f: &mut Formatter<'_>,
    data: &[T],
    start: usize,
    extents: &[usize],
    strides: &[usize],
) -> fmt::Result {
    match (extents.split_first(), strides.split_first()) {
        (Some((&extent, inner_extents)), Some((&stride, inner_strides))) => {
            f.write_str("{")?;
            for k in 0..extent {
                if k > 0 {
                    f.write_str(",")?;
                }
                write_nested(f, data, start + k * stride, inner_extents, inner_strides)?;
            }
            f.write_str("}")
        }
        _ => Display::fmt(&data[start], f),
    }
}

fn write_view<T: Display, const N: usize>(
    f: &mut Formatter<'_>,
    view: MatrixRef<'_, T, N>,
) -> fmt::Result {
    let desc = view.descriptor();
    write_nested(f, view.data(), desc.start(), desc.extents(), desc.strides())
}

impl<T: Display, const N: usize> Display for Matrix<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_view(f, self.view())
    }
}

impl<T: Display, const N: usize> Display for MatrixRef<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_view(f, *self)
    }
}

impl<T: Display, const N: usize> Display for MatrixRefMut<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_view(f, AsView::view(self))
    }
}
