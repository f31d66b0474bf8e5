//! Element-wise math producing new arrays.
//!
//! Every function accepts an owned array or a view and returns a fresh
//! contiguous [`Matrix`] with the same extents, visiting the input in its
//! iteration order.

use num_traits::Float;

use crate::matrix::Matrix;
use crate::view::AsView;

/// Array of `f(x)` for every element `x` of `a`.
pub fn map<T, U, V, F, const N: usize>(a: &V, mut f: F) -> Matrix<U, N>
where
    V: AsView<T, N> + ?Sized,
    F: FnMut(&T) -> U,
{
    let a = a.view();
    Matrix::from_fn(*a.extents(), |idx| f(&a[idx]))
}

/// Element-wise `e^x`.
pub fn exp<T: Float, V: AsView<T, N> + ?Sized, const N: usize>(a: &V) -> Matrix<T, N> {
    map(a, |x| x.exp())
}

/// Element-wise natural logarithm.
pub fn log<T: Float, V: AsView<T, N> + ?Sized, const N: usize>(a: &V) -> Matrix<T, N> {
    map(a, |x| x.ln())
}

/// Element-wise `x^p`.
pub fn pow<T: Float, V: AsView<T, N> + ?Sized, const N: usize>(a: &V, p: T) -> Matrix<T, N> {
    map(a, |x| x.powf(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixRef;
    use approx::assert_relative_eq;

    #[test]
    fn test_map_changes_type() {
        let a = Matrix::from([[1, 2], [3, 4]]);
        let b: Matrix<f64, 2> = map(&a, |&x| x as f64 / 2.0);
        assert_eq!(b.data(), &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_exp_log_inverse() {
        let a = Matrix::from_fn([3, 3], |[i, j]| 0.1 + (i * 3 + j) as f64);
        let b = log(&exp(&a));
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pow_on_view() {
        let a = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let col: MatrixRef<'_, f64, 1> = a.col(1).unwrap();
        let sq = pow(&col, 2.0);
        assert_relative_eq!(sq[[0]], 4.0);
        assert_relative_eq!(sq[[1]], 25.0);
    }
}
