//! Operator traits for arrays and mutable views.
//!
//! Scalar operators never fail. Element-wise operators between arrays panic
//! when the extents differ; use [`Matrix::apply_with`] for a checked
//! alternative.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use crate::matrix::Matrix;
use crate::view::{AsView, MatrixRef, MatrixRefMut};
use crate::Scalar;

macro_rules! impl_scalar_assign {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar, const N: usize> $trait<T> for Matrix<T, N> {
            fn $method(&mut self, rhs: T) {
                self.apply(|x| *x $op rhs);
            }
        }

        impl<T: Scalar, const N: usize> $trait<T> for MatrixRefMut<'_, T, N> {
            fn $method(&mut self, rhs: T) {
                self.apply(|x| *x $op rhs);
            }
        }
    };
}

impl_scalar_assign!(AddAssign, add_assign, +=);
impl_scalar_assign!(SubAssign, sub_assign, -=);
impl_scalar_assign!(MulAssign, mul_assign, *=);
impl_scalar_assign!(DivAssign, div_assign, /=);
impl_scalar_assign!(RemAssign, rem_assign, %=);

macro_rules! impl_array_assign {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar, const N: usize> $trait<&Matrix<T, N>> for Matrix<T, N> {
            fn $method(&mut self, rhs: &Matrix<T, N>) {
                if let Err(e) = self.apply_with(rhs, |a, b| *a $op *b) {
                    panic!("{e}");
                }
            }
        }

        impl<T: Scalar, const N: usize> $trait<MatrixRef<'_, T, N>> for Matrix<T, N> {
            fn $method(&mut self, rhs: MatrixRef<'_, T, N>) {
                if let Err(e) = self.apply_with(&rhs, |a, b| *a $op *b) {
                    panic!("{e}");
                }
            }
        }

        impl<T: Scalar, const N: usize> $trait<&Matrix<T, N>> for MatrixRefMut<'_, T, N> {
            fn $method(&mut self, rhs: &Matrix<T, N>) {
                if let Err(e) = self.apply_with(rhs, |a, b| *a $op *b) {
                    panic!("{e}");
                }
            }
        }

        impl<T: Scalar, const N: usize> $trait<MatrixRef<'_, T, N>> for MatrixRefMut<'_, T, N> {
            fn $method(&mut self, rhs: MatrixRef<'_, T, N>) {
                if let Err(e) = self.apply_with(&rhs, |a, b| *a $op *b) {
                    panic!("{e}");
                }
            }
        }
    };
}

impl_array_assign!(AddAssign, add_assign, +=);
impl_array_assign!(SubAssign, sub_assign, -=);
impl_array_assign!(MulAssign, mul_assign, *=);
impl_array_assign!(DivAssign, div_assign, /=);
impl_array_assign!(RemAssign, rem_assign, %=);

macro_rules! impl_binary {
    ($trait:ident, $method:ident, $assign:ident, $assign_method:ident) => {
        // array op scalar
        impl<T: Scalar, const N: usize> $trait<T> for Matrix<T, N> {
            type Output = Matrix<T, N>;

            fn $method(mut self, rhs: T) -> Matrix<T, N> {
                $assign::$assign_method(&mut self, rhs);
                self
            }
        }

        impl<T: Scalar, const N: usize> $trait<T> for &Matrix<T, N> {
            type Output = Matrix<T, N>;

            fn $method(self, rhs: T) -> Matrix<T, N> {
                self.clone().$method(rhs)
            }
        }

        impl<T: Scalar, const N: usize> $trait<T> for MatrixRef<'_, T, N> {
            type Output = Matrix<T, N>;

            fn $method(self, rhs: T) -> Matrix<T, N> {
                self.to_matrix().$method(rhs)
            }
        }

        // array op array
        impl<T: Scalar, const N: usize> $trait<&Matrix<T, N>> for Matrix<T, N> {
            type Output = Matrix<T, N>;

            fn $method(mut self, rhs: &Matrix<T, N>) -> Matrix<T, N> {
                $assign::$assign_method(&mut self, rhs);
                self
            }
        }

        impl<T: Scalar, const N: usize> $trait<&Matrix<T, N>> for &Matrix<T, N> {
            type Output = Matrix<T, N>;

            fn $method(self, rhs: &Matrix<T, N>) -> Matrix<T, N> {
                self.clone().$method(rhs)
            }
        }

        impl<T: Scalar, const N: usize> $trait<MatrixRef<'_, T, N>> for &Matrix<T, N> {
            type Output = Matrix<T, N>;

            fn $method(self, rhs: MatrixRef<'_, T, N>) -> Matrix<T, N> {
                let mut out = self.clone();
                $assign::$assign_method(&mut out, rhs);
                out
            }
        }

        impl<T: Scalar, const N: usize> $trait<MatrixRef<'_, T, N>> for MatrixRef<'_, T, N> {
            type Output = Matrix<T, N>;

            fn $method(self, rhs: MatrixRef<'_, T, N>) -> Matrix<T, N> {
                let mut out = self.to_matrix();
                $assign::$assign_method(&mut out, rhs);
                out
            }
        }
    };
}

impl_binary!(Add, add, AddAssign, add_assign);
impl_binary!(Sub, sub, SubAssign, sub_assign);
impl_binary!(Mul, mul, MulAssign, mul_assign);
impl_binary!(Div, div, DivAssign, div_assign);
impl_binary!(Rem, rem, RemAssign, rem_assign);

impl<T: Scalar + Neg<Output = T>, const N: usize> Neg for Matrix<T, N> {
    type Output = Matrix<T, N>;

    fn neg(mut self) -> Matrix<T, N> {
        self.apply(|x| *x = -*x);
        self
    }
}

impl<T: Scalar + Neg<Output = T>, const N: usize> Neg for &Matrix<T, N> {
    type Output = Matrix<T, N>;

    fn neg(self) -> Matrix<T, N> {
        -self.clone()
    }
}

impl<T: Scalar + Neg<Output = T>, const N: usize> Neg for MatrixRef<'_, T, N> {
    type Output = Matrix<T, N>;

    fn neg(self) -> Matrix<T, N> {
        -self.to_matrix()
    }
}

impl<T: Scalar + Neg<Output = T>, const N: usize> Neg for MatrixRefMut<'_, T, N> {
    type Output = Matrix<T, N>;

    fn neg(self) -> Matrix<T, N> {
        -self.view().to_matrix()
    }
}

#[cfg(test)]
mod tests {
    use crate::{s, Matrix, MatrixRef, Slice};

    #[test]
    fn test_scalar_add() {
        let a = Matrix::from([[1, 2], [3, 4]]);
        let a = a + 5;
        assert_eq!(a, Matrix::from([[6, 7], [8, 9]]));
    }

    #[test]
    fn test_scalar_assign_roundtrip() {
        let orig = Matrix::from_fn([3, 4], |[i, j]| (i * 4 + j) as f64 * 0.25);
        let mut a = orig.clone();
        a += 1.5;
        a -= 1.5;
        assert_eq!(a, orig);
        a *= 2.0;
        a /= 2.0;
        assert_eq!(a, orig);
    }

    #[test]
    fn test_rem_and_neg() {
        let mut a = Matrix::from([7, 8, 9]);
        a %= 4;
        assert_eq!(a.data(), &[3, 0, 1]);
        let n = -&a;
        assert_eq!(n.data(), &[-3, 0, -1]);
    }

    #[test]
    fn test_neg_view() {
        let a = Matrix::from_fn([4, 6], |[i, j]| (i * 6 + j) as i64 - 7);
        let v: MatrixRef<'_, i64, 2> = a.slice(s![Slice::new(1, 2), Slice::new(3, 2)]).unwrap();
        let n = -v;
        assert_eq!(n.extents(), &[2, 2]);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(n[[i, j]], -a[[1 + i, 3 + j]]);
            }
        }
        let mut a = a;
        let n = -a.view_mut().into_slice::<1>(s![2usize, ..]).unwrap();
        assert_eq!(n.data(), &[-5, -6, -7, -8, -9, -10]);
    }

    #[test]
    fn test_elementwise() {
        let a = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from([[10.0, 20.0], [30.0, 40.0]]);
        let c = &a + &b;
        assert_eq!(c.data(), &[11.0, 22.0, 33.0, 44.0]);
        let d = &b - a.view().t();
        assert_eq!(d.data(), &[9.0, 17.0, 28.0, 36.0]);
        let e = a * &b;
        assert_eq!(e.data(), &[10.0, 40.0, 90.0, 160.0]);
    }

    #[test]
    fn test_view_compound_assign() {
        let mut m = Matrix::<i32, 2>::new([3, 3]);
        {
            let mut row = m.row_mut::<1>(1).unwrap();
            row += 4;
            row *= 2;
        }
        let col: MatrixRef<'_, i32, 1> = m.col(0).unwrap();
        assert_eq!(col.iter().copied().collect::<Vec<_>>(), vec![0, 8, 0]);

        let src = Matrix::from([1, 2, 3]);
        let mut diag = m.diag_mut().unwrap();
        diag += &src;
        assert_eq!(m.data(), &[1, 0, 0, 8, 10, 8, 0, 0, 3]);
    }

    #[test]
    fn test_view_binary() {
        let m = Matrix::from([[1, 2, 3], [4, 5, 6]]);
        let c: MatrixRef<'_, i32, 1> = m.slice(s![.., 2usize]).unwrap();
        let r: MatrixRef<'_, i32, 1> = m.slice(s![1usize, 0..2]).unwrap();
        assert_eq!((c + r).data(), &[7, 11]);
        assert_eq!((c * 10).data(), &[30, 60]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_mismatch_panics() {
        let mut a = Matrix::<f64, 2>::new([2, 3]);
        let b = Matrix::<f64, 2>::new([3, 2]);
        a += &b;
    }
}
