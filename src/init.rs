//! Nested literal initializers.
//!
//! A [`Nested`] value mirrors bracketed literal syntax: leaves are elements,
//! inner nodes are lists. [`crate::Matrix::from_nested`] checks that the
//! nesting depth equals the rank and that every list at one depth has the
//! same length, then flattens the leaves depth-first (row-major).

use crate::{MatrixError, Result};

/// A tree of elements built from nested brackets, usually through [`nested!`].
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Elem(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Extents of a rectangular nesting of depth `N`.
    ///
    /// For a list of the wrong length, `expected`/`found` in
    /// [`MatrixError::RaggedInitializer`] are list lengths; for a leaf or list
    /// at the wrong depth they are nesting depths.
    pub fn extents<const N: usize>(&self) -> Result<[usize; N]> {
        let mut extents = [0usize; N];
        let mut seen = [false; N];
        check_shape(self, 0, &mut extents, &mut seen)?;
        Ok(extents)
    }

    /// Leaves in depth-first order.
    pub fn flatten(self) -> Vec<T> {
        let mut out = Vec::new();
        push_leaves(self, &mut out);
        out
    }
}

impl<T> From<T> for Nested<T> {
    fn from(value: T) -> Self {
        Nested::Elem(value)
    }
}

fn check_shape<T>(
    node: &Nested<T>,
    depth: usize,
    extents: &mut [usize],
    seen: &mut [bool],
) -> Result<()> {
    let rank = extents.len();
    match node {
        Nested::Elem(_) if depth == rank => Ok(()),
        Nested::Elem(_) => Err(MatrixError::RaggedInitializer {
            depth,
            expected: rank,
            found: depth,
        }),
        Nested::List(_) if depth == rank => Err(MatrixError::RaggedInitializer {
            depth,
            expected: rank,
            found: depth + 1,
        }),
        Nested::List(items) => {
            if !seen[depth] {
                seen[depth] = true;
                extents[depth] = items.len();
            } else if extents[depth] != items.len() {
                return Err(MatrixError::RaggedInitializer {
                    depth,
                    expected: extents[depth],
                    found: items.len(),
                });
            }
            for item in items {
                check_shape(item, depth + 1, extents, seen)?;
            }
            Ok(())
        }
    }
}

fn push_leaves<T>(node: Nested<T>, out: &mut Vec<T>) {
    match node {
        Nested::Elem(x) => out.push(x),
        Nested::List(items) => {
            for item in items {
                push_leaves(item, out);
            }
        }
    }
}

/// Build a [`Nested`] from bracketed literals.
///
/// The outer brackets are the macro's own; a rank-0 value is
/// `Nested::Elem(x)` (or `x.into()`).
///
/// ```rust
/// use slab_matrix::{nested, Matrix};
///
/// let m: Matrix<i32, 2> = Matrix::from_nested(nested![[1, 2, 3], [4, 5, 6]]).unwrap();
/// assert_eq!(m.extents(), &[2, 3]);
/// assert_eq!(m[[1, 0]], 4);
/// ```
#[macro_export]
macro_rules! nested {
    ($([$($inner:tt)*]),+ $(,)?) => {
        $crate::Nested::List(vec![$($crate::nested![$($inner)*]),+])
    };
    ($($elem:expr),* $(,)?) => {
        $crate::Nested::List(vec![$($crate::Nested::Elem($elem)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents_rank1() {
        let n = nested![1.0, 2.0, 3.0];
        assert_eq!(n.extents::<1>().unwrap(), [3]);
    }

    #[test]
    fn test_extents_rank2() {
        let n = nested![[1, 2, 3], [4, 5, 6]];
        assert_eq!(n.extents::<2>().unwrap(), [2, 3]);
        assert_eq!(n.flatten(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_extents_rank3() {
        let n = nested![[[1, 2], [3, 4]], [[5, 6], [7, 8]], [[9, 10], [11, 12]]];
        assert_eq!(n.extents::<3>().unwrap(), [3, 2, 2]);
        assert_eq!(n.flatten(), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_scalar() {
        let n = Nested::from(7);
        assert_eq!(n.extents::<0>().unwrap(), [0usize; 0]);
        assert_eq!(n.flatten(), vec![7]);
    }

    #[test]
    fn test_ragged_rejected() {
        let n = nested![[1, 2, 3], [4, 5]];
        match n.extents::<2>() {
            Err(MatrixError::RaggedInitializer {
                depth,
                expected,
                found,
            }) => {
                assert_eq!(depth, 1);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected RaggedInitializer, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_depth_rejected() {
        let n = nested![[1, 2], [3, 4]];
        assert!(n.extents::<1>().is_err());
        assert!(n.extents::<3>().is_err());
    }

    #[test]
    fn test_empty_list() {
        let n: Nested<f64> = nested![];
        assert_eq!(n.extents::<1>().unwrap(), [0]);
        assert!(n.flatten().is_empty());
    }
}
