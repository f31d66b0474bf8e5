//! Scalar type bounds for array elements.

use std::fmt::Debug;

/// Trait bounds shared by every element type that takes part in arithmetic
/// on arrays: integers and floating point numbers alike.
///
/// `Scalar` asks only for what the element-wise operators need. Negation is
/// bounded separately where it is used so unsigned integers qualify.
pub trait Scalar: Copy + Send + Sync + Debug + PartialEq + num_traits::NumAssign {}

impl<T> Scalar for T where T: Copy + Send + Sync + Debug + PartialEq + num_traits::NumAssign {}
