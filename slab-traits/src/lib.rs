//! Shared traits for the slab-matrix crates.
//!
//! Numeric backends can bound on [`Scalar`] without depending on the array
//! crate. Any `Copy` type implementing `num_traits::NumAssign` qualifies.

pub mod scalar;

pub use scalar::Scalar;
