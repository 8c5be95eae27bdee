//! # Coordinate Vectors
//!
//! Arithmetic over flat coordinate vectors (`&[f64]`), logically grouped as
//! XYZ triples per atom. Every reduction and update accepts an optional
//! [`FrozenMask`]; frozen scalars are skipped uniformly, so fixed atoms drop
//! out of distances, gradient norms and convergence metrics without any
//! special handling in the caller.
//!
//! - [`ops`] holds the masked reductions and in-place updates.
//! - [`geometry`] interprets the vector as points: close contacts, periodic
//!   minimum-image distances, bounding boxes and homogeneous transforms.

pub mod error;
pub mod geometry;
pub mod mask;
pub mod ops;

pub use error::VectorError;
pub use mask::FrozenMask;
pub use ops::{
    add, angle_between, axpy, copy, dot_product, in_place_add_scaled, magnitude, rms_distance,
    rms_magnitude, squared,
};
