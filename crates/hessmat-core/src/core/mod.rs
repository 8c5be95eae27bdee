//! # Core Module
//!
//! The stateless numerical building blocks of HESSMAT.
//!
//! - **Matrix Storage** ([`matrix`]) - Triangular layouts, the addressing
//!   contract and its dense and sparse backends
//! - **Coordinate Vectors** ([`vector`]) - Frozen-mask aware reductions,
//!   updates and point-set geometry over flat XYZ arrays
//!
//! The two submodules share only the `f64` element type and the convention
//! that a coordinate vector of length `3·n` pairs with a matrix of dimension
//! `3·n`.

pub mod matrix;
pub mod vector;
