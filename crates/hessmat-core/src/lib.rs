//! # HESSMAT Core Library
//!
//! Storage and arithmetic for the large symmetric matrices (Hessians) and flat
//! coordinate vectors used by molecular geometry optimizers.
//!
//! ## Architectural Philosophy
//!
//! The library keeps a two-layer split so the numerical pieces stay free of
//! configuration concerns.
//!
//! - **[`core`]: The Foundation.** Stateless data structures: triangular
//!   layouts, the [`core::matrix::SquareMatrix`] addressing contract with its
//!   dense and compressed-row sparse backends, text exporters, and masked
//!   vector arithmetic over XYZ coordinate triples.
//!
//! - **[`engine`]: The Assembly Layer.** Validated configuration, a factory
//!   that picks the backend, and an assembly routine that accumulates
//!   `(row, column, value)` contributions into a finished matrix.
//!
//! ## Quick Example
//!
//! ```
//! use hessmat::core::matrix::{SquareMatrix, Triangle, create_sparse};
//!
//! let mut hessian = create_sparse(6, Triangle::SymmetricUpper);
//! hessian.add_to_element(1, 0, 2.5).unwrap();
//! assert_eq!(hessian.element(0, 1).unwrap(), 2.5);
//! assert_eq!(hessian.active_elements(), 1);
//! ```

pub mod core;
pub mod engine;
