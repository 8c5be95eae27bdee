//! # Matrix Storage
//!
//! Square matrices addressed by `(x, y)` = `(column, row)` coordinates, with a
//! [`Triangle`] layout fixed at construction.
//!
//! - [`SquareMatrix`] is the addressing contract: coordinate to storage index,
//!   the inverse, and an index cursor that the generic algorithms
//!   (`fill`, `max_abs_value`, `multiply_by_vector`) walk.
//! - [`DenseMatrix`] materializes every slot of its layout.
//! - [`SparseMatrix`] stores rows in compressed form, grows on insertion and
//!   can be sealed once its structure is assembled.
//! - [`export`] renders a matrix for external tooling.

pub mod dense;
pub mod error;
pub mod export;
pub mod sparse;
pub mod traits;
pub mod triangle;

pub use dense::DenseMatrix;
pub use error::MatrixError;
pub use sparse::{InsertionMode, SparseMatrix};
pub use traits::SquareMatrix;
pub use triangle::Triangle;

pub fn create_dense(dimension: usize, triangle: Triangle) -> DenseMatrix {
    DenseMatrix::new(dimension, triangle)
}

pub fn create_sparse(dimension: usize, triangle: Triangle) -> SparseMatrix {
    SparseMatrix::new(dimension, triangle)
}
