use super::config::{Backend, MatrixConfig};
use crate::core::matrix::{DenseMatrix, SparseMatrix, SquareMatrix};
use tracing::{debug, instrument};

/// A matrix built from a [`MatrixConfig`], keeping the concrete backend so
/// sparse-only operations stay reachable.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixStore {
    Dense(DenseMatrix),
    Sparse(SparseMatrix),
}

impl MatrixStore {
    pub fn as_matrix(&self) -> &dyn SquareMatrix {
        match self {
            MatrixStore::Dense(matrix) => matrix,
            MatrixStore::Sparse(matrix) => matrix,
        }
    }

    pub fn as_matrix_mut(&mut self) -> &mut dyn SquareMatrix {
        match self {
            MatrixStore::Dense(matrix) => matrix,
            MatrixStore::Sparse(matrix) => matrix,
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            MatrixStore::Dense(_) => Backend::Dense,
            MatrixStore::Sparse(_) => Backend::Sparse,
        }
    }

    pub fn as_sparse(&self) -> Option<&SparseMatrix> {
        match self {
            MatrixStore::Sparse(matrix) => Some(matrix),
            MatrixStore::Dense(_) => None,
        }
    }

    /// Seals a sparse matrix; dense matrices have a fixed structure already.
    pub fn seal_insertion(&mut self) {
        if let MatrixStore::Sparse(matrix) = self {
            matrix.seal_insertion();
        }
    }

    pub fn into_boxed(self) -> Box<dyn SquareMatrix> {
        match self {
            MatrixStore::Dense(matrix) => Box::new(matrix),
            MatrixStore::Sparse(matrix) => Box::new(matrix),
        }
    }
}

#[instrument(level = "debug", skip_all, fields(backend = ?config.backend, dimension = config.dimension))]
pub fn build_matrix(config: &MatrixConfig) -> MatrixStore {
    debug!("Creating {} matrix", config.triangle);
    match config.backend {
        Backend::Dense => MatrixStore::Dense(DenseMatrix::new(config.dimension, config.triangle)),
        Backend::Sparse => MatrixStore::Sparse(match config.reserved_elements {
            Some(reserved) => SparseMatrix::with_capacity(config.dimension, config.triangle, reserved),
            None => SparseMatrix::new(config.dimension, config.triangle),
        }),
    }
}
