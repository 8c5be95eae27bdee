use thiserror::Error;

use super::config::ConfigError;
use crate::core::matrix::MatrixError;
use crate::core::vector::VectorError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Matrix operation failed: {source}")]
    Matrix {
        #[from]
        source: MatrixError,
    },

    #[error("Vector operation failed: {source}")]
    Vector {
        #[from]
        source: VectorError,
    },

    #[error("Entry {index} ({row},{column}) could not be assembled: {source}")]
    Assembly {
        index: usize,
        row: usize,
        column: usize,
        #[source]
        source: MatrixError,
    },
}
