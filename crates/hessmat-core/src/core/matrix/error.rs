use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MatrixError {
    #[error("Dimension mismatch: expected length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Illegal coordinates [{x},{y}] for a matrix of dimension {dimension}")]
    OutOfRange {
        x: usize,
        y: usize,
        dimension: usize,
    },

    #[error("Storage index {index} is outside the active range 0..{end}")]
    IndexOutOfRange { index: usize, end: usize },

    #[error("Trying to write to non-existent element (x,y)=({x},{y}) in sealed sparse matrix")]
    NotFound { x: usize, y: usize },

    #[error("Insertion is complete, element (x,y)=({x},{y}) may not be inserted")]
    InsertionSealed { x: usize, y: usize },
}
