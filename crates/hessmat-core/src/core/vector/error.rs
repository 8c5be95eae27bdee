use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum VectorError {
    #[error("Mismatch in vector lengths: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Every coordinate is frozen or the vector is empty; the average is undefined")]
    DivideByZero,

    #[error("Coordinate length {len} is not a multiple of 3")]
    NotTriples { len: usize },

    #[error("Periodic box width along axis {axis} must be positive and finite")]
    InvalidBoxWidth { axis: usize },

    #[error("Requested {requested} coordinates but only {len} are available")]
    OutOfRange { requested: usize, len: usize },
}
