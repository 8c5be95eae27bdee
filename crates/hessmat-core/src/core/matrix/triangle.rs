use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown triangle layout: '{0}'. Expected 'full', 'symmetric-lower' or 'symmetric-upper'")]
pub struct ParseTriangleError(pub String);

/// Which part of a square matrix is physically stored.
///
/// Coordinates are always given as `(x, y)` = `(column, row)`. For the
/// symmetric layouts `(x, y)` and `(y, x)` alias the same storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Triangle {
    /// Every `(x, y)` pair is stored.
    Full,
    /// Only entries with row ≥ column are stored.
    SymmetricLower,
    /// Only entries with column ≥ row are stored.
    SymmetricUpper,
}

impl Triangle {
    /// Number of storage slots a dense matrix of this layout needs.
    ///
    /// `dimension` must pass [`Triangle::checked_active_elements`].
    pub fn active_elements(self, dimension: usize) -> usize {
        match self {
            Triangle::Full => dimension * dimension,
            Triangle::SymmetricLower | Triangle::SymmetricUpper => triangular(dimension),
        }
    }

    /// Like [`Triangle::active_elements`], but `None` when `dimension·(dimension+1)`
    /// does not fit in a `usize`, the bound every addressing formula relies on.
    pub fn checked_active_elements(self, dimension: usize) -> Option<usize> {
        let doubled_triangle = dimension.checked_add(1)?.checked_mul(dimension)?;
        Some(match self {
            Triangle::Full => dimension * dimension,
            Triangle::SymmetricLower | Triangle::SymmetricUpper => doubled_triangle / 2,
        })
    }

    pub fn is_symmetric(self) -> bool {
        !matches!(self, Triangle::Full)
    }

    /// Maps `(x, y)` onto the stored half of the matrix.
    ///
    /// `SymmetricLower` yields `x <= y`, `SymmetricUpper` yields `x >= y`,
    /// `Full` leaves the pair untouched.
    #[inline]
    pub fn canonicalize(self, x: usize, y: usize) -> (usize, usize) {
        match self {
            Triangle::SymmetricLower if x > y => (y, x),
            Triangle::SymmetricUpper if x < y => (y, x),
            _ => (x, y),
        }
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Triangle::Full => "full",
            Triangle::SymmetricLower => "symmetric-lower",
            Triangle::SymmetricUpper => "symmetric-upper",
        };
        f.write_str(name)
    }
}

impl FromStr for Triangle {
    type Err = ParseTriangleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Triangle::Full),
            "symmetric-lower" | "lower" => Ok(Triangle::SymmetricLower),
            "symmetric-upper" | "upper" => Ok(Triangle::SymmetricUpper),
            other => Err(ParseTriangleError(other.to_string())),
        }
    }
}

/// `n·(n+1)/2`
#[inline]
pub(crate) fn triangular(n: usize) -> usize {
    n * (n + 1) / 2
}
