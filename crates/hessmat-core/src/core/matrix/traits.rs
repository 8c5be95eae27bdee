use super::error::MatrixError;
use super::triangle::Triangle;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The addressing contract shared by every square matrix backend.
///
/// A backend maps `(x, y)` = `(column, row)` coordinates onto storage slots.
/// The slots are walked with the index cursor ([`index_begin`](Self::index_begin),
/// [`index_end`](Self::index_end), [`index_advance`](Self::index_advance)),
/// which visits every valid slot exactly once in ascending order. The generic
/// algorithms on this trait (`fill`, `max_abs_value`) only rely on that cursor,
/// so they behave identically for dense and sparse storage.
pub trait SquareMatrix: fmt::Debug + Send + Sync {
    /// Number of rows (and columns).
    fn dimension(&self) -> usize;

    fn triangle(&self) -> Triangle;

    /// Number of storage slots currently materialized.
    fn active_elements(&self) -> usize;

    /// Storage index of `(x, y)` after canonicalization, or `None` when the
    /// coordinate has no slot.
    fn index_of(&self, x: usize, y: usize) -> Option<usize>;

    /// Canonical `(x, y)` stored at `index`.
    fn coordinates_from_index(&self, index: usize) -> Result<(usize, usize), MatrixError>;

    /// Raw slot read. `index` must come from the cursor or [`index_of`](Self::index_of).
    fn value_at_index(&self, index: usize) -> f64;

    /// Raw slot write. `index` must come from the cursor or [`index_of`](Self::index_of).
    fn set_value_at_index(&mut self, index: usize, value: f64);

    fn element(&self, x: usize, y: usize) -> Result<f64, MatrixError>;

    fn set_element(&mut self, x: usize, y: usize, value: f64) -> Result<(), MatrixError>;

    /// Accumulates `delta` into `(x, y)`.
    fn add_to_element(&mut self, x: usize, y: usize, delta: f64) -> Result<(), MatrixError>;

    /// Deep copy with independent storage.
    fn copy(&self) -> Box<dyn SquareMatrix>;

    fn index_begin(&self) -> usize {
        0
    }

    fn index_end(&self) -> usize {
        self.active_elements()
    }

    fn index_advance(&self, index: usize) -> usize {
        index + 1
    }

    fn index_from_coordinates(&self, x: usize, y: usize) -> Result<usize, MatrixError> {
        self.index_of(x, y).ok_or(MatrixError::OutOfRange {
            x,
            y,
            dimension: self.dimension(),
        })
    }

    fn has_element(&self, x: usize, y: usize) -> bool {
        self.index_of(x, y).is_some()
    }

    /// Value at `(x, y)`, treating coordinates without a slot as zero.
    fn stored_value(&self, x: usize, y: usize) -> f64 {
        self.index_of(x, y)
            .map_or(0.0, |index| self.value_at_index(index))
    }

    fn check_coordinates(&self, x: usize, y: usize) -> Result<(), MatrixError> {
        let dimension = self.dimension();
        if x >= dimension || y >= dimension {
            return Err(MatrixError::OutOfRange { x, y, dimension });
        }
        Ok(())
    }

    /// Sets every active slot to `value`.
    fn fill(&mut self, value: f64) {
        let end = self.index_end();
        let mut index = self.index_begin();
        while index < end {
            self.set_value_at_index(index, value);
            index = self.index_advance(index);
        }
    }

    /// Largest absolute slot value, `0.0` for a matrix without slots.
    fn max_abs_value(&self) -> f64 {
        let end = self.index_end();
        let mut index = self.index_begin();
        let mut max_abs = 0.0f64;
        while index < end {
            max_abs = max_abs.max(self.value_at_index(index).abs());
            index = self.index_advance(index);
        }
        max_abs
    }

    /// `result = M · vector`, summing every column of every row through the
    /// addressing contract so symmetric aliases contribute on both sides.
    fn multiply_by_vector(&self, result: &mut [f64], vector: &[f64]) -> Result<(), MatrixError> {
        let dimension = self.dimension();
        if result.len() != dimension {
            return Err(MatrixError::DimensionMismatch {
                expected: dimension,
                found: result.len(),
            });
        }
        if vector.len() != dimension {
            return Err(MatrixError::DimensionMismatch {
                expected: dimension,
                found: vector.len(),
            });
        }

        let row_sum = |y: usize| -> f64 {
            vector
                .iter()
                .enumerate()
                .map(|(x, &v)| self.stored_value(x, y) * v)
                .sum()
        };

        #[cfg(not(feature = "parallel"))]
        result
            .iter_mut()
            .enumerate()
            .for_each(|(y, out)| *out = row_sum(y));

        #[cfg(feature = "parallel")]
        result
            .par_iter_mut()
            .enumerate()
            .for_each(|(y, out)| *out = row_sum(y));

        Ok(())
    }
}

impl Clone for Box<dyn SquareMatrix> {
    fn clone(&self) -> Self {
        self.copy()
    }
}
