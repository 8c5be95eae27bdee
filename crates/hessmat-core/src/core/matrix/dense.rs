use super::error::MatrixError;
use super::traits::SquareMatrix;
use super::triangle::{Triangle, triangular};

/// Fully materialized square matrix.
///
/// Storage holds exactly [`Triangle::active_elements`] values, so every
/// in-range coordinate has a slot and lookups are O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    dimension: usize,
    triangle: Triangle,
    values: Vec<f64>,
}

impl DenseMatrix {
    /// Creates a zero-initialized matrix.
    pub fn new(dimension: usize, triangle: Triangle) -> Self {
        Self {
            dimension,
            triangle,
            values: vec![0.0; triangle.active_elements(dimension)],
        }
    }

    /// Backing storage in cursor order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of slots stored before row `y` in the `SymmetricUpper` layout,
    /// where row `r` holds columns `r..dimension`.
    #[inline]
    fn upper_row_offset(&self, y: usize) -> usize {
        // Σ_{r<y} (dimension - r)
        y * self.dimension - y * y.saturating_sub(1) / 2
    }
}

impl SquareMatrix for DenseMatrix {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn triangle(&self) -> Triangle {
        self.triangle
    }

    fn active_elements(&self) -> usize {
        self.values.len()
    }

    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.dimension || y >= self.dimension {
            return None;
        }
        let (x, y) = self.triangle.canonicalize(x, y);
        let index = match self.triangle {
            Triangle::Full => y * self.dimension + x,
            Triangle::SymmetricLower => triangular(y) + x,
            Triangle::SymmetricUpper => self.upper_row_offset(y) + (x - y),
        };
        (index < self.values.len()).then_some(index)
    }

    fn coordinates_from_index(&self, index: usize) -> Result<(usize, usize), MatrixError> {
        if index < self.index_begin() || index >= self.index_end() {
            return Err(MatrixError::IndexOutOfRange {
                index,
                end: self.index_end(),
            });
        }
        let coordinates = match self.triangle {
            Triangle::Full => (index % self.dimension, index / self.dimension),
            Triangle::SymmetricLower => {
                let y = (0..self.dimension)
                    .take_while(|&row| triangular(row) <= index)
                    .last()
                    .unwrap_or(0);
                (index - triangular(y), y)
            }
            Triangle::SymmetricUpper => {
                let y = (0..self.dimension)
                    .take_while(|&row| self.upper_row_offset(row) <= index)
                    .last()
                    .unwrap_or(0);
                (y + (index - self.upper_row_offset(y)), y)
            }
        };
        Ok(coordinates)
    }

    fn value_at_index(&self, index: usize) -> f64 {
        self.values[index]
    }

    fn set_value_at_index(&mut self, index: usize, value: f64) {
        self.values[index] = value;
    }

    fn element(&self, x: usize, y: usize) -> Result<f64, MatrixError> {
        let index = self.index_from_coordinates(x, y)?;
        Ok(self.values[index])
    }

    fn set_element(&mut self, x: usize, y: usize, value: f64) -> Result<(), MatrixError> {
        let index = self.index_from_coordinates(x, y)?;
        self.values[index] = value;
        Ok(())
    }

    fn add_to_element(&mut self, x: usize, y: usize, delta: f64) -> Result<(), MatrixError> {
        let index = self.index_from_coordinates(x, y)?;
        self.values[index] += delta;
        Ok(())
    }

    fn copy(&self) -> Box<dyn SquareMatrix> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUTS: [Triangle; 3] = [
        Triangle::Full,
        Triangle::SymmetricLower,
        Triangle::SymmetricUpper,
    ];

    #[test]
    fn new_allocates_zeroed_storage_sized_to_layout() {
        let full = DenseMatrix::new(5, Triangle::Full);
        assert_eq!(full.active_elements(), 25);
        assert!(full.values().iter().all(|&v| v == 0.0));

        let lower = DenseMatrix::new(5, Triangle::SymmetricLower);
        assert_eq!(lower.active_elements(), 15);
    }

    #[test]
    fn full_layout_is_row_major() {
        let matrix = DenseMatrix::new(4, Triangle::Full);
        assert_eq!(matrix.index_of(0, 0), Some(0));
        assert_eq!(matrix.index_of(3, 0), Some(3));
        assert_eq!(matrix.index_of(0, 1), Some(4));
        assert_eq!(matrix.index_of(2, 3), Some(14));
    }

    #[test]
    fn lower_layout_uses_triangular_row_offsets() {
        let matrix = DenseMatrix::new(4, Triangle::SymmetricLower);
        assert_eq!(matrix.index_of(0, 0), Some(0));
        assert_eq!(matrix.index_of(0, 1), Some(1));
        assert_eq!(matrix.index_of(1, 1), Some(2));
        assert_eq!(matrix.index_of(0, 3), Some(6));
        assert_eq!(matrix.index_of(3, 3), Some(9));
        assert_eq!(matrix.index_of(3, 0), matrix.index_of(0, 3));
    }

    #[test]
    fn upper_layout_assigns_distinct_slots_to_every_stored_entry() {
        let matrix = DenseMatrix::new(3, Triangle::SymmetricUpper);
        assert_eq!(matrix.index_of(0, 0), Some(0));
        assert_eq!(matrix.index_of(1, 0), Some(1));
        assert_eq!(matrix.index_of(2, 0), Some(2));
        assert_eq!(matrix.index_of(1, 1), Some(3));
        assert_eq!(matrix.index_of(2, 1), Some(4));
        assert_eq!(matrix.index_of(2, 2), Some(5));
        assert_eq!(matrix.index_of(0, 2), matrix.index_of(2, 0));
    }

    #[test]
    fn coordinates_out_of_range_have_no_index() {
        for triangle in LAYOUTS {
            let matrix = DenseMatrix::new(3, triangle);
            assert_eq!(matrix.index_of(3, 0), None);
            assert_eq!(matrix.index_of(0, 3), None);
        }
    }

    #[test]
    fn coordinates_from_index_round_trips_every_slot() {
        for triangle in LAYOUTS {
            for dimension in [1, 2, 5, 9] {
                let matrix = DenseMatrix::new(dimension, triangle);
                let mut seen = vec![false; matrix.active_elements()];
                for y in 0..dimension {
                    for x in 0..dimension {
                        let index = matrix.index_from_coordinates(x, y).unwrap();
                        let (cx, cy) = matrix.coordinates_from_index(index).unwrap();
                        assert_eq!((cx, cy), triangle.canonicalize(x, y));
                        assert_eq!(matrix.index_of(cx, cy), Some(index));
                        seen[index] = true;
                    }
                }
                assert!(seen.iter().all(|&s| s), "{triangle} dim {dimension}");
            }
        }
    }

    #[test]
    fn coordinates_from_index_rejects_indices_past_the_end() {
        let matrix = DenseMatrix::new(3, Triangle::SymmetricUpper);
        assert_eq!(
            matrix.coordinates_from_index(6),
            Err(MatrixError::IndexOutOfRange { index: 6, end: 6 })
        );
    }

    #[test]
    fn symmetric_writes_are_visible_through_the_mirrored_coordinate() {
        for triangle in [Triangle::SymmetricLower, Triangle::SymmetricUpper] {
            let mut matrix = DenseMatrix::new(4, triangle);
            matrix.set_element(3, 1, 2.5).unwrap();
            assert_eq!(matrix.element(1, 3).unwrap(), 2.5);
            matrix.add_to_element(1, 3, 0.5).unwrap();
            assert_eq!(matrix.element(3, 1).unwrap(), 3.0);
        }
    }

    #[test]
    fn full_layout_keeps_transposed_entries_separate() {
        let mut matrix = DenseMatrix::new(3, Triangle::Full);
        matrix.set_element(2, 0, 1.0).unwrap();
        assert_eq!(matrix.element(0, 2).unwrap(), 0.0);
    }

    #[test]
    fn element_access_out_of_range_fails() {
        let mut matrix = DenseMatrix::new(2, Triangle::Full);
        let expected = MatrixError::OutOfRange {
            x: 2,
            y: 0,
            dimension: 2,
        };
        assert_eq!(matrix.element(2, 0), Err(expected.clone()));
        assert_eq!(matrix.set_element(2, 0, 1.0), Err(expected.clone()));
        assert_eq!(matrix.add_to_element(2, 0, 1.0), Err(expected));
    }

    #[test]
    fn set_element_stores_explicit_zero() {
        let mut matrix = DenseMatrix::new(2, Triangle::Full);
        matrix.set_element(1, 1, 4.0).unwrap();
        matrix.set_element(1, 1, 0.0).unwrap();
        assert_eq!(matrix.element(1, 1).unwrap(), 0.0);
    }
}
