use super::error::MatrixError;
use super::traits::SquareMatrix;
use super::triangle::Triangle;
use tracing::{debug, trace};

pub const DEFAULT_RESERVED_ELEMENTS: usize = 100;

/// Whether new coordinates may still be added to a [`SparseMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionMode {
    /// Writes to absent coordinates allocate a new entry.
    #[default]
    Building,
    /// The structure is frozen; writes to absent coordinates fail.
    Sealed,
}

/// Square matrix in compressed-row form that grows as entries are inserted.
///
/// Row `y` owns the storage slots `row_starts[y]..row_starts[y + 1]`; within
/// that range `column_for_value` is strictly ascending and `values` holds the
/// payload at the same positions. Absent coordinates read as zero.
///
/// Inserting a new coordinate shifts every slot after the insertion point and
/// bumps the start offset of every following row, so a single insertion costs
/// O(active elements after the insertion point). Assembling rows in ascending
/// order keeps that cost low.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    dimension: usize,
    triangle: Triangle,
    mode: InsertionMode,
    row_starts: Vec<usize>,
    column_for_value: Vec<usize>,
    values: Vec<f64>,
    initial_reserved: usize,
    reserved_elements: usize,
}

impl SparseMatrix {
    pub fn new(dimension: usize, triangle: Triangle) -> Self {
        Self::with_capacity(dimension, triangle, DEFAULT_RESERVED_ELEMENTS)
    }

    /// Creates an empty matrix with room for `reserved_elements` entries
    /// before the first doubling.
    pub fn with_capacity(dimension: usize, triangle: Triangle, reserved_elements: usize) -> Self {
        let reserved_elements = reserved_elements.max(1);
        Self {
            dimension,
            triangle,
            mode: InsertionMode::Building,
            row_starts: vec![0; dimension + 1],
            column_for_value: Vec::with_capacity(reserved_elements),
            values: Vec::with_capacity(reserved_elements),
            initial_reserved: reserved_elements,
            reserved_elements,
        }
    }

    pub fn mode(&self) -> InsertionMode {
        self.mode
    }

    pub fn is_sealed(&self) -> bool {
        self.mode == InsertionMode::Sealed
    }

    /// Current entry capacity; doubles whenever an insertion finds it full.
    pub fn reserved_elements(&self) -> usize {
        self.reserved_elements
    }

    /// Freezes the structure. Values of present entries stay writable.
    pub fn seal_insertion(&mut self) {
        if self.mode == InsertionMode::Building {
            debug!(
                "Sealing sparse matrix (dimension {}, {} entries)",
                self.dimension,
                self.active_elements()
            );
        }
        self.mode = InsertionMode::Sealed;
    }

    /// Discards every entry and returns to an empty, unsealed matrix.
    pub fn reset(&mut self) {
        debug!(
            "Resetting sparse matrix (dimension {}, dropping {} entries)",
            self.dimension,
            self.active_elements()
        );
        *self = Self::with_capacity(self.dimension, self.triangle, self.initial_reserved);
    }

    fn expand_storage(&mut self) {
        self.reserved_elements *= 2;
        trace!("Expanding sparse storage to {} entries", self.reserved_elements);
        let additional = self.reserved_elements - self.values.len();
        self.column_for_value.reserve_exact(additional);
        self.values.reserve_exact(additional);
    }

    #[inline]
    fn row_range(&self, y: usize) -> std::ops::Range<usize> {
        self.row_starts[y]..self.row_starts[y + 1]
    }

    /// Ensures a slot exists for `(x, y)` and returns its index.
    ///
    /// Inserting a coordinate that is already present is a no-op. A new entry
    /// starts at zero.
    pub fn insert_element(&mut self, x: usize, y: usize) -> Result<usize, MatrixError> {
        if self.mode == InsertionMode::Sealed {
            return Err(MatrixError::InsertionSealed { x, y });
        }
        self.check_coordinates(x, y)?;
        let (x, y) = self.triangle.canonicalize(x, y);

        let range = self.row_range(y);
        let position = match self.column_for_value[range.clone()].binary_search(&x) {
            Ok(offset) => return Ok(range.start + offset),
            Err(offset) => range.start + offset,
        };

        if self.active_elements() >= self.reserved_elements {
            self.expand_storage();
        }
        self.column_for_value.insert(position, x);
        self.values.insert(position, 0.0);
        for start in &mut self.row_starts[y + 1..] {
            *start += 1;
        }
        Ok(position)
    }

    /// Index of the slot for `(x, y)`, allocating it while still building.
    fn slot_for_write(&mut self, x: usize, y: usize) -> Result<usize, MatrixError> {
        match self.index_of(x, y) {
            Some(index) => Ok(index),
            None if self.mode == InsertionMode::Sealed => Err(MatrixError::NotFound { x, y }),
            None => self.insert_element(x, y),
        }
    }

    /// Index of the last stored entry on row `y`, or `None` for an empty row.
    ///
    /// # Panics
    ///
    /// Panics unless the matrix is `SymmetricUpper` and `y` is in range.
    pub fn index_of_last_element_on_row(&self, y: usize) -> Option<usize> {
        self.assert_upper_row_query(y);
        let range = self.row_range(y);
        (!range.is_empty()).then(|| range.end - 1)
    }

    /// Index of the first entry on row `y` whose column is at least `x`.
    ///
    /// When every column on the row is smaller than `x` the one-past-the-row
    /// index is returned. An empty row yields `None`.
    ///
    /// # Panics
    ///
    /// Panics unless the matrix is `SymmetricUpper` and `x`, `y` are in range.
    pub fn index_of_first_element_at_or_after_x(&self, x: usize, y: usize) -> Option<usize> {
        self.assert_upper_row_query(y);
        assert!(
            x < self.dimension,
            "column {x} out of range for dimension {}",
            self.dimension
        );
        let range = self.row_range(y);
        if range.is_empty() {
            return None;
        }
        let columns = &self.column_for_value[range.clone()];
        Some(range.start + columns.partition_point(|&column| column < x))
    }

    fn assert_upper_row_query(&self, y: usize) {
        assert_eq!(
            self.triangle,
            Triangle::SymmetricUpper,
            "row range queries are only defined for symmetric-upper matrices"
        );
        assert!(
            y < self.dimension,
            "row {y} out of range for dimension {}",
            self.dimension
        );
    }

    /// `(column, value)` pairs stored on row `y`, in ascending column order.
    pub fn row_entries(&self, y: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = if y < self.dimension {
            self.row_range(y)
        } else {
            0..0
        };
        self.column_for_value[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Stored columns of every row, for inspecting the sparsity pattern.
    pub fn layout(&self) -> Vec<Vec<usize>> {
        (0..self.dimension)
            .map(|y| self.column_for_value[self.row_range(y)].to_vec())
            .collect()
    }
}

impl SquareMatrix for SparseMatrix {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn triangle(&self) -> Triangle {
        self.triangle
    }

    fn active_elements(&self) -> usize {
        self.row_starts[self.dimension]
    }

    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.dimension || y >= self.dimension {
            return None;
        }
        let (x, y) = self.triangle.canonicalize(x, y);
        let range = self.row_range(y);
        let columns = &self.column_for_value[range.clone()];
        let (&first, &last) = (columns.first()?, columns.last()?);
        if x < first || x > last {
            return None;
        }
        columns
            .binary_search(&x)
            .ok()
            .map(|offset| range.start + offset)
    }

    fn coordinates_from_index(&self, index: usize) -> Result<(usize, usize), MatrixError> {
        if index >= self.active_elements() {
            return Err(MatrixError::IndexOutOfRange {
                index,
                end: self.active_elements(),
            });
        }
        // Last row whose start is at or before `index`; empty rows share a
        // start with their successor and are skipped by this search.
        let y = self.row_starts.partition_point(|&start| start <= index) - 1;
        Ok((self.column_for_value[index], y))
    }

    fn value_at_index(&self, index: usize) -> f64 {
        self.values[index]
    }

    fn set_value_at_index(&mut self, index: usize, value: f64) {
        self.values[index] = value;
    }

    fn element(&self, x: usize, y: usize) -> Result<f64, MatrixError> {
        self.check_coordinates(x, y)?;
        Ok(self.stored_value(x, y))
    }

    /// Writing `0.0` never creates or changes an entry.
    fn set_element(&mut self, x: usize, y: usize, value: f64) -> Result<(), MatrixError> {
        self.check_coordinates(x, y)?;
        if value == 0.0 {
            return Ok(());
        }
        let index = self.slot_for_write(x, y)?;
        self.values[index] = value;
        Ok(())
    }

    fn add_to_element(&mut self, x: usize, y: usize, delta: f64) -> Result<(), MatrixError> {
        self.check_coordinates(x, y)?;
        let index = self.slot_for_write(x, y)?;
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

    fn assert_structure_invariants(matrix: &SparseMatrix) {
        assert_eq!(matrix.row_starts.len(), matrix.dimension + 1);
        assert_eq!(matrix.active_elements(), matrix.values.len());
        assert_eq!(matrix.active_elements(), matrix.column_for_value.len());
        for y in 0..matrix.dimension {
            let columns = &matrix.column_for_value[matrix.row_range(y)];
            assert!(
                columns.windows(2).all(|w| w[0] < w[1]),
                "row {y} columns not strictly ascending: {columns:?}"
            );
        }
    }

    #[test]
    fn new_matrix_is_empty_and_building() {
        let matrix = SparseMatrix::new(4, Triangle::Full);
        assert_eq!(matrix.active_elements(), 0);
        assert_eq!(matrix.mode(), InsertionMode::Building);
        assert_eq!(matrix.reserved_elements(), DEFAULT_RESERVED_ELEMENTS);
        assert_eq!(matrix.element(2, 3).unwrap(), 0.0);
    }

    #[test]
    fn insert_element_keeps_rows_sorted_regardless_of_insertion_order() {
        let mut matrix = SparseMatrix::new(5, Triangle::Full);
        for &(x, y) in &[(3, 2), (0, 4), (1, 2), (4, 0), (2, 2), (0, 0)] {
            matrix.insert_element(x, y).unwrap();
            assert_structure_invariants(&matrix);
        }
        assert_eq!(
            matrix.layout(),
            vec![vec![0, 4], vec![], vec![1, 2, 3], vec![], vec![0]]
        );
    }

    #[test]
    fn insert_element_is_idempotent() {
        let mut matrix = SparseMatrix::new(3, Triangle::SymmetricUpper);
        let first = matrix.insert_element(2, 1).unwrap();
        let active = matrix.active_elements();
        let second = matrix.insert_element(1, 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(matrix.active_elements(), active);
    }

    #[test]
    fn insert_element_canonicalizes_symmetric_coordinates() {
        let mut lower = SparseMatrix::new(3, Triangle::SymmetricLower);
        lower.insert_element(2, 0).unwrap();
        assert_eq!(lower.layout(), vec![vec![], vec![], vec![0]]);

        let mut upper = SparseMatrix::new(3, Triangle::SymmetricUpper);
        upper.insert_element(0, 2).unwrap();
        assert_eq!(upper.layout(), vec![vec![2], vec![], vec![]]);
    }

    #[test]
    fn insertion_doubles_reserved_capacity_when_full() {
        let mut matrix = SparseMatrix::with_capacity(4, Triangle::Full, 2);
        matrix.insert_element(0, 0).unwrap();
        matrix.insert_element(1, 0).unwrap();
        assert_eq!(matrix.reserved_elements(), 2);
        matrix.insert_element(2, 0).unwrap();
        assert_eq!(matrix.reserved_elements(), 4);
        for x in 0..4 {
            matrix.insert_element(x, 1).unwrap();
        }
        assert_eq!(matrix.reserved_elements(), 8);
        assert_eq!(matrix.active_elements(), 7);
        assert_structure_invariants(&matrix);
    }

    #[test]
    fn index_of_finds_first_last_and_middle_columns() {
        let mut matrix = SparseMatrix::new(10, Triangle::Full);
        for x in [1, 3, 5, 7, 9] {
            matrix.set_element(x, 4, x as f64).unwrap();
        }
        for x in [1, 3, 5, 7, 9] {
            let index = matrix.index_of(x, 4).unwrap();
            assert_eq!(matrix.value_at_index(index), x as f64);
        }
        for x in [0, 2, 4, 6, 8] {
            assert_eq!(matrix.index_of(x, 4), None);
        }
        assert_eq!(matrix.index_of(1, 3), None);
        assert_eq!(matrix.index_of(10, 4), None);
    }

    #[test]
    fn element_of_absent_coordinate_is_zero_but_out_of_range_fails() {
        let matrix = SparseMatrix::new(3, Triangle::SymmetricLower);
        assert_eq!(matrix.element(1, 2).unwrap(), 0.0);
        assert_eq!(
            matrix.element(3, 0),
            Err(MatrixError::OutOfRange {
                x: 3,
                y: 0,
                dimension: 3
            })
        );
    }

    #[test]
    fn set_element_with_zero_never_creates_an_entry() {
        let mut matrix = SparseMatrix::new(3, Triangle::Full);
        matrix.set_element(1, 1, 0.0).unwrap();
        assert_eq!(matrix.active_elements(), 0);
    }

    #[test]
    fn set_element_with_zero_leaves_existing_value() {
        let mut matrix = SparseMatrix::new(3, Triangle::Full);
        matrix.set_element(1, 1, 2.0).unwrap();
        matrix.set_element(1, 1, 0.0).unwrap();
        assert_eq!(matrix.element(1, 1).unwrap(), 2.0);
    }

    #[test]
    fn set_element_overwrites_and_add_to_element_accumulates() {
        let mut matrix = SparseMatrix::new(3, Triangle::SymmetricUpper);
        matrix.set_element(0, 2, 1.0).unwrap();
        matrix.set_element(2, 0, 4.0).unwrap();
        assert_eq!(matrix.element(0, 2).unwrap(), 4.0);
        matrix.add_to_element(0, 2, 0.5).unwrap();
        matrix.add_to_element(1, 1, -2.0).unwrap();
        assert_eq!(matrix.element(2, 0).unwrap(), 4.5);
        assert_eq!(matrix.element(1, 1).unwrap(), -2.0);
        assert_eq!(matrix.active_elements(), 2);
    }

    #[test]
    fn sealed_matrix_rejects_new_coordinates_but_updates_present_ones() {
        let mut matrix = SparseMatrix::new(3, Triangle::Full);
        matrix.set_element(0, 0, 1.0).unwrap();
        matrix.seal_insertion();
        assert!(matrix.is_sealed());

        assert_eq!(
            matrix.set_element(1, 0, 2.0),
            Err(MatrixError::NotFound { x: 1, y: 0 })
        );
        assert_eq!(
            matrix.add_to_element(1, 0, 2.0),
            Err(MatrixError::NotFound { x: 1, y: 0 })
        );
        assert_eq!(
            matrix.insert_element(1, 0),
            Err(MatrixError::InsertionSealed { x: 1, y: 0 })
        );

        matrix.set_element(0, 0, 3.0).unwrap();
        matrix.add_to_element(0, 0, 1.0).unwrap();
        assert_eq!(matrix.element(0, 0).unwrap(), 4.0);
        assert_eq!(matrix.active_elements(), 1);
    }

    #[test]
    fn reset_returns_to_empty_building_matrix() {
        let mut matrix = SparseMatrix::with_capacity(3, Triangle::SymmetricLower, 1);
        matrix.set_element(0, 1, 1.0).unwrap();
        matrix.set_element(0, 2, 1.0).unwrap();
        matrix.seal_insertion();
        matrix.reset();

        assert_eq!(matrix.active_elements(), 0);
        assert_eq!(matrix.mode(), InsertionMode::Building);
        assert_eq!(matrix.reserved_elements(), 1);
        assert_eq!(matrix.triangle(), Triangle::SymmetricLower);
        matrix.set_element(2, 2, 1.0).unwrap();
        assert_eq!(matrix.active_elements(), 1);
    }

    #[test]
    fn coordinates_from_index_skips_empty_rows() {
        let mut matrix = SparseMatrix::new(5, Triangle::Full);
        matrix.insert_element(2, 0).unwrap();
        matrix.insert_element(1, 3).unwrap();
        matrix.insert_element(4, 3).unwrap();
        assert_eq!(matrix.coordinates_from_index(0), Ok((2, 0)));
        assert_eq!(matrix.coordinates_from_index(1), Ok((1, 3)));
        assert_eq!(matrix.coordinates_from_index(2), Ok((4, 3)));
        assert_eq!(
            matrix.coordinates_from_index(3),
            Err(MatrixError::IndexOutOfRange { index: 3, end: 3 })
        );
    }

    #[test]
    fn coordinates_from_index_round_trips_through_index_of() {
        let mut matrix = SparseMatrix::new(6, Triangle::SymmetricUpper);
        for &(x, y) in &[(5, 0), (0, 0), (3, 2), (2, 3), (4, 4), (1, 5)] {
            matrix.add_to_element(x, y, 1.0).unwrap();
        }
        let mut index = matrix.index_begin();
        while index < matrix.index_end() {
            let (x, y) = matrix.coordinates_from_index(index).unwrap();
            assert!(x >= y);
            assert_eq!(matrix.index_of(x, y), Some(index));
            assert_eq!(matrix.index_of(y, x), Some(index));
            index = matrix.index_advance(index);
        }
    }

    #[test]
    fn row_range_queries_on_upper_matrix() {
        let mut matrix = SparseMatrix::new(6, Triangle::SymmetricUpper);
        for x in [1, 3, 5] {
            matrix.set_element(x, 1, 1.0).unwrap();
        }
        matrix.set_element(0, 0, 1.0).unwrap();

        assert_eq!(matrix.index_of_last_element_on_row(0), Some(0));
        assert_eq!(matrix.index_of_last_element_on_row(1), Some(3));
        assert_eq!(matrix.index_of_last_element_on_row(2), None);

        assert_eq!(matrix.index_of_first_element_at_or_after_x(1, 1), Some(1));
        assert_eq!(matrix.index_of_first_element_at_or_after_x(2, 1), Some(2));
        assert_eq!(matrix.index_of_first_element_at_or_after_x(4, 1), Some(3));
        assert_eq!(matrix.index_of_first_element_at_or_after_x(5, 1), Some(3));
        assert_eq!(matrix.index_of_first_element_at_or_after_x(0, 1), Some(1));
        assert_eq!(matrix.index_of_first_element_at_or_after_x(3, 2), None);
        assert_eq!(matrix.index_of_first_element_at_or_after_x(1, 0), Some(1));
    }

    #[test]
    #[should_panic(expected = "symmetric-upper")]
    fn row_range_queries_panic_on_other_layouts() {
        let matrix = SparseMatrix::new(3, Triangle::Full);
        matrix.index_of_last_element_on_row(0);
    }

    #[test]
    fn row_entries_yield_columns_with_values() {
        let mut matrix = SparseMatrix::new(4, Triangle::Full);
        matrix.set_element(3, 2, 3.0).unwrap();
        matrix.set_element(0, 2, 1.0).unwrap();
        let row: Vec<_> = matrix.row_entries(2).collect();
        assert_eq!(row, vec![(0, 1.0), (3, 3.0)]);
        assert_eq!(matrix.row_entries(7).count(), 0);
    }

    #[test]
    fn copy_keeps_sealed_state_and_contents() {
        let mut matrix = SparseMatrix::new(3, Triangle::Full);
        matrix.set_element(2, 1, 8.0).unwrap();
        matrix.seal_insertion();
        let copy = matrix.clone();
        assert_eq!(copy, matrix);
        assert!(copy.is_sealed());
    }
}
