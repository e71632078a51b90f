//! Precomputed coordinate tables indexed by row-major cell id.

use std::collections::{btree_map::Entry, BTreeMap};

use tactical_grid_core::{validate_dimensions, GridCoordinate, GridError, GridId};

/// Flat, read-only sequence of every coordinate in one grid.
///
/// Entry `i` always carries id `i`; the table is built once when the grid is
/// initialized and never resized afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordinateTable {
    rows: u32,
    cols: u32,
    coordinates: Vec<GridCoordinate>,
}

impl CoordinateTable {
    fn build(rows: u32, cols: u32) -> Result<Self, GridError> {
        validate_dimensions(rows, cols)?;

        let capacity = usize::try_from(u64::from(rows) * u64::from(cols)).unwrap_or(0);
        let mut coordinates = Vec::with_capacity(capacity);
        for row in 0..rows {
            for col in 0..cols {
                let id = row * cols + col;
                coordinates.push(GridCoordinate::new(id, signed(row), signed(col))?);
            }
        }

        Ok(Self {
            rows,
            cols,
            coordinates,
        })
    }

    /// Number of rows covered by the table.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns covered by the table.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of coordinates stored in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Reports whether the table holds no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Every coordinate in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[GridCoordinate] {
        &self.coordinates
    }

    /// Returns the coordinate stored at the provided row-major index.
    #[must_use]
    pub fn by_index(&self, index: i64) -> Option<GridCoordinate> {
        let index = usize::try_from(index).ok()?;
        self.coordinates.get(index).copied()
    }

    /// Returns the precomputed coordinate for a row and column, if in bounds.
    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Option<GridCoordinate> {
        let row = u32::try_from(row).ok()?;
        let col = u32::try_from(col).ok()?;
        if row >= self.rows || col >= self.cols {
            return None;
        }

        let index = usize::try_from(row).ok()?;
        let width = usize::try_from(self.cols).ok()?;
        let column = usize::try_from(col).ok()?;
        self.coordinates.get(index * width + column).copied()
    }
}

fn signed(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Coordinate tables for every initialized grid.
#[derive(Debug, Default)]
pub(crate) struct CoordinateTables {
    tables: BTreeMap<GridId, CoordinateTable>,
}

impl CoordinateTables {
    /// Precomputes the coordinates for a grid that has no table yet.
    pub(crate) fn initialize(&mut self, grid: GridId, rows: u32, cols: u32) -> Result<(), GridError> {
        let table = CoordinateTable::build(rows, cols)?;
        match self.tables.entry(grid) {
            Entry::Occupied(_) => Err(GridError::CoordinatesAlreadyInitialized { grid }),
            Entry::Vacant(slot) => {
                let _ = slot.insert(table);
                Ok(())
            }
        }
    }

    pub(crate) fn get(&self, grid: GridId) -> Option<&CoordinateTable> {
        self.tables.get(&grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_assigns_row_major_identifiers() {
        let table = CoordinateTable::build(3, 4).expect("valid dimensions");

        assert_eq!(table.len(), 12);
        for (index, coordinate) in table.as_slice().iter().enumerate() {
            assert_eq!(coordinate.id() as usize, index);
            assert_eq!(
                coordinate.id(),
                coordinate.row() as u32 * 4 + coordinate.col() as u32
            );
        }
    }

    #[test]
    fn build_rejects_empty_dimensions() {
        assert_eq!(
            CoordinateTable::build(0, 4),
            Err(GridError::InvalidDimension {
                name: "rows",
                value: 0
            })
        );
        assert_eq!(
            CoordinateTable::build(4, 0),
            Err(GridError::InvalidDimension {
                name: "cols",
                value: 0
            })
        );
    }

    #[test]
    fn build_rejects_columns_that_overflow_coordinates() {
        assert_eq!(
            CoordinateTable::build(2, u32::MAX),
            Err(GridError::GridTooLarge {
                rows: 2,
                cols: u32::MAX
            })
        );
    }

    #[test]
    fn get_returns_none_outside_bounds() {
        let table = CoordinateTable::build(2, 3).expect("valid dimensions");

        assert_eq!(table.get(1, 2).map(|c| c.id()), Some(5));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 3), None);
        assert_eq!(table.get(-1, 0), None);
    }

    #[test]
    fn by_index_rejects_negative_and_overflowing_indices() {
        let table = CoordinateTable::build(2, 2).expect("valid dimensions");

        assert_eq!(table.by_index(3).map(|c| (c.row(), c.col())), Some((1, 1)));
        assert_eq!(table.by_index(4), None);
        assert_eq!(table.by_index(-1), None);
    }

    #[test]
    fn initialize_refuses_to_rebuild_an_existing_table() {
        let mut tables = CoordinateTables::default();
        let grid = GridId::new(0);

        tables.initialize(grid, 2, 2).expect("first initialization");
        assert_eq!(
            tables.initialize(grid, 5, 5),
            Err(GridError::CoordinatesAlreadyInitialized { grid })
        );
        assert_eq!(tables.get(grid).map(CoordinateTable::len), Some(4));
    }
}
