//! World-space overlay data for drawing a grid and its occupants.
//!
//! The helpers here only compute geometry and text; adapters decide how to
//! draw them.

use glam::Vec2;
use tactical_grid_core::{GridCoordinate, GridError, GridId};
use tactical_grid_system_transform::{grid_to_world, is_out_of_bounds};
use tactical_grid_world::{query, GridActorMap, GridEntry, World};

/// Square highlighting an occupied cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OccupiedCell {
    /// Coordinate the square covers.
    pub coordinate: GridCoordinate,
    /// Top-left corner in world space.
    pub min: Vec2,
    /// Side length in world units.
    pub size: f32,
}

/// Text annotation anchored at the centre of a cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellLabel {
    /// Coordinate the label belongs to.
    pub coordinate: GridCoordinate,
    /// World-space centre of the cell.
    pub anchor: Vec2,
    /// Lettered reference such as `A-1`.
    pub reference: String,
    /// Zero-based `(row, col)` caption.
    pub caption: String,
}

/// Highlight squares for every occupied cell of `entry`.
///
/// Occupied coordinates outside the grid's bounds are skipped.
#[must_use]
pub fn occupied_cells(entry: &GridEntry, actors: &GridActorMap) -> Vec<OccupiedCell> {
    let geometry = entry.grid();
    let size = geometry.cell_size() as f32;
    let half = Vec2::splat(size / 2.0);

    actors
        .occupied_coordinates()
        .into_iter()
        .filter(|coordinate| !is_out_of_bounds(&geometry, *coordinate))
        .map(|coordinate| OccupiedCell {
            coordinate,
            min: grid_to_world(entry, coordinate) - half,
            size,
        })
        .collect()
}

/// Labels for every cell of `grid`, in row-major order.
pub fn cell_labels(world: &World, grid: GridId) -> Result<Vec<CellLabel>, GridError> {
    let entry = query::grid_by_id(world, grid)?;
    let table = query::coordinate_table(world, grid)?;

    table
        .as_slice()
        .iter()
        .map(|coordinate| {
            Ok(CellLabel {
                coordinate: *coordinate,
                anchor: grid_to_world(entry, *coordinate),
                reference: coordinate.to_grid_reference()?,
                caption: format!("({}, {})", coordinate.row(), coordinate.col()),
            })
        })
        .collect()
}
