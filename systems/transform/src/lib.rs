#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure conversions between grid coordinates and world-space positions.
//!
//! Grid-to-world conversion targets the centre of a cell so anchored sprites
//! sit in the middle of their square. World-to-grid conversion resolves a
//! position through the grid's precomputed coordinate table and reports
//! positions that land outside it as [`GridError::PositionOutOfTable`], which
//! callers should treat as a missed click rather than a failure.

use glam::Vec2;
use log::warn;
use tactical_grid_core::{GridCoordinate, GridError, GridId, TacticalGrid};
use tactical_grid_world::{query, GridEntry, World};

/// Converts a coordinate to the world-space centre of its cell.
#[must_use]
pub fn to_world_position(coordinate: GridCoordinate, cell_size: u32, offset: Vec2) -> Vec2 {
    let cell = cell_size as f32;
    let half = cell / 2.0;
    Vec2::new(
        coordinate.col() as f32 * cell + half + offset.x,
        coordinate.row() as f32 * cell + half + offset.y,
    )
}

/// Converts a coordinate to the world-space centre of its cell on `entry`.
///
/// The grid's origin offset is added to the result.
#[must_use]
pub fn grid_to_world(entry: &GridEntry, coordinate: GridCoordinate) -> Vec2 {
    to_world_position(coordinate, entry.grid().cell_size(), entry.origin())
}

/// Resolves a world-space position to a precomputed coordinate of `grid`.
///
/// The position is divided by `cell_size` as is: the grid's origin offset is
/// not subtracted, so this is the inverse of [`grid_to_world`] only for grids
/// sitting at the world origin. Use [`world_to_grid_with_origin`] for grids
/// that have been repositioned.
///
/// Columns are not range-checked on their own. A position right of the last
/// column resolves into the following row as long as the row-major index
/// stays inside the table.
pub fn world_to_grid(
    world: &World,
    grid: GridId,
    position: Vec2,
    cell_size: u32,
    cols: u32,
) -> Result<GridCoordinate, GridError> {
    let table = query::coordinate_table(world, grid)?;
    let (row, col) = cell_of(position, cell_size)?;
    let index = row.saturating_mul(i64::from(cols)).saturating_add(col);

    table
        .by_index(index)
        .ok_or_else(|| out_of_table(grid, position, index))
}

/// Resolves a world-space position against a repositioned grid.
///
/// The grid's origin is subtracted first and positions left or right of the
/// grid's columns are rejected instead of wrapping into a neighbouring row.
/// Failures report `position` as supplied, not the origin-relative value.
pub fn world_to_grid_with_origin(
    world: &World,
    grid: GridId,
    position: Vec2,
) -> Result<GridCoordinate, GridError> {
    let entry = query::grid_by_id(world, grid)?;
    let table = query::coordinate_table(world, grid)?;
    let geometry = entry.grid();

    let cols = i64::from(geometry.cols());
    let (row, col) = cell_of(position - entry.origin(), geometry.cell_size())?;
    let index = row.saturating_mul(cols).saturating_add(col);
    if col < 0 || col >= cols {
        return Err(out_of_table(grid, position, index));
    }

    table
        .by_index(index)
        .ok_or_else(|| out_of_table(grid, position, index))
}

/// Reports whether `coordinate` lies within the bounds of `grid`.
#[must_use]
pub fn is_valid_grid(grid: &TacticalGrid, coordinate: GridCoordinate) -> bool {
    let row_in_bounds = u32::try_from(coordinate.row()).is_ok_and(|row| row < grid.rows());
    let col_in_bounds = u32::try_from(coordinate.col()).is_ok_and(|col| col < grid.cols());
    row_in_bounds && col_in_bounds
}

/// Reports whether `coordinate` falls outside the bounds of `grid`.
#[must_use]
pub fn is_out_of_bounds(grid: &TacticalGrid, coordinate: GridCoordinate) -> bool {
    !is_valid_grid(grid, coordinate)
}

fn cell_of(position: Vec2, cell_size: u32) -> Result<(i64, i64), GridError> {
    if cell_size == 0 {
        return Err(GridError::InvalidDimension {
            name: "cell_size",
            value: cell_size,
        });
    }

    let cell = f64::from(cell_size);
    let row = (f64::from(position.y) / cell).floor();
    let col = (f64::from(position.x) / cell).floor();
    // Non-finite input saturates to i64::MIN, which no table index can match.
    let to_index = |value: f64| if value.is_finite() { value as i64 } else { i64::MIN };
    Ok((to_index(row), to_index(col)))
}

fn out_of_table(grid: GridId, position: Vec2, index: i64) -> GridError {
    warn!(
        "invalid grid coordinate position: ({}, {}) for {grid} [index: {index}]",
        position.x, position.y
    );
    GridError::PositionOutOfTable {
        grid,
        x: position.x,
        y: position.y,
        index,
    }
}
