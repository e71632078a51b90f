#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid state management for the tactical grid engine.
//!
//! The [`World`] owns the grid registry and the precomputed coordinate tables.
//! Registry mutations arrive as [`Command`] values through [`apply`]; actor
//! placement lives outside the world in immutable [`GridActorMap`] snapshots.

mod actor_map;
mod coordinates;
mod registry;

use glam::Vec2;
use log::debug;
use tactical_grid_core::{Command, Event, GridError, GridId, TacticalGrid};

pub use actor_map::GridActorMap;
pub use coordinates::CoordinateTable;
pub use registry::GridEntry;

use coordinates::CoordinateTables;
use registry::GridRegistry;

/// Represents the authoritative set of grids and their coordinate tables.
#[derive(Debug)]
pub struct World {
    registry: GridRegistry,
    coordinates: CoordinateTables,
}

impl World {
    /// Creates an empty world with no registered grids.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: GridRegistry::new(),
            coordinates: CoordinateTables::default(),
        }
    }

    /// Registers a grid without precomputing its coordinates.
    pub fn create_grid(&mut self, rows: u32, cols: u32, cell_size: u32) -> Result<GridId, GridError> {
        let geometry = TacticalGrid::new(rows, cols, cell_size)?;
        let grid = self.registry.register(geometry)?;
        debug!("registered {grid} as {geometry}");
        Ok(grid)
    }

    /// Precomputes the coordinate table for `grid`.
    ///
    /// The grid must already be registered with exactly `rows` by `cols`
    /// cells. A table is built exactly once per grid; later calls are
    /// rejected so coordinates handed out earlier never go stale.
    pub fn initialize_coordinates(
        &mut self,
        grid: GridId,
        rows: u32,
        cols: u32,
    ) -> Result<(), GridError> {
        let geometry = self
            .registry
            .get(grid)
            .ok_or(GridError::UnknownGrid { grid })?
            .grid();
        if geometry.rows() != rows || geometry.cols() != cols {
            return Err(GridError::DimensionMismatch {
                grid,
                expected_rows: geometry.rows(),
                expected_cols: geometry.cols(),
                rows,
                cols,
            });
        }

        self.coordinates.initialize(grid, rows, cols)?;
        debug!("initialized {} coordinates for {grid}", u64::from(rows) * u64::from(cols));
        Ok(())
    }

    /// Registers a grid and precomputes its coordinate table in one step.
    ///
    /// Nothing is registered when any dimension is invalid.
    pub fn create_grid_and_initialize_coordinates(
        &mut self,
        rows: u32,
        cols: u32,
        cell_size: u32,
    ) -> Result<GridId, GridError> {
        let grid = self.create_grid(rows, cols, cell_size)?;
        self.initialize_coordinates(grid, rows, cols)?;
        Ok(grid)
    }

    /// Moves a registered grid to a new world-space origin.
    pub fn reposition_grid(&mut self, grid: GridId, origin: Vec2) -> Result<(), GridError> {
        if !self.registry.set_origin(grid, origin) {
            return Err(GridError::UnknownGrid { grid });
        }

        debug!("moved {grid} to ({}, {})", origin.x, origin.y);
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Rejected commands leave the world unchanged and emit
/// [`Event::CommandRejected`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let outcome = match command {
        Command::CreateGrid {
            rows,
            cols,
            cell_size,
        } => world
            .create_grid_and_initialize_coordinates(rows, cols, cell_size)
            .and_then(|grid| {
                query::grid_by_id(world, grid).map(|entry| Event::GridCreated {
                    grid,
                    geometry: entry.grid(),
                })
            }),
        Command::RepositionGrid {
            grid,
            origin_x,
            origin_y,
        } => world
            .reposition_grid(grid, Vec2::new(origin_x, origin_y))
            .map(|()| Event::GridRepositioned {
                grid,
                origin_x,
                origin_y,
            }),
    };

    out_events.push(outcome.unwrap_or_else(|reason| Event::CommandRejected { reason }));
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tactical_grid_core::{GridCoordinate, GridError, GridId};

    use super::{CoordinateTable, GridEntry, World};

    /// Looks up a registered grid.
    pub fn grid_by_id(world: &World, grid: GridId) -> Result<&GridEntry, GridError> {
        world
            .registry
            .get(grid)
            .ok_or(GridError::UnknownGrid { grid })
    }

    /// Iterator over every registered grid in identifier order.
    pub fn grids(world: &World) -> impl Iterator<Item = &GridEntry> {
        world.registry.iter()
    }

    /// Provides the precomputed coordinate table for a grid.
    pub fn coordinate_table(world: &World, grid: GridId) -> Result<&CoordinateTable, GridError> {
        world
            .coordinates
            .get(grid)
            .ok_or(GridError::UnknownGrid { grid })
    }

    /// Fetches the precomputed coordinate at `row` and `col`.
    ///
    /// Cells outside the grid are reported as [`GridError::AbsentCoordinate`].
    pub fn coordinate_at(
        world: &World,
        grid: GridId,
        row: i32,
        col: i32,
    ) -> Result<GridCoordinate, GridError> {
        coordinate_table(world, grid)?
            .get(row, col)
            .ok_or(GridError::AbsentCoordinate { grid, row, col })
    }
}
