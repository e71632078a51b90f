#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tactical grid engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing registry mutations, the world executes them through its `apply`
//! entry point and broadcasts [`Event`] values in response. Actor placement is
//! expressed separately as immutable maps keyed by [`GridCoordinate`], so
//! systems never mutate a snapshot another reader may still hold.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows that can be labelled with a single letter (`A` through `Z`).
pub const MAX_LABELLED_ROWS: u32 = 26;

/// Commands that express all permissible registry mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Registers a new grid and precomputes its coordinate table.
    CreateGrid {
        /// Number of rows laid out in the grid.
        rows: u32,
        /// Number of columns laid out in the grid.
        cols: u32,
        /// Side length of a single square cell measured in world units.
        cell_size: u32,
    },
    /// Moves an existing grid to a new world-space origin.
    RepositionGrid {
        /// Identifier of the grid being moved.
        grid: GridId,
        /// Horizontal world-space offset applied to the grid's cells.
        origin_x: f32,
        /// Vertical world-space offset applied to the grid's cells.
        origin_y: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a grid was registered and its coordinates precomputed.
    GridCreated {
        /// Identifier allocated to the grid by the world.
        grid: GridId,
        /// Geometry registered for the grid.
        geometry: TacticalGrid,
    },
    /// Confirms that a grid moved to a new world-space origin.
    GridRepositioned {
        /// Identifier of the grid that moved.
        grid: GridId,
        /// Horizontal world-space offset now applied to the grid.
        origin_x: f32,
        /// Vertical world-space offset now applied to the grid.
        origin_y: f32,
    },
    /// Reports that a command was rejected without changing any state.
    CommandRejected {
        /// Specific reason the command failed.
        reason: GridError,
    },
}

/// Unique identifier assigned to a registered grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridId(u32);

impl GridId {
    /// Creates a new grid identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid#{}", self.0)
    }
}

/// Opaque identifier of something placed on a grid.
///
/// The grid never interprets what an actor denotes; a unit, a tower and a
/// signal relay all look the same here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for ActorId {
    type Error = GridError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| GridError::InvalidActorId { value })
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Precomputed cell address within a single grid's coordinate table.
///
/// `id` is the row-major index `row * cols + col` assigned when the table is
/// built. Coordinates are never mutated; a moved actor is simply keyed by a
/// different coordinate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "CoordinateRepr")]
pub struct GridCoordinate {
    id: u32,
    row: i32,
    col: i32,
}

impl GridCoordinate {
    /// Creates a coordinate, rejecting negative rows or columns.
    pub fn new(id: u32, row: i32, col: i32) -> Result<Self, GridError> {
        if row < 0 || col < 0 {
            return Err(GridError::InvalidCoordinate { row, col });
        }

        Ok(Self { id, row, col })
    }

    /// Row-major index of the coordinate within its grid's table.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Military-style reference such as `A-5` or `B-12`.
    ///
    /// Rows are lettered from `A` and columns are one-based. Rows past `Z`
    /// have no letter and are reported as [`GridError::UnlabelledRow`].
    pub fn to_grid_reference(&self) -> Result<String, GridError> {
        let letter = row_label(self.row)?;
        Ok(format!("{letter}-{}", self.col + 1))
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({}, {})", self.row, self.col)
    }
}

#[derive(Deserialize)]
struct CoordinateRepr {
    id: u32,
    row: i32,
    col: i32,
}

impl TryFrom<CoordinateRepr> for GridCoordinate {
    type Error = GridError;

    fn try_from(repr: CoordinateRepr) -> Result<Self, Self::Error> {
        Self::new(repr.id, repr.row, repr.col)
    }
}

/// Returns the letter used to label the provided row.
pub fn row_label(row: i32) -> Result<char, GridError> {
    match u8::try_from(row) {
        Ok(offset) if u32::from(offset) < MAX_LABELLED_ROWS => Ok(char::from(b'A' + offset)),
        _ => Err(GridError::UnlabelledRow { row }),
    }
}

/// Dimension and geometry descriptor for one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TacticalGridRepr")]
pub struct TacticalGrid {
    rows: u32,
    cols: u32,
    cell_size: u32,
}

impl TacticalGrid {
    /// Creates a validated grid description.
    ///
    /// Every dimension must be positive, the row count must fit the
    /// single-letter row labels used by grid references and every cell needs
    /// a distinct `u32` id.
    pub fn new(rows: u32, cols: u32, cell_size: u32) -> Result<Self, GridError> {
        validate_dimensions(rows, cols)?;
        if cell_size == 0 {
            return Err(GridError::InvalidDimension {
                name: "cell_size",
                value: cell_size,
            });
        }

        Ok(Self {
            rows,
            cols,
            cell_size,
        })
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Side length of a single square cell expressed in world units.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Total width of the grid measured in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.cols as f32 * self.cell_size as f32
    }

    /// Total height of the grid measured in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size as f32
    }
}

impl fmt::Display for TacticalGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TacticalGrid({}, {}, {})",
            self.rows, self.cols, self.cell_size
        )
    }
}

#[derive(Deserialize)]
struct TacticalGridRepr {
    rows: u32,
    cols: u32,
    cell_size: u32,
}

impl TryFrom<TacticalGridRepr> for TacticalGrid {
    type Error = GridError;

    fn try_from(repr: TacticalGridRepr) -> Result<Self, Self::Error> {
        Self::new(repr.rows, repr.cols, repr.cell_size)
    }
}

/// Validates the row and column counts shared by grids and coordinate tables.
pub fn validate_dimensions(rows: u32, cols: u32) -> Result<(), GridError> {
    if rows == 0 {
        return Err(GridError::InvalidDimension {
            name: "rows",
            value: rows,
        });
    }
    if cols == 0 {
        return Err(GridError::InvalidDimension {
            name: "cols",
            value: cols,
        });
    }
    if rows > MAX_LABELLED_ROWS {
        return Err(GridError::RowLimitExceeded { rows });
    }
    // Cell ids are u32 and columns must fit an i32 coordinate.
    if i32::try_from(cols).is_err() || rows.checked_mul(cols).is_none() {
        return Err(GridError::GridTooLarge { rows, cols });
    }

    Ok(())
}

/// Integer point in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Computes the Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

/// Reasons a grid operation may be rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    /// A row, column or cell size was zero.
    #[error("grid dimension `{name}` must be positive, got {value}")]
    InvalidDimension {
        /// Name of the offending dimension.
        name: &'static str,
        /// Value that was supplied.
        value: u32,
    },
    /// A coordinate was constructed with a negative row or column.
    #[error("coordinates must be non-negative, got row {row} col {col}")]
    InvalidCoordinate {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
    },
    /// The requested cell lies outside the grid's coordinate table.
    #[error("no coordinate at row {row} col {col} in {grid}")]
    AbsentCoordinate {
        /// Grid that was searched.
        grid: GridId,
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
    },
    /// No grid with the provided identifier exists.
    #[error("{grid} is not registered")]
    UnknownGrid {
        /// Identifier that was looked up.
        grid: GridId,
    },
    /// A coordinate table already exists for the grid.
    #[error("coordinates for {grid} are already initialized")]
    CoordinatesAlreadyInitialized {
        /// Grid whose table already exists.
        grid: GridId,
    },
    /// The coordinate holds no actors.
    #[error("no actor at position {coordinate}")]
    NoActorAtPosition {
        /// Coordinate that was empty.
        coordinate: GridCoordinate,
    },
    /// The coordinate is occupied but not by the requested actor.
    #[error("actor {actor} not found at coordinate {coordinate}")]
    ActorNotFound {
        /// Actor that was expected.
        actor: ActorId,
        /// Coordinate that was searched.
        coordinate: GridCoordinate,
    },
    /// An actor map entry carried an empty actor set.
    #[error("actor set cannot be empty for coordinate {coordinate}")]
    EmptyActorSet {
        /// Coordinate with the empty set.
        coordinate: GridCoordinate,
    },
    /// An actor identifier was negative or too large.
    #[error("actor id must be a non-negative 32-bit value, got {value}")]
    InvalidActorId {
        /// Value that was supplied.
        value: i64,
    },
    /// Optimal placement was requested without any target positions.
    #[error("target positions cannot be empty")]
    EmptyInput,
    /// A world position maps outside the grid's precomputed coordinates.
    #[error("world position ({x}, {y}) maps to index {index} outside {grid}")]
    PositionOutOfTable {
        /// Grid the position was resolved against.
        grid: GridId,
        /// Horizontal world-space component.
        x: f32,
        /// Vertical world-space component.
        y: f32,
        /// Row-major index the position resolved to.
        index: i64,
    },
    /// The grid has more rows than can be lettered.
    #[error("grid has {rows} rows but row labels stop at {MAX_LABELLED_ROWS}")]
    RowLimitExceeded {
        /// Requested row count.
        rows: u32,
    },
    /// The row has no single-letter label.
    #[error("row {row} has no letter label")]
    UnlabelledRow {
        /// Row that was labelled.
        row: i32,
    },
    /// The grid holds more cells than can be given distinct ids.
    #[error("grid of {rows} rows by {cols} columns is too large to address")]
    GridTooLarge {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        cols: u32,
    },
    /// Coordinate table dimensions disagree with the registered geometry.
    #[error(
        "{grid} is registered as {expected_rows}x{expected_cols}, got {rows}x{cols}"
    )]
    DimensionMismatch {
        /// Grid whose table was requested.
        grid: GridId,
        /// Registered row count.
        expected_rows: u32,
        /// Registered column count.
        expected_cols: u32,
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        cols: u32,
    },
    /// Every grid identifier has been handed out.
    #[error("no grid identifiers left to allocate")]
    GridIdsExhausted,
}
