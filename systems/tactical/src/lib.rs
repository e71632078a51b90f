#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure tactical queries over a grid and an actor placement snapshot.
//!
//! Nothing here mutates the world or the actor map. Rendering adapters can
//! call into this crate from any number of readers while the single writer
//! prepares the next snapshot.

pub mod overlay;

use std::collections::BTreeSet;

use tactical_grid_core::{row_label, ActorId, GridCoordinate, GridError, GridId, Position};
use tactical_grid_world::{query, GridActorMap, World};

/// Heading printed above every tactical map.
pub const TACTICAL_MAP_TITLE: &str = "TACTICAL GRID STATUS:";

const OCCUPIED_CELL: &str = " X ";
const FREE_CELL: &str = " . ";

/// Row and column steps to the north, south, west and east neighbours.
const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Collects the von Neumann neighbours of `center` that lie inside `grid`.
///
/// Neighbours past an edge are silently left out, so corner cells yield two
/// coordinates and edge cells three.
pub fn adjacent_coordinates(
    world: &World,
    grid: GridId,
    center: GridCoordinate,
) -> Result<BTreeSet<GridCoordinate>, GridError> {
    let table = query::coordinate_table(world, grid)?;

    Ok(NEIGHBOUR_OFFSETS
        .iter()
        .filter_map(|(row_step, col_step)| {
            let row = center.row().checked_add(*row_step)?;
            let col = center.col().checked_add(*col_step)?;
            table.get(row, col)
        })
        .collect())
}

/// Renders the occupancy of `grid` as a lettered ASCII table.
///
/// The output opens with [`TACTICAL_MAP_TITLE`], followed by a header of
/// one-based column numbers and one line per row prefixed by its letter.
/// Occupied cells print as ` X ` and free cells as ` . `.
pub fn generate_tactical_map(
    world: &World,
    grid: GridId,
    actors: &GridActorMap,
) -> Result<String, GridError> {
    let table = query::coordinate_table(world, grid)?;

    let mut map = String::new();
    map.push_str(TACTICAL_MAP_TITLE);
    map.push('\n');
    map.push_str("   ");
    for col in 1..=table.cols() {
        map.push_str(&format!("{col:2} "));
    }
    map.push('\n');

    for coordinates in table.as_slice().chunks(table.cols() as usize) {
        let Some(first) = coordinates.first() else {
            continue;
        };
        map.push_str(&format!("{}: ", row_label(first.row())?));
        for coordinate in coordinates {
            if actors.is_occupied(*coordinate) {
                map.push_str(OCCUPIED_CELL);
            } else {
                map.push_str(FREE_CELL);
            }
        }
        map.push('\n');
    }

    Ok(map)
}

/// Locates `actor` and confirms the coordinate belongs to `grid`.
///
/// Returns `None` when the actor is absent or stands on a coordinate that
/// does not match the grid's precomputed table.
#[must_use]
pub fn find_actor_grid_position(
    world: &World,
    grid: GridId,
    actors: &GridActorMap,
    actor: ActorId,
) -> Option<GridCoordinate> {
    let position = actors.find_actor_position(actor)?;
    let stored = query::coordinate_table(world, grid)
        .ok()?
        .get(position.row(), position.col())?;
    (stored == position).then_some(position)
}

/// Computes the integer centroid of `positions`.
///
/// Each axis is averaged with truncating division, so `(0, 0)` and `(1, 1)`
/// yield `(0, 0)`.
pub fn find_optimal_placement_position(positions: &[Position]) -> Result<Position, GridError> {
    if positions.is_empty() {
        return Err(GridError::EmptyInput);
    }

    let count = positions.len() as i64;
    let (total_x, total_y) = positions.iter().fold((0_i64, 0_i64), |(x, y), position| {
        (x + i64::from(position.x()), y + i64::from(position.y()))
    });

    Ok(Position::new(mean(total_x, count), mean(total_y, count)))
}

fn mean(total: i64, count: i64) -> i32 {
    // The mean of i32 values always lies between their extremes.
    (total / count) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_square_is_its_centre() {
        let corners = [
            Position::new(0, 0),
            Position::new(10, 0),
            Position::new(10, 10),
            Position::new(0, 10),
        ];

        assert_eq!(
            find_optimal_placement_position(&corners),
            Ok(Position::new(5, 5))
        );
    }

    #[test]
    fn centroid_truncates_towards_zero() {
        let positions = [Position::new(0, 0), Position::new(1, -1), Position::new(1, -2)];

        assert_eq!(
            find_optimal_placement_position(&positions),
            Ok(Position::new(0, -1))
        );
    }

    #[test]
    fn centroid_of_nothing_is_rejected() {
        assert_eq!(
            find_optimal_placement_position(&[]),
            Err(GridError::EmptyInput)
        );
    }

    #[test]
    fn centroid_handles_extreme_values() {
        let positions = [Position::new(i32::MAX, i32::MIN), Position::new(i32::MAX, i32::MIN)];

        assert_eq!(
            find_optimal_placement_position(&positions),
            Ok(Position::new(i32::MAX, i32::MIN))
        );
    }
}
