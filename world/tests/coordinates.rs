use std::collections::BTreeSet;

use proptest::prelude::*;
use tactical_grid_core::{GridError, GridId, MAX_LABELLED_ROWS};
use tactical_grid_world::{query, World};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn initialization_precomputes_every_cell(rows in 1u32..=MAX_LABELLED_ROWS, cols in 1u32..40) {
        let mut world = World::new();
        let grid = world
            .create_grid_and_initialize_coordinates(rows, cols, 16)
            .expect("valid dimensions");
        let table = query::coordinate_table(&world, grid).expect("table exists");

        prop_assert_eq!(table.len(), (rows * cols) as usize);

        let ids: BTreeSet<u32> = table.as_slice().iter().map(|c| c.id()).collect();
        prop_assert_eq!(ids.len(), table.len());
        prop_assert_eq!(ids.iter().next().copied(), Some(0));
        prop_assert_eq!(ids.iter().next_back().copied(), Some(rows * cols - 1));

        for coordinate in table.as_slice() {
            prop_assert_eq!(
                coordinate.id(),
                coordinate.row() as u32 * cols + coordinate.col() as u32
            );
        }
    }
}

#[test]
fn grids_receive_distinct_identifiers() {
    let mut world = World::new();
    let tactical = world
        .create_grid_and_initialize_coordinates(8, 10, 64)
        .expect("tactical grid");
    let signal = world
        .create_grid_and_initialize_coordinates(8, 4, 64)
        .expect("signal grid");

    assert_ne!(tactical, signal);
    assert_eq!(query::grids(&world).count(), 2);
    assert_eq!(
        query::coordinate_table(&world, signal).map(|table| table.len()),
        Ok(32)
    );
}

#[test]
fn creation_rejects_each_invalid_dimension() {
    let mut world = World::new();

    for (rows, cols, cell_size, name) in [(0, 4, 8, "rows"), (4, 0, 8, "cols"), (4, 4, 0, "cell_size")] {
        assert_eq!(
            world.create_grid_and_initialize_coordinates(rows, cols, cell_size),
            Err(GridError::InvalidDimension { name, value: 0 })
        );
    }

    assert_eq!(query::grids(&world).count(), 0);
}

#[test]
fn reinitializing_coordinates_is_rejected() {
    let mut world = World::new();
    let grid = world
        .create_grid_and_initialize_coordinates(3, 3, 8)
        .expect("grid created");

    assert_eq!(
        world.initialize_coordinates(grid, 3, 3),
        Err(GridError::CoordinatesAlreadyInitialized { grid })
    );
    assert_eq!(
        query::coordinate_table(&world, grid).map(|table| table.len()),
        Ok(9)
    );
}

#[test]
fn unknown_grids_are_reported() {
    let world = World::new();
    let missing = GridId::new(3);

    assert_eq!(
        query::grid_by_id(&world, missing).map(|entry| entry.id()),
        Err(GridError::UnknownGrid { grid: missing })
    );
    assert_eq!(
        query::coordinate_at(&world, missing, 0, 0),
        Err(GridError::UnknownGrid { grid: missing })
    );
}
