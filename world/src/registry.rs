//! Authoritative grid registry and identifier allocation.

use std::collections::BTreeMap;

use glam::Vec2;
use tactical_grid_core::{GridError, GridId, TacticalGrid};

/// Registered grid together with its world-space placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridEntry {
    id: GridId,
    grid: TacticalGrid,
    origin: Vec2,
}

impl GridEntry {
    /// Identifier allocated by the world for the grid.
    #[must_use]
    pub const fn id(&self) -> GridId {
        self.id
    }

    /// Geometry registered for the grid.
    #[must_use]
    pub const fn grid(&self) -> TacticalGrid {
        self.grid
    }

    /// World-space offset applied to every cell of the grid.
    ///
    /// The origin is independent of the grid's internal coordinate system, so
    /// a grid attached to a tower can follow it around the world.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }
}

/// Registry that stores grids and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct GridRegistry {
    entries: BTreeMap<GridId, GridEntry>,
    next_grid_id: Option<GridId>,
}

impl GridRegistry {
    /// Creates an empty grid registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_grid_id: Some(GridId::new(0)),
        }
    }

    /// Stores the grid at the world origin and returns its fresh identifier.
    ///
    /// Identifiers are never reused; once `u32::MAX` has been handed out every
    /// further registration fails with [`GridError::GridIdsExhausted`].
    pub(crate) fn register(&mut self, grid: TacticalGrid) -> Result<GridId, GridError> {
        let id = self.next_grid_id.ok_or(GridError::GridIdsExhausted)?;
        self.next_grid_id = id.get().checked_add(1).map(GridId::new);
        let _ = self.entries.insert(
            id,
            GridEntry {
                id,
                grid,
                origin: Vec2::ZERO,
            },
        );
        Ok(id)
    }

    pub(crate) fn get(&self, id: GridId) -> Option<&GridEntry> {
        self.entries.get(&id)
    }

    /// Moves the grid to a new origin, returning `false` when it is unknown.
    pub(crate) fn set_origin(&mut self, id: GridId, origin: Vec2) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.origin = origin;
                true
            }
            None => false,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &GridEntry> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_empty_with_zero_identifier() {
        let registry = GridRegistry::new();
        assert!(registry.entries.is_empty());
        assert_eq!(registry.next_grid_id, Some(GridId::new(0)));
    }

    #[test]
    fn register_allocates_sequential_identifiers() {
        let mut registry = GridRegistry::new();
        let grid = TacticalGrid::new(2, 2, 16).expect("valid grid");

        let first = registry.register(grid).expect("identifier available");
        let second = registry.register(grid).expect("identifier available");

        assert_eq!(first, GridId::new(0));
        assert_eq!(second, GridId::new(1));
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn register_refuses_once_identifiers_run_out() {
        let mut registry = GridRegistry::new();
        let grid = TacticalGrid::new(2, 2, 16).expect("valid grid");
        registry.next_grid_id = Some(GridId::new(u32::MAX));

        assert_eq!(registry.register(grid), Ok(GridId::new(u32::MAX)));
        assert_eq!(registry.register(grid), Err(GridError::GridIdsExhausted));
        assert_eq!(registry.iter().count(), 1);
        assert_eq!(
            registry.get(GridId::new(u32::MAX)).map(GridEntry::id),
            Some(GridId::new(u32::MAX))
        );
    }

    #[test]
    fn registered_grids_start_at_world_origin() {
        let mut registry = GridRegistry::new();
        let grid = TacticalGrid::new(3, 4, 32).expect("valid grid");
        let id = registry.register(grid).expect("identifier available");

        let entry = registry.get(id).expect("entry exists");
        assert_eq!(entry.id(), id);
        assert_eq!(entry.grid(), grid);
        assert_eq!(entry.origin(), Vec2::ZERO);
    }

    #[test]
    fn set_origin_reports_unknown_grids() {
        let mut registry = GridRegistry::new();
        let grid = TacticalGrid::new(3, 4, 32).expect("valid grid");
        let id = registry.register(grid).expect("identifier available");

        assert!(registry.set_origin(id, Vec2::new(10.0, 20.0)));
        assert!(!registry.set_origin(GridId::new(9), Vec2::ONE));
        assert_eq!(
            registry.get(id).map(GridEntry::origin),
            Some(Vec2::new(10.0, 20.0))
        );
    }
}
