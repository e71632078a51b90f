//! Immutable mapping from grid coordinates to the actors standing on them.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use tactical_grid_core::{ActorId, GridCoordinate, GridError};

/// Persistent snapshot of which actors occupy which coordinates.
///
/// A coordinate absent from the map is unoccupied; the map never stores an
/// empty actor set. Every operation that changes placement returns a new map
/// and leaves `self` untouched, so readers holding an older snapshot keep a
/// consistent view while the single writer swaps in the result.
///
/// Keys are not checked against any coordinate table. Use
/// `find_actor_grid_position` from the tactical system when the grid of a
/// coordinate matters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridActorMap {
    entries: BTreeMap<GridCoordinate, BTreeSet<ActorId>>,
}

impl GridActorMap {
    /// Creates a map with no occupied coordinates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from explicit entries, rejecting empty actor sets.
    ///
    /// An empty set is never normalized to "absent": the caller asked for
    /// something the map cannot represent.
    pub fn from_entries<I>(entries: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (GridCoordinate, BTreeSet<ActorId>)>,
    {
        let mut map = BTreeMap::new();
        for (coordinate, actors) in entries {
            if actors.is_empty() {
                return Err(GridError::EmptyActorSet { coordinate });
            }
            let _ = map.insert(coordinate, actors);
        }

        Ok(Self { entries: map })
    }

    /// Returns a map where `coordinate` holds exactly `actor`.
    ///
    /// Any actors previously stored at the coordinate are replaced.
    #[must_use]
    pub fn place(&self, coordinate: GridCoordinate, actor: ActorId) -> Self {
        let mut entries = self.entries.clone();
        let _ = entries.insert(coordinate, BTreeSet::from([actor]));
        Self { entries }
    }

    /// Returns a map without `actor` at `coordinate`.
    pub fn remove_actor(
        &self,
        coordinate: GridCoordinate,
        actor: ActorId,
    ) -> Result<Self, GridError> {
        self.ensure_present(coordinate, actor)?;

        let mut entries = self.entries.clone();
        detach(&mut entries, coordinate, actor);
        Ok(Self { entries })
    }

    /// Returns a map with every actor at `coordinate` removed.
    pub fn remove_all_actors(&self, coordinate: GridCoordinate) -> Result<Self, GridError> {
        if !self.entries.contains_key(&coordinate) {
            return Err(GridError::NoActorAtPosition { coordinate });
        }

        let mut entries = self.entries.clone();
        let _ = entries.remove(&coordinate);
        Ok(Self { entries })
    }

    /// Returns a map where `actor` has moved from `from` to `to`.
    ///
    /// Unlike [`GridActorMap::place`], the actor joins whoever already stands
    /// at `to`. Moving onto the same coordinate leaves the actor in place.
    pub fn move_actor(
        &self,
        actor: ActorId,
        from: GridCoordinate,
        to: GridCoordinate,
    ) -> Result<Self, GridError> {
        self.ensure_present(from, actor)?;

        let mut entries = self.entries.clone();
        detach(&mut entries, from, actor);
        let _ = entries.entry(to).or_default().insert(actor);
        Ok(Self { entries })
    }

    /// Reports whether any actor stands at `coordinate`.
    #[must_use]
    pub fn is_occupied(&self, coordinate: GridCoordinate) -> bool {
        self.entries
            .get(&coordinate)
            .is_some_and(|actors| !actors.is_empty())
    }

    /// Every coordinate holding at least one actor.
    #[must_use]
    pub fn occupied_coordinates(&self) -> BTreeSet<GridCoordinate> {
        self.entries.keys().copied().collect()
    }

    /// Every actor placed anywhere on the map.
    #[must_use]
    pub fn all_actor_ids(&self) -> BTreeSet<ActorId> {
        self.entries.values().flatten().copied().collect()
    }

    /// First coordinate, in ascending coordinate order, that holds `actor`.
    ///
    /// The map does not stop an actor from being placed at several
    /// coordinates; when that happens only the lowest one is reported.
    #[must_use]
    pub fn find_actor_position(&self, actor: ActorId) -> Option<GridCoordinate> {
        self.entries
            .iter()
            .find(|(_, actors)| actors.contains(&actor))
            .map(|(coordinate, _)| *coordinate)
    }

    /// Actors standing at `coordinate`, if any.
    #[must_use]
    pub fn actors_at(&self, coordinate: GridCoordinate) -> Option<&BTreeSet<ActorId>> {
        self.entries.get(&coordinate)
    }

    /// Iterator over occupied coordinates and their actors in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&GridCoordinate, &BTreeSet<ActorId>)> {
        self.entries.iter()
    }

    /// Number of occupied coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no coordinate is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_present(&self, coordinate: GridCoordinate, actor: ActorId) -> Result<(), GridError> {
        let actors = self
            .entries
            .get(&coordinate)
            .ok_or(GridError::NoActorAtPosition { coordinate })?;
        if !actors.contains(&actor) {
            return Err(GridError::ActorNotFound { actor, coordinate });
        }

        Ok(())
    }
}

fn detach(
    entries: &mut BTreeMap<GridCoordinate, BTreeSet<ActorId>>,
    coordinate: GridCoordinate,
    actor: ActorId,
) {
    let now_empty = match entries.get_mut(&coordinate) {
        Some(actors) => {
            let _ = actors.remove(&actor);
            actors.is_empty()
        }
        None => false,
    };

    if now_empty {
        let _ = entries.remove(&coordinate);
    }
}

impl fmt::Display for GridActorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GridActorMap({{")?;
        for (index, (coordinate, actors)) in self.entries.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            let ids: Vec<String> = actors.iter().map(ToString::to_string).collect();
            write!(f, "{coordinate}: [{}]", ids.join(", "))?;
        }
        write!(f, "}})")
    }
}
