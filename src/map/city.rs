//! City nodes of the invasion map.
//!
//! A city holds up to one road per cardinal direction in a fixed-size slot
//! array, the set of aliens currently standing in it, and a destroyed flag.
//! Destroyed cities stay in the map; the flag, not removal, marks them.

use std::collections::BTreeSet;

use super::alien::{Alien, AlienId};
use super::direction::{Direction, DIRECTION_COUNT};
use super::road::Road;
use crate::error::SimulationError;

/// A map node with four road slots and a set of resident aliens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    name: String,
    roads: [Option<Road>; DIRECTION_COUNT],
    aliens: BTreeSet<AlienId>,
    destroyed: bool,
}

impl City {
    /// Creates an intact city with no roads and no aliens.
    pub fn new(name: impl Into<String>) -> Self {
        City {
            name: name.into(),
            roads: [None, None, None, None],
            aliens: BTreeSet::new(),
            destroyed: false,
        }
    }

    /// Returns the city's name, its sole graph identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the road in the given direction, or `None` for an empty slot.
    pub fn road(&self, direction: Direction) -> Option<&Road> {
        self.roads[direction.index()].as_ref()
    }

    /// Returns the road at a raw slot index, or `None` for an empty slot.
    /// An out-of-range index is an `InvalidDirection` error, an empty slot
    /// is not.
    pub fn road_at(&self, index: usize) -> Result<Option<&Road>, SimulationError> {
        if index >= DIRECTION_COUNT {
            return Err(SimulationError::InvalidDirection(index));
        }
        Ok(self.roads[index].as_ref())
    }

    /// Places a road into the slot matching its direction. Any road already
    /// in that slot is overwritten; last write wins.
    pub fn add_road(&mut self, road: Road) {
        let index = road.direction().index();
        self.roads[index] = Some(road);
    }

    /// Severs the road in the given direction. Errors if the slot is empty
    /// or the road is already severed.
    pub fn destroy_road(&mut self, direction: Direction) -> Result<(), SimulationError> {
        match self.roads[direction.index()].as_mut() {
            Some(road) => road.destroy(),
            None => Err(SimulationError::MissingReciprocalRoad {
                city: self.name.clone(),
                direction: direction.name(),
            }),
        }
    }

    /// Severs every occupied road slot. Already-severed roads are left
    /// alone; this is used when the city itself is being destroyed.
    pub fn destroy_all_roads(&mut self) {
        for slot in self.roads.iter_mut() {
            if let Some(road) = slot {
                if road.is_available() {
                    // A freshly-validated fight cannot have severed these
                    // yet, so destroy() cannot fail here.
                    let _ = road.destroy();
                }
            }
        }
    }

    /// Counts the road slots holding a still-available road.
    pub fn available_roads(&self) -> usize {
        self.roads
            .iter()
            .filter(|slot| slot.as_ref().is_some_and(Road::is_available))
            .count()
    }

    /// Registers a living alien as standing in this city. Adding a dead
    /// alien is an error; re-adding a present id is a no-op.
    pub fn add_alien(&mut self, alien: &Alien) -> Result<(), SimulationError> {
        if !alien.is_alive() {
            return Err(SimulationError::AlienNotAlive(alien.id()));
        }
        self.aliens.insert(alien.id());
        Ok(())
    }

    /// Removes an alien from the resident set. Errors if it isn't here.
    pub fn remove_alien(&mut self, id: AlienId) -> Result<(), SimulationError> {
        if !self.aliens.remove(&id) {
            return Err(SimulationError::AlienNotFound(id));
        }
        Ok(())
    }

    /// Returns true if the given alien is standing in this city.
    pub fn has_alien(&self, id: AlienId) -> bool {
        self.aliens.contains(&id)
    }

    /// Returns the resident alien ids in ascending order.
    pub fn aliens(&self) -> impl Iterator<Item = AlienId> + '_ {
        self.aliens.iter().copied()
    }

    /// Returns the number of aliens currently in the city.
    pub fn alien_count(&self) -> usize {
        self.aliens.len()
    }

    /// Returns true if more than one alien shares the city. Two is enough;
    /// the rule does not distinguish two from more.
    pub fn has_fight(&self) -> bool {
        self.alien_count() > 1
    }

    /// Returns true if the city has been destroyed by a fight.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Marks the city destroyed and empties its alien set. Callers must
    /// have severed the roads and killed the residents first; this only
    /// flips the terminal state.
    pub(crate) fn mark_destroyed(&mut self) {
        self.aliens.clear();
        self.destroyed = true;
    }
}
