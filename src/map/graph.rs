//! The invasion map aggregate.
//!
//! Owns every city (keyed by name) and every placed alien (keyed by id),
//! plus an insertion-ordered list of city names used only to draw uniform
//! random cities during placement. The container persists for the whole
//! run; destruction is recorded in flags, never by removal of cities.

use std::collections::{BTreeMap, HashMap};

use super::alien::{Alien, AlienId};
use super::city::City;
use crate::error::SimulationError;

/// The full city/road graph and the aliens placed on it.
#[derive(Debug, Clone, Default)]
pub struct Map {
    cities: HashMap<String, City>,
    aliens: BTreeMap<AlienId, Alien>,
    /// Secondary index for placement only; name is the real identity.
    city_order: Vec<String>,
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Self {
        Map::default()
    }

    /// Looks up a city by name.
    pub fn city(&self, name: &str) -> Result<&City, SimulationError> {
        self.cities
            .get(name)
            .ok_or_else(|| SimulationError::CityNotFound(name.to_string()))
    }

    /// Looks up a city by name for mutation.
    pub fn city_mut(&mut self, name: &str) -> Result<&mut City, SimulationError> {
        self.cities
            .get_mut(name)
            .ok_or_else(|| SimulationError::CityNotFound(name.to_string()))
    }

    /// Returns true if a city with this name exists.
    pub fn has_city(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    /// Inserts a city, registering its name in the placement index on first
    /// insertion. Re-inserting an existing name replaces the city in place.
    pub fn insert_city(&mut self, city: City) {
        if !self.cities.contains_key(city.name()) {
            self.city_order.push(city.name().to_string());
        }
        self.cities.insert(city.name().to_string(), city);
    }

    /// Returns the city with this name, creating an intact empty one (and
    /// registering it in the placement index) if it doesn't exist yet.
    pub fn city_or_insert(&mut self, name: &str) -> &mut City {
        use std::collections::hash_map::Entry;
        match self.cities.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.city_order.push(name.to_string());
                entry.insert(City::new(name))
            }
        }
    }

    /// Returns the number of cities, destroyed ones included.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Returns the city name at a placement-index position.
    pub fn city_name_at(&self, index: usize) -> Option<&str> {
        self.city_order.get(index).map(String::as_str)
    }

    /// Returns city names in insertion order.
    pub fn city_names(&self) -> impl Iterator<Item = &str> {
        self.city_order.iter().map(String::as_str)
    }

    /// Registers an alien in a city, keeping the alien's recorded position
    /// and the city's resident set consistent.
    pub fn place_alien(&mut self, mut alien: Alien, city_name: &str) -> Result<(), SimulationError> {
        alien.set_position(city_name)?;
        let city = self.city_mut(city_name)?;
        city.add_alien(&alien)?;
        self.aliens.insert(alien.id(), alien);
        Ok(())
    }

    /// Registers an alien without standing it in any city. The engine
    /// treats a registered-but-unplaced alien as a fatal setup error.
    pub fn register_alien(&mut self, alien: Alien) {
        self.aliens.insert(alien.id(), alien);
    }

    /// Looks up an alien by id.
    pub fn alien(&self, id: AlienId) -> Result<&Alien, SimulationError> {
        self.aliens
            .get(&id)
            .ok_or(SimulationError::AlienNotFound(id))
    }

    /// Looks up an alien by id for mutation.
    pub fn alien_mut(&mut self, id: AlienId) -> Result<&mut Alien, SimulationError> {
        self.aliens
            .get_mut(&id)
            .ok_or(SimulationError::AlienNotFound(id))
    }

    /// Returns the ids of all registered aliens in ascending order.
    pub fn alien_ids(&self) -> Vec<AlienId> {
        self.aliens.keys().copied().collect()
    }

    /// Returns the living aliens in ascending id order.
    pub fn living_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.values().filter(|a| a.is_alive())
    }

    /// Returns the number of registered aliens.
    pub fn alien_count(&self) -> usize {
        self.aliens.len()
    }

    /// Kills an alien and removes it from the collection and from its
    /// city's resident set. Errors if the id is unknown or the alien is
    /// already dead.
    pub fn kill_alien(&mut self, id: AlienId) -> Result<(), SimulationError> {
        let alien = self
            .aliens
            .get_mut(&id)
            .ok_or(SimulationError::AlienNotFound(id))?;
        alien.kill()?;
        let position = alien.position().map(str::to_string);
        self.aliens.remove(&id);
        if let Some(name) = position {
            if let Some(city) = self.cities.get_mut(&name) {
                if city.has_alien(id) {
                    city.remove_alien(id)?;
                }
            }
        }
        Ok(())
    }

    /// Kills every registered alien. Any single failure aborts the batch.
    pub fn kill_all(&mut self) -> Result<(), SimulationError> {
        for id in self.alien_ids() {
            self.kill_alien(id)?;
        }
        Ok(())
    }
}
