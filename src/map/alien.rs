//! Alien agents.
//!
//! An alien records where it is standing by city name; the city's resident
//! set is the other half of that fact, and every mutation keeps the two in
//! sync. Once dead an alien is never repositioned.

use crate::error::SimulationError;

/// Identifies an alien; assigned sequentially in placement order.
pub type AlienId = u32;

/// A mobile agent with an identity, a current city, and an alive flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alien {
    id: AlienId,
    position: Option<String>,
    alive: bool,
}

impl Alien {
    /// Creates a living, unplaced alien.
    pub fn new(id: AlienId) -> Self {
        Alien {
            id,
            position: None,
            alive: true,
        }
    }

    /// Returns the alien's id.
    pub fn id(&self) -> AlienId {
        self.id
    }

    /// Returns the name of the city the alien stands in, if placed.
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    /// Returns true if the alien has not been killed.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Records the alien's new city. Moving to the city it already stands
    /// in is an `AlreadyThere` error; repositioning a dead alien is an
    /// `AlreadyDead` error.
    pub fn set_position(&mut self, city: &str) -> Result<(), SimulationError> {
        if !self.alive {
            return Err(SimulationError::AlreadyDead(self.id));
        }
        if self.position.as_deref() == Some(city) {
            return Err(SimulationError::AlreadyThere {
                alien: self.id,
                city: city.to_string(),
            });
        }
        self.position = Some(city.to_string());
        Ok(())
    }

    /// Kills the alien. Killing twice is an error, not idempotent.
    pub fn kill(&mut self) -> Result<(), SimulationError> {
        if !self.alive {
            return Err(SimulationError::AlreadyDead(self.id));
        }
        self.alive = false;
        Ok(())
    }
}
