//! Directed roads between cities.
//!
//! Roads are created in reciprocal pairs by the map loader: a road A->B in
//! direction D always has a partner B->A in the opposite of D. Each half of
//! the pair is severed individually; availability only ever transitions from
//! true to false.

use super::direction::Direction;
use crate::error::SimulationError;

/// A directed edge from one city to another in a fixed cardinal direction.
///
/// Cities are referenced by name, the sole graph identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Road {
    origin: String,
    direction: Direction,
    destination: String,
    available: bool,
}

impl Road {
    /// Creates an available road from `origin` to `destination`.
    pub fn new(origin: impl Into<String>, direction: Direction, destination: impl Into<String>) -> Self {
        Road {
            origin: origin.into(),
            direction,
            destination: destination.into(),
            available: true,
        }
    }

    /// Returns the name of the city this road starts from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the name of the city this road leads to.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Returns the direction of travel, origin to destination.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction of the reciprocal road on the destination city.
    pub fn opposite_direction(&self) -> Direction {
        self.direction.opposite()
    }

    /// Returns true if the road has not been severed.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Severs the road. Destroying an already-severed road is an error, not
    /// a no-op; the transition is one-way.
    pub fn destroy(&mut self) -> Result<(), SimulationError> {
        if !self.available {
            return Err(SimulationError::AlreadyDestroyed {
                origin: self.origin.clone(),
                destination: self.destination.clone(),
            });
        }
        self.available = false;
        Ok(())
    }
}
