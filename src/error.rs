//! Simulation error taxonomy.
//!
//! Every internal failure is fatal to the whole run: the engine never
//! retries and never continues past a violated invariant, so each variant
//! here names the invariant that broke.

use crate::map::AlienId;

/// Errors that can occur while mutating the map or running the simulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("couldn't find city '{0}'")]
    CityNotFound(String),

    #[error("couldn't find alien {0}")]
    AlienNotFound(AlienId),

    #[error("invalid direction index {0}")]
    InvalidDirection(usize),

    #[error("city '{city}' has no road slot towards {direction}")]
    MissingReciprocalRoad { city: String, direction: &'static str },

    #[error("alien {0} is not alive")]
    AlienNotAlive(AlienId),

    #[error("alien {0} is already dead")]
    AlreadyDead(AlienId),

    #[error("road from '{origin}' to '{destination}' is already destroyed")]
    AlreadyDestroyed { origin: String, destination: String },

    #[error("alien {alien} is already in city '{city}'")]
    AlreadyThere { alien: AlienId, city: String },

    #[error("road from '{origin}' to '{destination}' is unavailable")]
    RoadUnavailable { origin: String, destination: String },

    #[error("city '{0}' is destroyed")]
    CityDestroyed(String),

    #[error("alien {0} hasn't been placed in any city")]
    UnplacedAlien(AlienId),

    #[error("destination city '{0}' does not exist")]
    DestinationMissing(String),

    #[error("city '{0}' has no available road to move through")]
    NoAvailableRoad(String),
}
