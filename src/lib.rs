//! Xenofall engine library.
//!
//! Exposes the map representation, the simulation engine, fight resolution,
//! and the text map format for use by integration tests and the binary
//! entry point.

pub mod engine;
pub mod error;
pub mod map;
pub mod protocol;
pub mod report;
pub mod resolve;

pub use engine::{move_alien, Simulation, DEFAULT_MAX_ROUNDS};
pub use error::SimulationError;
pub use map::{Alien, AlienId, City, Direction, Map, Road};
pub use report::{DestructionRecord, SimulationReport};
pub use resolve::resolve_fight;
