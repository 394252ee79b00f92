//! Map representation and invasion-state types.
//!
//! Contains the core data structures for directions, roads, cities, aliens,
//! and the overall map graph.

pub mod alien;
pub mod city;
pub mod direction;
pub mod graph;
pub mod road;

pub use alien::{Alien, AlienId};
pub use city::City;
pub use direction::{Direction, ALL_DIRECTIONS, DIRECTION_COUNT};
pub use graph::Map;
pub use road::Road;
