//! Run reporting types.
//!
//! The engine returns a report rather than printing: one destruction record
//! per alien casualty, tagged with the round it happened in, plus the final
//! accounting. The binary renders these as text or JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::map::AlienId;

/// Announcement of a city destroyed by a fight between two aliens.
///
/// A fight with more than two participants emits one record per victim,
/// each pairing the triggering alien with one other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestructionRecord {
    pub round: u32,
    pub city: String,
    pub attacker: AlienId,
    pub victim: AlienId,
}

impl fmt::Display for DestructionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has been destroyed by alien {} and alien {}!",
            self.city, self.attacker, self.victim
        )
    }
}

/// Final accounting of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Completed rounds.
    pub rounds: u32,
    /// Aliens still alive at termination.
    pub aliens_left: usize,
    /// True if the run ended by hitting the round cap rather than by
    /// running out of aliens.
    pub round_cap_reached: bool,
    /// Every destruction announcement, in emission order.
    pub records: Vec<DestructionRecord>,
}
