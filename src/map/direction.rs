//! Cardinal travel directions.
//!
//! Every city has exactly four road slots, one per direction, indexed in a
//! fixed order (North=0, South=1, East=2, West=3). An empty slot is
//! represented by `Option::None` at the call sites, never by a direction
//! variant, so "no direction" cannot be mistaken for a travelable one.

/// The number of road slots per city.
pub const DIRECTION_COUNT: usize = 4;

/// A cardinal direction of travel between two cities.
///
/// The `#[repr(u8)]` attribute fixes the discriminants to the road-slot
/// indices used throughout the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

/// All direction variants in slot-index order.
pub const ALL_DIRECTIONS: [Direction; DIRECTION_COUNT] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    /// Returns the direction that points back along this one.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns the road-slot index for this direction.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the direction for a road-slot index, or `None` if the index
    /// is out of range.
    pub const fn from_index(i: usize) -> Option<Direction> {
        match i {
            0 => Some(Direction::North),
            1 => Some(Direction::South),
            2 => Some(Direction::East),
            3 => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the lower-case name used in the text map format.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Parses a direction from its text map name (case insensitive,
    /// surrounding whitespace ignored).
    pub fn from_name(s: &str) -> Option<Direction> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            _ => None,
        }
    }
}
