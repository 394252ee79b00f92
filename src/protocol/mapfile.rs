//! The text map format.
//!
//! One city per line: the city name followed by zero or more
//! `<direction>=<neighbor>` tokens separated by whitespace, directions being
//! `north`, `south`, `east`, `west` (case insensitive). Cities are created
//! on first mention, and every declared road gets its reciprocal installed
//! on the neighbor, so a parsed map always satisfies the pairing invariant.
//!
//! ```text
//! Foo north=Bar west=Baz
//! Bar south=Foo
//! ```

use crate::map::{Direction, Map, Road, ALL_DIRECTIONS};

/// Errors that can occur while parsing the text map format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: invalid road token '{token}', expected <direction>=<city>")]
    InvalidRoadToken { line: usize, token: String },

    #[error("line {line}: unknown direction '{name}'")]
    UnknownDirection { line: usize, name: String },

    #[error("line {line}: road to an unnamed city")]
    EmptyDestination { line: usize },
}

/// Parses a whole map file. Blank lines are skipped; city insertion order
/// follows first mention, which is what the placement index uses.
pub fn parse_map(input: &str) -> Result<Map, ParseError> {
    let mut map = Map::new();
    for (i, line) in input.lines().enumerate() {
        parse_line(&mut map, line, i + 1)?;
    }
    Ok(map)
}

/// Parses one line of the map format into `map`.
pub fn parse_line(map: &mut Map, line: &str, line_no: usize) -> Result<(), ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(());
    };
    map.city_or_insert(name);

    for token in tokens {
        let Some((dir_str, dest)) = token.split_once('=') else {
            return Err(ParseError::InvalidRoadToken {
                line: line_no,
                token: token.to_string(),
            });
        };
        let direction =
            Direction::from_name(dir_str).ok_or_else(|| ParseError::UnknownDirection {
                line: line_no,
                name: dir_str.to_string(),
            })?;
        let dest = dest.trim();
        if dest.is_empty() {
            return Err(ParseError::EmptyDestination { line: line_no });
        }

        // Forward road plus its reciprocal on the neighbor.
        map.city_or_insert(dest)
            .add_road(Road::new(dest, direction.opposite(), name));
        map.city_or_insert(name)
            .add_road(Road::new(name, direction, dest));
    }
    Ok(())
}

/// Formats the surviving map back into the text format: one line per
/// non-destroyed city in insertion order, listing only still-available
/// roads.
pub fn format_map(map: &Map) -> String {
    let mut out = String::new();
    for name in map.city_names() {
        let Ok(city) = map.city(name) else {
            continue;
        };
        if city.is_destroyed() {
            continue;
        }
        out.push_str(name);
        for direction in ALL_DIRECTIONS {
            if let Some(road) = city.road(direction) {
                if road.is_available() {
                    out.push(' ');
                    out.push_str(direction.name());
                    out.push('=');
                    out.push_str(road.destination());
                }
            }
        }
        out.push('\n');
    }
    out
}
