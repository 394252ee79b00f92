//! Text format handling.
//!
//! This module implements parsing and serialization for the line-oriented
//! map format consumed by the binary: city declarations with their
//! `<direction>=<neighbor>` road tokens.

pub mod mapfile;

pub use mapfile::{format_map, parse_line, parse_map, ParseError};
