//! Closed enumerations for code mapping.
//!
//! Mapping areas and directions are fixed sets. They are only ever
//! represented as strings at the persistence boundary, where
//! [`FromStr`] rejects anything outside the set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidArgument;

/// Category of codes a group of mappings translates.
///
/// The declaration order is the order areas appear in serialized tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingArea {
    /// Unit of measure codes (e.g. `C62`, `H87`).
    UnitCode,
    /// ISO 4217 currency codes.
    Currency,
}

impl MappingArea {
    /// Every supported mapping area.
    pub const ALL: [MappingArea; 2] = [MappingArea::UnitCode, MappingArea::Currency];

    /// Returns the name used in persisted tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingArea::UnitCode => "unitcode",
            MappingArea::Currency => "currency",
        }
    }
}

impl fmt::Display for MappingArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MappingArea {
    type Err = InvalidArgument;

    /// Parse a persisted area name. Names are matched exactly after trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MappingArea::ALL
            .into_iter()
            .find(|area| area.as_str() == s.trim())
            .ok_or_else(|| InvalidArgument::MappingArea(s.to_string()))
    }
}

/// Which way a translation is applied.
///
/// By convention `Incoming` maps external codes to own codes and
/// `Outgoing` maps own codes to external codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// External code list value to own code.
    Incoming,
    /// Own code to external code list value.
    Outgoing,
}

impl Direction {
    /// Every supported direction.
    pub const ALL: [Direction; 2] = [Direction::Incoming, Direction::Outgoing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s.trim())
            .ok_or_else(|| InvalidArgument::Direction(s.to_string()))
    }
}
