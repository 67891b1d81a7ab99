//! Mapping entries and the per-area mapping table.
//!
//! A [`MappingTable`] keeps one ordered sequence of [`MappingEntry`] values
//! per [`MappingArea`]. Insertion order is lookup priority: the earliest
//! matching entry wins, and duplicates are kept rather than overwritten.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{Direction, MappingArea};

/// One directed translation rule within a mapping area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingEntry {
    /// Direction this rule applies to.
    pub direction: Direction,
    /// Code being translated. Stored with its original casing.
    #[serde(rename = "fromcode")]
    pub from_code: String,
    /// Code returned when `from_code` matches.
    #[serde(rename = "tocode")]
    pub to_code: String,
}

impl MappingEntry {
    pub fn new(
        direction: Direction,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) -> Self {
        Self {
            direction,
            from_code: from_code.into(),
            to_code: to_code.into(),
        }
    }

    /// True if this entry translates `code` in `direction`.
    ///
    /// Directions must be equal; codes compare ASCII case-insensitively.
    pub fn matches(&self, direction: Direction, code: &str) -> bool {
        self.direction == direction && self.from_code.eq_ignore_ascii_case(code)
    }

    /// True if this entry produces `code` in `direction`.
    pub fn matches_target(&self, direction: Direction, code: &str) -> bool {
        self.direction == direction && self.to_code.eq_ignore_ascii_case(code)
    }
}

/// All mapping rules, grouped by area.
///
/// An area that was added to or cleared stays present with a (possibly
/// empty) sequence. Areas never touched are simply absent, which behaves
/// the same as an empty sequence for lookups.
///
/// Deserializing rejects an area key that appears more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    areas: BTreeMap<MappingArea, Vec<MappingEntry>>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the end of an area's sequence.
    pub fn push(&mut self, area: MappingArea, entry: MappingEntry) {
        self.areas.entry(area).or_default().push(entry);
    }

    /// Empty one area. The area remains present with no entries.
    pub fn clear_area(&mut self, area: MappingArea) {
        self.areas.insert(area, Vec::new());
    }

    /// Empty every supported area.
    pub fn clear_all(&mut self) {
        for area in MappingArea::ALL {
            self.clear_area(area);
        }
    }

    /// Entries of an area in insertion order.
    pub fn entries(&self, area: MappingArea) -> &[MappingEntry] {
        self.areas.get(&area).map(Vec::as_slice).unwrap_or_default()
    }

    /// Areas present in the table, in serialization order.
    pub fn areas(&self) -> impl Iterator<Item = MappingArea> + '_ {
        self.areas.keys().copied()
    }

    /// First entry translating `code` in `direction`, if any.
    pub fn find(&self, direction: Direction, area: MappingArea, code: &str) -> Option<&MappingEntry> {
        self.entries(area)
            .iter()
            .find(|entry| entry.matches(direction, code))
    }

    /// First entry producing `code` in `direction`, if any.
    pub fn find_reverse(
        &self,
        direction: Direction,
        area: MappingArea,
        code: &str,
    ) -> Option<&MappingEntry> {
        self.entries(area)
            .iter()
            .find(|entry| entry.matches_target(direction, code))
    }

    /// Total number of entries across all areas.
    pub fn len(&self) -> usize {
        self.areas.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'de> Deserialize<'de> for MappingTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = MappingTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from mapping area to mapping entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut areas = BTreeMap::new();
                while let Some(area) = map.next_key::<MappingArea>()? {
                    if areas.contains_key(&area) {
                        return Err(de::Error::custom(format_args!(
                            "duplicate mapping area `{area}`"
                        )));
                    }
                    let entries: Vec<MappingEntry> = map.next_value()?;
                    areas.insert(area, entries);
                }
                Ok(MappingTable { areas })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
