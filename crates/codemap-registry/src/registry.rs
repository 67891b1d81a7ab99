//! The shared mapping registry.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use codemap_model::{Direction, MappingArea, MappingEntry, MappingTable};

use crate::codec::{from_json, to_json};
use crate::error::Result;
use crate::io::{load_table, save_table};
use crate::options::PersistOptions;

/// Thread-safe registry of code mappings.
///
/// Construct one registry during setup and pass it to every call site that
/// translates codes. Clones share the same table; separately constructed
/// registries are isolated from each other.
///
/// Lookups never fail on a miss: a code with no matching rule is returned
/// unchanged, so an unconfigured area behaves as identity translation.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    table: Arc<RwLock<MappingTable>>,
    options: PersistOptions,
}

impl MappingRegistry {
    /// Create an empty registry with default persistence options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given persistence options.
    pub fn with_options(options: PersistOptions) -> Self {
        Self {
            table: Arc::default(),
            options,
        }
    }

    pub fn options(&self) -> &PersistOptions {
        &self.options
    }

    // A panic while holding the lock cannot leave a half-appended sequence
    // behind, so a poisoned table is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, MappingTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MappingTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a mapping rule to an area.
    ///
    /// No uniqueness check is made. When several rules share a direction and
    /// source code, the one added first wins.
    pub fn add_mapping(
        &self,
        area: MappingArea,
        direction: Direction,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) {
        let entry = MappingEntry::new(direction, from_code, to_code);
        tracing::debug!(
            %area,
            %direction,
            from_code = %entry.from_code,
            to_code = %entry.to_code,
            "Adding mapping"
        );
        self.write().push(area, entry);
    }

    /// Add a mapping with area and direction given by name.
    ///
    /// Both names are validated before the table is touched.
    pub fn add_named_mapping(
        &self,
        area: &str,
        direction: &str,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) -> Result<()> {
        let area: MappingArea = area.parse()?;
        let direction: Direction = direction.parse()?;
        self.add_mapping(area, direction, from_code, to_code);
        Ok(())
    }

    pub fn add_unit_code_mapping(
        &self,
        direction: Direction,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) {
        self.add_mapping(MappingArea::UnitCode, direction, from_code, to_code);
    }

    pub fn add_unit_code_mapping_incoming(
        &self,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) {
        self.add_unit_code_mapping(Direction::Incoming, from_code, to_code);
    }

    pub fn add_unit_code_mapping_outgoing(
        &self,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) {
        self.add_unit_code_mapping(Direction::Outgoing, from_code, to_code);
    }

    pub fn add_currency_mapping(
        &self,
        direction: Direction,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) {
        self.add_mapping(MappingArea::Currency, direction, from_code, to_code);
    }

    pub fn add_currency_mapping_incoming(
        &self,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) {
        self.add_currency_mapping(Direction::Incoming, from_code, to_code);
    }

    pub fn add_currency_mapping_outgoing(
        &self,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
    ) {
        self.add_currency_mapping(Direction::Outgoing, from_code, to_code);
    }

    /// Remove every rule of one area. The area stays present, empty.
    pub fn clear_mapping(&self, area: MappingArea) {
        tracing::debug!(%area, "Clearing mappings");
        self.write().clear_area(area);
    }

    pub fn clear_named_mapping(&self, area: &str) -> Result<()> {
        let area: MappingArea = area.parse()?;
        self.clear_mapping(area);
        Ok(())
    }

    /// Remove every rule of every area.
    pub fn clear_all_mappings(&self) {
        tracing::debug!("Clearing all mappings");
        self.write().clear_all();
    }

    /// Translate `from_code` using the first matching rule.
    ///
    /// Codes compare ASCII case-insensitively. Without a match the input is
    /// returned unchanged.
    ///
    /// Lookups only read the table: an area that was never added to or
    /// cleared stays absent from [`snapshot`](Self::snapshot) and
    /// [`serialize`](Self::serialize) output.
    pub fn lookup(&self, direction: Direction, area: MappingArea, from_code: &str) -> String {
        let table = self.read();
        match table.find(direction, area, from_code) {
            Some(entry) => entry.to_code.clone(),
            None => {
                tracing::trace!(%area, %direction, from_code, "No mapping, passing code through");
                from_code.to_string()
            }
        }
    }

    /// [`lookup`](Self::lookup) with area and direction given by name.
    pub fn lookup_named(&self, direction: &str, area: &str, from_code: &str) -> Result<String> {
        let area: MappingArea = area.parse()?;
        let direction: Direction = direction.parse()?;
        Ok(self.lookup(direction, area, from_code))
    }

    pub fn lookup_incoming(&self, area: MappingArea, from_code: &str) -> String {
        self.lookup(Direction::Incoming, area, from_code)
    }

    pub fn lookup_outgoing(&self, area: MappingArea, from_code: &str) -> String {
        self.lookup(Direction::Outgoing, area, from_code)
    }

    pub fn lookup_incoming_unit_code(&self, from_code: &str) -> String {
        self.lookup_incoming(MappingArea::UnitCode, from_code)
    }

    pub fn lookup_outgoing_unit_code(&self, from_code: &str) -> String {
        self.lookup_outgoing(MappingArea::UnitCode, from_code)
    }

    pub fn lookup_incoming_currency(&self, from_code: &str) -> String {
        self.lookup_incoming(MappingArea::Currency, from_code)
    }

    pub fn lookup_outgoing_currency(&self, from_code: &str) -> String {
        self.lookup_outgoing(MappingArea::Currency, from_code)
    }

    /// Find the source code of the first rule producing `to_code`.
    ///
    /// Same matching and pass-through rules as [`lookup`](Self::lookup),
    /// applied to the target side of each rule.
    pub fn reverse_lookup(&self, direction: Direction, area: MappingArea, to_code: &str) -> String {
        let table = self.read();
        table
            .find_reverse(direction, area, to_code)
            .map_or_else(|| to_code.to_string(), |entry| entry.from_code.clone())
    }

    /// Rules of one area in lookup order.
    pub fn entries(&self, area: MappingArea) -> Vec<MappingEntry> {
        self.read().entries(area).to_vec()
    }

    /// Copy of the whole table.
    pub fn snapshot(&self) -> MappingTable {
        self.read().clone()
    }

    /// Number of rules across all areas.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Serialize the table to markup-safe JSON.
    pub fn serialize(&self) -> Result<String> {
        to_json(&self.read(), self.options.indent)
    }

    /// Replace the whole table with one parsed from `text`.
    ///
    /// Nothing changes unless the entire text parses.
    pub fn deserialize(&self, text: &str) -> Result<()> {
        let table = from_json(text).inspect_err(|error| {
            tracing::warn!(%error, "Rejected mapping table");
        })?;
        self.replace(table);
        Ok(())
    }

    /// Write the table to `path`.
    pub fn persist_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let table = self.snapshot();
        save_table(&table, path.as_ref(), &self.options)
    }

    /// Replace the table with the contents of `path`.
    ///
    /// Read and parse failures leave the table unchanged.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let table = load_table(path).inspect_err(|error| {
            tracing::warn!(path = %path.display(), %error, "Rejected mapping file");
        })?;
        self.replace(table);
        Ok(())
    }

    fn replace(&self, table: MappingTable) {
        *self.write() = table;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_table() {
        let registry = MappingRegistry::new();
        let handle = registry.clone();

        handle.add_currency_mapping_outgoing("DM", "DEM");
        assert_eq!(registry.lookup_outgoing_currency("DM"), "DEM");
    }

    #[test]
    fn separate_registries_are_isolated() {
        let first = MappingRegistry::new();
        let second = MappingRegistry::new();

        first.add_currency_mapping_outgoing("DM", "DEM");
        assert_eq!(second.lookup_outgoing_currency("DM"), "DM");
        assert!(second.is_empty());
    }

    #[test]
    fn lookup_preserves_stored_casing() {
        let registry = MappingRegistry::new();
        registry.add_unit_code_mapping_outgoing("Stk", "c62");

        assert_eq!(registry.lookup_outgoing_unit_code("STK"), "c62");
        assert_eq!(registry.entries(MappingArea::UnitCode)[0].from_code, "Stk");
    }

    #[test]
    fn lookup_does_not_create_areas() {
        let registry = MappingRegistry::new();

        assert_eq!(registry.lookup_incoming_currency("EUR"), "EUR");
        assert_eq!(
            registry.reverse_lookup(Direction::Outgoing, MappingArea::UnitCode, "C62"),
            "C62"
        );

        assert_eq!(registry.snapshot().areas().count(), 0);
        assert_eq!(registry.serialize().expect("serialize"), "{}");
    }

    #[test]
    fn serialize_uses_configured_indent() {
        let registry = MappingRegistry::with_options(PersistOptions::new().with_indent(2));
        registry.add_currency_mapping_incoming("EUR", "EUR");

        let text = registry.serialize().expect("serialize");
        assert!(text.starts_with("{\n  \"currency\""));
    }
}
