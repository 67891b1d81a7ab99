//! Table loading operations.

use std::fs;
use std::path::Path;

use codemap_model::MappingTable;

use crate::codec::from_json;
use crate::error::{RegistryError, Result};

/// Load a table from a JSON file.
pub fn load_table(path: &Path) -> Result<MappingTable> {
    let text = fs::read_to_string(path).map_err(|e| RegistryError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let table = from_json(&text)?;
    tracing::info!(
        path = %path.display(),
        entries = table.len(),
        "Loaded mapping table"
    );
    Ok(table)
}
