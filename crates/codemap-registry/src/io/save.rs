//! Table saving operations.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use codemap_model::MappingTable;

use crate::codec::to_json;
use crate::error::{RegistryError, Result};
use crate::options::PersistOptions;

/// Save a table as JSON.
///
/// Writes a sibling `<name>.tmp` file first and renames it over `path`, so a
/// failed save never leaves a half-written target behind.
pub fn save_table(table: &MappingTable, path: &Path, options: &PersistOptions) -> Result<()> {
    let text = to_json(table, options.indent)?;
    write_atomic(path, text.as_bytes(), options)?;

    tracing::info!(
        path = %path.display(),
        entries = table.len(),
        "Saved mapping table"
    );
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_atomic(path: &Path, bytes: &[u8], options: &PersistOptions) -> Result<()> {
    if options.create_parent_dirs
        && let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| RegistryError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    if let Err(error) = write_temp(&temp_path, bytes, options.sync_on_write) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(RegistryError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source: e,
        });
    }
    Ok(())
}

fn write_temp(temp_path: &Path, bytes: &[u8], sync: bool) -> Result<()> {
    // The handle is closed when this function returns, on every path.
    let mut file = File::create(temp_path).map_err(|e| RegistryError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| RegistryError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    if sync {
        file.sync_all().map_err(|e| RegistryError::Io {
            operation: "sync",
            path: temp_path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use codemap_model::{Direction, MappingArea, MappingEntry};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_save_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mappings.json");

        let mut table = MappingTable::new();
        table.push(
            MappingArea::UnitCode,
            MappingEntry::new(Direction::Outgoing, "STK", "C62"),
        );

        save_table(&table, &path, &PersistOptions::default()).unwrap();

        assert!(path.exists());
        assert!(!temp_path_for(&path).exists());
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"unitcode\""));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("mappings.json");

        save_table(&MappingTable::new(), &path, &PersistOptions::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_without_parent_dirs_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("mappings.json");
        let options = PersistOptions::default().with_create_parent_dirs(false);

        let result = save_table(&MappingTable::new(), &path, &options);
        assert!(matches!(
            result,
            Err(RegistryError::Io {
                operation: "create",
                ..
            })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        let temp = temp_path_for(Path::new("/data/mappings.json"));
        assert_eq!(temp, PathBuf::from("/data/mappings.json.tmp"));
    }
}
