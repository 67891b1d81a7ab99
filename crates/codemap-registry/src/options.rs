//! Persistence options.

use serde::{Deserialize, Serialize};

/// Configuration for how a registry writes its table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistOptions {
    /// Spaces per indentation level in serialized output.
    pub indent: usize,

    /// Create missing parent directories before writing a file.
    pub create_parent_dirs: bool,

    /// Flush file contents to disk before the final rename.
    pub sync_on_write: bool,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            create_parent_dirs: true,
            sync_on_write: true,
        }
    }
}

impl PersistOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_create_parent_dirs(mut self, enable: bool) -> Self {
        self.create_parent_dirs = enable;
        self
    }

    pub fn with_sync_on_write(mut self, enable: bool) -> Self {
        self.sync_on_write = enable;
        self
    }
}
