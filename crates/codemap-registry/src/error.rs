//! Registry error types.
//!
//! Lookup misses are not errors: an unmapped code passes through unchanged.
//! Everything here is raised to the caller and never logged and swallowed.

use std::path::PathBuf;

use codemap_model::InvalidArgument;
use thiserror::Error;

/// Registry operation error.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Mapping area or direction name outside the supported set.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not be moved over the target.
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text is not a valid mapping table.
    #[error("Failed to parse mapping table")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize mapping table")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// True for failures caused by the filesystem rather than by the input.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::AtomicWriteFailed { .. })
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InvalidArgument(InvalidArgument::MappingArea(_)) => {
                Some("Use one of the supported mapping areas: unitcode, currency.".into())
            }
            Self::InvalidArgument(InvalidArgument::Direction(_)) => {
                Some("Use one of the supported directions: incoming, outgoing.".into())
            }
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::Parse { .. } => Some(
                "Make sure the file was written by this registry and has not been edited by hand."
                    .into(),
            ),
            Self::Serialization { .. } => None,
        }
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
