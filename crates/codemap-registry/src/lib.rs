//! Registry translating own codes to external code list values and back.
//!
//! A [`MappingRegistry`] stores user-defined translation rules per mapping
//! area (unit codes, currencies) and direction (incoming, outgoing). Lookups
//! return the first matching rule's target code, or the input unchanged when
//! no rule matches.
//!
//! # Example
//!
//! ```
//! use codemap_registry::{MappingArea, MappingRegistry};
//!
//! let registry = MappingRegistry::new();
//! registry.add_unit_code_mapping_outgoing("STK", "C62");
//!
//! assert_eq!(registry.lookup_outgoing(MappingArea::UnitCode, "stk"), "C62");
//! assert_eq!(registry.lookup_outgoing(MappingArea::UnitCode, "XPP"), "XPP");
//! ```
//!
//! # File Format
//!
//! Tables persist as pretty printed JSON keyed by area name:
//!
//! ```text
//! {
//!     "unitcode": [
//!         {
//!             "direction": "outgoing",
//!             "fromcode": "STK",
//!             "tocode": "C62"
//!         }
//!     ]
//! }
//! ```
//!
//! Characters unsafe in markup are written as `\u00XX` escapes.

mod codec;
mod error;
mod io;
mod options;
mod registry;

pub use codec::{from_json, to_json};
pub use error::{RegistryError, Result};
pub use io::{load_table, save_table};
pub use options::PersistOptions;
pub use registry::MappingRegistry;

pub use codemap_model::{Direction, InvalidArgument, MappingArea, MappingEntry, MappingTable};
