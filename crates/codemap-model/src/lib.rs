//! Data model for translating between own codes and external code lists.
//!
//! - [`MappingArea`] and [`Direction`] are closed enumerations.
//! - [`MappingEntry`] is one directed translation rule.
//! - [`MappingTable`] groups entries per area in insertion order.

pub mod enums;
pub mod error;
pub mod mapping;

pub use enums::{Direction, MappingArea};
pub use error::InvalidArgument;
pub use mapping::{MappingEntry, MappingTable};
