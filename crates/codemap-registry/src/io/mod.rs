//! File I/O for mapping tables.

mod load;
mod save;

pub use load::load_table;
pub use save::save_table;
