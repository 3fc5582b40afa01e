//! Database table operations

mod saved_table;

pub use saved_table::SavedTable;
