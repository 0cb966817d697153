//! Storage layer: the regulation table, read from CSV once at startup.

mod error;
pub use error::StoreError;

mod table;
pub use table::{REQUIRED_COLUMNS, RegulationStore};
