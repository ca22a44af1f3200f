//! Backing-table access for checklist submissions.
//!
//! A backing table is a header row plus data rows in submission order,
//! written by an external form. This crate only reads it, except for the
//! seeding helpers the stores expose for tests and demos.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod source;
pub mod table;

pub use error::{Result, SheetStoreError};
pub use memory::InMemorySheetSource;
pub use postgres::PostgresSheetSource;
pub use source::SheetSource;
pub use table::RawTable;
