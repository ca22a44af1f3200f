//! Shared types for the forklift checklist system.
//!
//! - [`CellValue`]: one typed cell of the backing table
//! - [`Summary`], [`LatestView`]: the query endpoint's success payload
//! - [`ErrorBody`], [`EmptyTableBody`]: the endpoint's error-shaped payloads
//! - [`QueryResponse`]: any of the above, as seen on the wire
//! - [`format`]: pt-BR date and time rendering

pub mod cell;
pub mod format;
pub mod types;

pub use cell::CellValue;
pub use types::{EmptyObject, EmptyTableBody, ErrorBody, LatestView, QueryResponse, Summary};
