//! Checklist scoring: from backing-table rows to a dashboard summary.
//!
//! - [`normalize_header`] turns column titles into stable keys
//! - [`entries_from_table`] builds most-recent-first [`ChecklistEntry`] values
//! - [`compliance`] and [`count_problems`] score one entry
//! - [`SummaryBuilder`] assembles the [`common::Summary`] payload

pub mod compliance;
pub mod entry;
pub mod error;
pub mod format;
pub mod normalize;
pub mod problems;
pub mod rules;
pub mod summary;

pub use compliance::compliance;
pub use entry::{ChecklistEntry, entries_from_table};
pub use error::{Result, ScoringError};
pub use normalize::normalize_header;
pub use problems::count_problems;
pub use rules::{CollisionPolicy, FieldAliases, ScoringRules};
pub use summary::{SummaryBuilder, SummaryConfig};
