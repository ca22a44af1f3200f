//! Polling dashboard for forklift checklist summaries.
//!
//! Fetches the query endpoint on a fixed interval, maps the summary onto an
//! equipment view-model and renders it as text tabs. Values the checklist
//! does not provide are placeholders and are flagged as simulated.

pub mod client;
pub mod config;
pub mod error;
pub mod poller;
pub mod render;
pub mod state;
pub mod view_model;

pub use client::ChecklistClient;
pub use error::{DashboardError, Result};
pub use poller::{Poller, PollerConfig, PollerHandle};
pub use render::Tab;
pub use state::{DashboardState, Phase};
pub use view_model::{EquipmentView, Reading};
