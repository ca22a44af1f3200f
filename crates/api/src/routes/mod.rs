pub mod checklist;
pub mod health;
pub mod metrics;
