//! Dashboard state shared between the poller and the renderer.

use chrono::{DateTime, Utc};
use common::Summary;

use crate::view_model::{EquipmentView, map_summary};

/// What the screen should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First fetch has not completed.
    Loading,
    /// Every fetch so far failed; nothing to show.
    Failed,
    /// A view is available and the last fetch succeeded.
    Ready,
    /// A view is available but the last fetch failed.
    Stale,
}

/// Last good view plus fetch bookkeeping.
#[derive(Debug, Clone)]
pub struct DashboardState {
    view: Option<EquipmentView>,
    last_update: Option<DateTime<Utc>>,
    error: Option<String>,
    loading: bool,
    now: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            view: None,
            last_update: None,
            error: None,
            loading: true,
            now,
        }
    }

    pub fn view(&self) -> Option<&EquipmentView> {
        self.view.as_ref()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn phase(&self) -> Phase {
        match (&self.view, &self.error) {
            (Some(_), None) => Phase::Ready,
            (Some(_), Some(_)) => Phase::Stale,
            (None, Some(_)) => Phase::Failed,
            (None, None) => Phase::Loading,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Replaces the view and clears any error banner.
    pub fn apply_success(&mut self, summary: &Summary, today: &str, at: DateTime<Utc>) {
        self.view = Some(map_summary(summary, today));
        self.last_update = Some(at);
        self.error = None;
        self.loading = false;
    }

    /// Records the error; the previous view, if any, is kept.
    pub fn apply_failure(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }
}
