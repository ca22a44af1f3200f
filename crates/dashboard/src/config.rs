//! Command-line configuration for the dashboard binary.

use std::time::Duration;

use clap::Parser;

use crate::poller::PollerConfig;
use crate::render::Tab;

#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard", version, about = "Forklift checklist dashboard")]
pub struct Args {
    /// Checklist query endpoint
    #[arg(
        long,
        env = "CHECKLIST_API_URL",
        default_value = "http://127.0.0.1:3000/checklist"
    )]
    pub url: String,

    /// Seconds between refreshes
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,

    /// Per-request timeout; waits indefinitely when omitted
    #[arg(long, env = "FETCH_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Inspection form link shown on the checklist tab
    #[arg(long, env = "CHECKLIST_FORM_URL")]
    pub form_url: Option<String>,

    /// Tab to display
    #[arg(long, value_enum, default_value_t = Tab::Overview)]
    pub tab: Tab,

    /// Fetch once, print and exit
    #[arg(long)]
    pub once: bool,

    /// Local offset for dates and times, in minutes east of UTC
    #[arg(long, env = "UTC_OFFSET_MINUTES", default_value_t = -180, allow_negative_numbers = true)]
    pub utc_offset_minutes: i32,
}

impl Args {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: Duration::from_secs(self.interval_secs),
            utc_offset_minutes: self.utc_offset_minutes,
            ..PollerConfig::default()
        }
    }
}
