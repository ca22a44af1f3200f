//! pt-BR date and time rendering in a fixed UTC offset.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Returns the fixed offset for `minutes` east of UTC, or UTC when out of range.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}

/// Formats the date part as `dd/mm/yyyy` in `offset`.
pub fn format_date(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%d/%m/%Y").to_string()
}

/// Formats the time part as `HH:MM:SS` in `offset`.
pub fn format_time(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%H:%M:%S").to_string()
}
