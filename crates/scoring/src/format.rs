//! Timestamp resolution for checklist cells.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use common::CellValue;

pub use common::format::{format_date, format_time, offset_from_minutes};

/// Largest spreadsheet serial day accepted (31/12/9999).
const MAX_SERIAL_DAY: f64 = 2_958_465.0;

fn local_to_utc(naive: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|d| d.with_timezone(&Utc))
}

/// Parses a timestamp typed as text.
///
/// Accepts RFC 3339, then `dd/mm/yyyy HH:MM:SS`, `dd/mm/yyyy HH:MM` and
/// `dd/mm/yyyy` read as local time in `offset`.
pub fn parse_text_timestamp(text: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(text) {
        return Some(d.with_timezone(&Utc));
    }
    for pattern in ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return local_to_utc(naive, offset);
        }
    }
    NaiveDate::parse_from_str(text, "%d/%m/%Y")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| local_to_utc(naive, offset))
}

/// Converts a spreadsheet serial day count (days since 30/12/1899, local time).
pub fn from_serial_day(serial: f64, offset: FixedOffset) -> Option<DateTime<Utc>> {
    if !serial.is_finite() || !(0.0..=MAX_SERIAL_DAY).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let naive = epoch.checked_add_signed(Duration::milliseconds(millis))?;
    local_to_utc(naive, offset)
}

/// Resolves a timestamp cell, falling back to `now` when absent or unreadable.
pub fn resolve_timestamp(
    value: Option<&CellValue>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> DateTime<Utc> {
    let parsed = match value {
        None => return now,
        Some(CellValue::Date(d)) => Some(*d),
        Some(CellValue::Text(s)) => parse_text_timestamp(s, offset),
        Some(CellValue::Number(n)) => from_serial_day(*n, offset),
        Some(CellValue::Bool(_) | CellValue::Empty) => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::debug!(value = ?value, "unreadable timestamp, using current time");
        now
    })
}
