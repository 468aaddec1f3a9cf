//! Local-time helpers. Every local time shown for a location is computed
//! with that location's own UTC offset as reported by the provider, never
//! with the offset of the machine running the dashboard.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Offset from a provider `timezone` field (seconds east of UTC). Values
/// chrono cannot represent fall back to UTC.
pub fn offset_from_seconds(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

/// Unix seconds converted to wall-clock time at `offset`.
pub fn local_time(timestamp_seconds: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp(timestamp_seconds, 0).map(|utc| utc.with_timezone(&offset))
}

/// `UTC+05:30`, `UTC-04:00`, `UTC+00:00`.
pub fn format_utc_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds >= 0 { '+' } else { '-' };
    let abs = seconds.unsigned_abs();
    format!("UTC{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
}
