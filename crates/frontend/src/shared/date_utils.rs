//! Utilities for date and time formatting
//!
//! Server timestamps arrive in UTC; the chat shows them in the browser's
//! local time.

use chrono::{DateTime, FixedOffset, Utc};

/// Offset reported by `Date.getTimezoneOffset()`: minutes to add to local
/// time to get UTC (UTC+8 is -480).
pub fn browser_offset_minutes() -> i32 {
    js_sys::Date::new_0().get_timezone_offset() as i32
}

/// "HH:MM" in the browser's local time.
pub fn format_time(dt: &DateTime<Utc>) -> String {
    format_time_at_offset(dt, browser_offset_minutes())
}

/// "HH:MM" for a `getTimezoneOffset`-style offset.
pub fn format_time_at_offset(dt: &DateTime<Utc>, offset_minutes: i32) -> String {
    match FixedOffset::west_opt(offset_minutes * 60) {
        Some(offset) => dt.with_timezone(&offset).format("%H:%M").to_string(),
        None => dt.format("%H:%M").to_string(),
    }
}

/// Format a timestamp as DD.MM.YYYY
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024"
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y").to_string()
}

/// Format a timestamp as DD.MM.YYYY HH:MM:SS (UTC)
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y %H:%M:%S").to_string()
}
