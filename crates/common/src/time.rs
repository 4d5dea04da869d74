//! Order timestamps in Egypt local time
//!
//! The ledger and all client-facing responses use Cairo wall-clock time,
//! which is a fixed UTC+2 offset (no DST), rendered as
//! `DD/MM/YYYY HH:MM:SS` on a 24-hour clock.

use chrono::{DateTime, FixedOffset, Utc};

/// Cairo offset from UTC in seconds.
pub const CAIRO_UTC_OFFSET_SECS: i32 = 2 * 3600;

/// Current time in Cairo, formatted for the ledger.
pub fn cairo_now() -> String {
    format_cairo(Utc::now())
}

/// Format an instant as Cairo local time, `DD/MM/YYYY HH:MM:SS`.
pub fn format_cairo(instant: DateTime<Utc>) -> String {
    let cairo = FixedOffset::east_opt(CAIRO_UTC_OFFSET_SECS).expect("offset in range");
    instant
        .with_timezone(&cairo)
        .format("%d/%m/%Y %H:%M:%S")
        .to_string()
}
