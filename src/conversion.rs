//! Unit conversion and formatting helpers
//!
//! Contains the fixed-point coordinate conversion used by the normalizer and
//! the timestamp/number formatting shared by the CSV and GPX encoders.

use chrono::{DateTime, SecondsFormat, Utc};

/// Scale factor of E7 fixed-point coordinates
pub const E7_SCALE: f64 = 10_000_000.0;

/// Convert an E7 fixed-point coordinate to degrees
pub fn convert_e7_coordinate(raw_value: i64) -> f64 {
    // Coordinates are stored as degrees * 10000000
    raw_value as f64 / E7_SCALE
}

/// Convert milliseconds since the Unix epoch to a UTC instant.
///
/// Returns `None` for values outside the range chrono can represent.
pub fn convert_timestamp_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Fixed-point degrees with six decimals, as written to CSV
pub fn format_degrees(value: f64) -> String {
    format!("{value:.6}")
}

/// `YYYY/MM/DD` in UTC
pub fn format_utc_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y/%m/%d").to_string()
}

/// `HH:MM:SS.mmm` in UTC
pub fn format_utc_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S%.3f").to_string()
}

/// RFC 3339 with a `Z` suffix and nanosecond precision.
///
/// Trailing zeros of the fraction are dropped, and the `.` with them when
/// the instant falls on a whole second: `...:02.5Z`, `...:02Z`.
pub fn format_rfc3339(timestamp: &DateTime<Utc>) -> String {
    let full = timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let body = full.strip_suffix('Z').unwrap_or(&full);
    match body.rfind('.') {
        Some(dot) => {
            let trimmed = body.trim_end_matches('0');
            let trimmed = if trimmed.len() == dot + 1 {
                &body[..dot]
            } else {
                trimmed
            };
            format!("{trimmed}Z")
        }
        None => full,
    }
}
