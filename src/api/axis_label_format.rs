use chrono::{DateTime, Utc};

const AXIS_TIME_PATTERN: &str = "%Y-%m-%d %H:%M";
const CROSSHAIR_TIME_PATTERN: &str = "%H:%M:%S";
const PRICE_PRECISION: usize = 5;

/// UTC date + minute label used on the time axis.
#[must_use]
pub fn format_axis_time(unix_seconds: i64) -> String {
    format_utc(unix_seconds, AXIS_TIME_PATTERN)
}

/// UTC time-of-day used by the crosshair readout.
#[must_use]
pub fn format_crosshair_time(unix_seconds: i64) -> String {
    format_utc(unix_seconds, CROSSHAIR_TIME_PATTERN)
}

#[must_use]
pub fn format_price(price: f64) -> String {
    format!("{price:.PRICE_PRECISION$}")
}

fn format_utc(unix_seconds: i64, pattern: &str) -> String {
    match DateTime::<Utc>::from_timestamp(unix_seconds, 0) {
        Some(time) => time.format(pattern).to_string(),
        // Outside chrono's representable range.
        None => unix_seconds.to_string(),
    }
}
