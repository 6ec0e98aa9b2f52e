//! # Time Utilities
//!
//! Utilities for time formatting and unix-second conversion using chrono.
//! Stream start/stop times travel on-chain and through the indexer as unix seconds.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Convert any zoned time to unix seconds, rounding to the nearest second.
pub fn to_unix_secs<Tz: TimeZone>(time: &DateTime<Tz>) -> i64 {
    let millis = time.timestamp_millis();
    (millis as f64 / 1000.0).round() as i64
}

/// Convert unix seconds to a UTC time.
pub fn from_unix_secs(secs: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(secs, 0).ok_or(Error::OutOfRange(secs))
}

/// Render unix seconds in the local timezone (`YYYY-MM-DD HH:MM:SS`).
///
/// Values chrono cannot represent are rendered as the raw number.
pub fn format_unix_local(secs: i64) -> String {
    match from_unix_secs(secs) {
        Ok(time) => time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => secs.to_string(),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq)]
pub enum Error {
    OutOfRange(i64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
