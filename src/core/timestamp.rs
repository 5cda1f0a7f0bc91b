//! Timestamp formatting
//!
//! Records capture their timestamp when they are created and are only
//! rendered when a formatter asks for it, using the format configured on the
//! owning logger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const ISO8601_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::TimestampFormat;
///
/// // An empty pattern selects the default ISO 8601 layout
/// assert_eq!(TimestampFormat::from_pattern(""), TimestampFormat::Iso8601);
///
/// // Anything else is a strftime pattern
/// let format = TimestampFormat::from_pattern("%d/%b/%Y:%H:%M:%S %z");
/// assert!(matches!(format, TimestampFormat::Custom(_)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Select a format from a configuration pattern.
    ///
    /// The empty string selects [`TimestampFormat::Iso8601`]; the names of the
    /// built-in formats (`rfc3339`, `unix`, `unix_millis`, `iso8601_micros`)
    /// select those; any other string is treated as a strftime pattern.
    pub fn from_pattern(pattern: &str) -> Self {
        match pattern.trim() {
            "" | "iso8601" => TimestampFormat::Iso8601,
            "iso8601_micros" => TimestampFormat::Iso8601Micros,
            "rfc3339" => TimestampFormat::Rfc3339,
            "unix" => TimestampFormat::Unix,
            "unix_millis" => TimestampFormat::UnixMillis,
            _ => TimestampFormat::Custom(pattern.to_string()),
        }
    }

    /// Format a `DateTime<Utc>` according to this format.
    ///
    /// A custom pattern that chrono rejects falls back to ISO 8601 instead of
    /// failing.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format(ISO8601_MILLIS).to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => {
                let mut out = String::new();
                if write!(out, "{}", datetime.format(pattern)).is_err() {
                    return datetime.format(ISO8601_MILLIS).to_string();
                }
                out
            }
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}
