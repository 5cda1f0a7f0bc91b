//! Severity levels
//!
//! Levels are spaced by [`LEVEL_STEP`] so that the numeric value of a level
//! leaves room between neighbours. `Null` sits above every real severity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Distance between the numeric values of adjacent levels
pub const LEVEL_STEP: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    All = 0,
    Trace = 5,
    Debug = 10,
    Verbose = 15,
    #[default]
    Info = 20,
    Notice = 25,
    Warning = 30,
    Severe = 35,
    Error = 40,
    Alert = 45,
    Critical = 50,
    Emergency = 55,
    Null = 60,
}

impl Level {
    /// Every level in ascending order
    pub const ALL: [Level; 13] = [
        Level::All,
        Level::Trace,
        Level::Debug,
        Level::Verbose,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Severe,
        Level::Error,
        Level::Alert,
        Level::Critical,
        Level::Emergency,
        Level::Null,
    ];

    /// Parse a level name.
    ///
    /// Matching is case-sensitive against the lowercase names. Anything else
    /// resolves to [`Level::Null`].
    ///
    /// ```
    /// use rust_leveled_logger::Level;
    ///
    /// assert_eq!(Level::parse("warning"), Level::Warning);
    /// assert_eq!(Level::parse("Warning"), Level::Null);
    /// ```
    pub fn parse(name: &str) -> Level {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == name)
            .unwrap_or(Level::Null)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::All => "all",
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Verbose => "verbose",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Severe => "severe",
            Level::Error => "error",
            Level::Alert => "alert",
            Level::Critical => "critical",
            Level::Emergency => "emergency",
            Level::Null => "null",
        }
    }

    /// Upper-case label used in formatted output
    pub fn label(&self) -> &'static str {
        match self {
            Level::All => "ALL",
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Verbose => "VERBOSE",
            Level::Info => "INFO",
            Level::Notice => "NOTICE",
            Level::Warning => "WARNING",
            Level::Severe => "SEVERE",
            Level::Error => "ERROR",
            Level::Alert => "ALERT",
            Level::Critical => "CRITICAL",
            Level::Emergency => "EMERGENCY",
            Level::Null => "NULL",
        }
    }

    #[inline]
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(value: u8) -> Option<Level> {
        Self::ALL.iter().copied().find(|level| level.value() == value)
    }

    /// The next higher level, saturating at `Null`
    pub fn next(&self) -> Level {
        Self::from_value(self.value().saturating_add(LEVEL_STEP)).unwrap_or(Level::Null)
    }

    /// The next lower level, saturating at `All`
    pub fn previous(&self) -> Level {
        self.value()
            .checked_sub(LEVEL_STEP)
            .and_then(Self::from_value)
            .unwrap_or(Level::All)
    }

    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::All | Level::Trace => BrightBlack,
            Level::Debug | Level::Verbose => Blue,
            Level::Info => Green,
            Level::Notice => Cyan,
            Level::Warning => Yellow,
            Level::Severe => Magenta,
            Level::Error => Red,
            Level::Alert | Level::Critical | Level::Emergency => BrightRed,
            Level::Null => White,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Level::parse(s))
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        Level::parse(s)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Level::parse(name.trim()))
    }
}
