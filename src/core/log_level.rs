//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record severity, ordered from least to most severe.
///
/// `Unknown` sorts below every named level and cannot be parsed from a
/// level name, so a logger threshold is always one of the named levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Unknown = 0,
    Debug = 1,
    Trace = 2,
    Info = 3,
    Warning = 4,
    Error = 5,
    Fatal = 6,
}

impl LogLevel {
    /// Every level, in ascending severity.
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Unknown,
        LogLevel::Debug,
        LogLevel::Trace,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Unknown => "UNKNOWN",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Map a raw ordinal back to a level; unmapped ordinals become `Unknown`.
    pub fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            1 => LogLevel::Debug,
            2 => LogLevel::Trace,
            3 => LogLevel::Info,
            4 => LogLevel::Warning,
            5 => LogLevel::Error,
            6 => LogLevel::Fatal,
            _ => LogLevel::Unknown,
        }
    }

    #[inline]
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Records at or above `Error` are duplicated into the error sink.
    #[inline]
    pub fn is_error_or_above(&self) -> bool {
        *self >= LogLevel::Error
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Unknown => White,
            LogLevel::Debug => Blue,
            LogLevel::Trace => BrightBlack,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl From<u8> for LogLevel {
    fn from(ordinal: u8) -> Self {
        LogLevel::from_ordinal(ordinal)
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

/// Immutable admission check against a threshold fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    threshold: LogLevel,
}

impl LevelFilter {
    pub fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }

    /// Build a filter from a case-insensitive level name.
    pub fn from_name(name: &str) -> Result<Self, LoggerError> {
        name.parse().map(Self::new)
    }

    #[inline]
    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }
}
