//! Log record structure

use super::call_site::CallSite;
use super::log_level::LogLevel;
use chrono::{DateTime, Local, Timelike};

/// One leveled, timestamped, located message.
///
/// The message is stored exactly as the caller produced it; control
/// characters are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    level: LogLevel,
    timestamp: DateTime<Local>,
    call_site: CallSite,
    message: String,
}

impl LogRecord {
    /// Create a record stamped with the current wall-clock second.
    pub fn new(level: LogLevel, call_site: CallSite, message: String) -> Self {
        Self::at(level, Local::now(), call_site, message)
    }

    /// Create a record with an explicit timestamp, truncated to whole seconds.
    pub fn at(
        level: LogLevel,
        timestamp: DateTime<Local>,
        call_site: CallSite,
        message: String,
    ) -> Self {
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self {
            level,
            timestamp,
            call_site,
            message,
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[inline]
    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    #[inline]
    pub fn call_site(&self) -> &CallSite {
        &self.call_site
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}
