//! Fixed-layout text rendering of log records
//!
//! Every sink in this crate writes the same line layout:
//!
//! ```text
//! 2024-03-09 14:05:07 [ERROR] server.rs:accept:88 connection refused
//! ```

use super::log_record::LogRecord;
use std::fmt::Write;

/// strftime pattern of the leading timestamp (one-second resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders records as `"<timestamp> [<LEVEL>] <file>:<function>:<line> <message>\n"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFormatter;

impl RecordFormatter {
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn render(&self, record: &LogRecord) -> String {
        let mut line = String::with_capacity(64 + record.message().len());
        self.render_into(record, &mut line);
        line
    }

    /// Append the rendered line to `buf`, leaving existing content in place.
    pub fn render_into(&self, record: &LogRecord, buf: &mut String) {
        let site = record.call_site();
        // Writing into a String cannot fail.
        let _ = writeln!(
            buf,
            "{} [{}] {}:{}:{} {}",
            record.timestamp().format(TIMESTAMP_FORMAT),
            record.level().to_str(),
            site.file(),
            site.function(),
            site.line(),
            record.message()
        );
    }
}
