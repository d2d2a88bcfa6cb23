//! Console logger implementation
//!
//! Writes each admitted record synchronously, in the same line layout as the
//! file logger. There is no queue and no background thread.

use crate::core::{LevelFilter, Log, LogLevel, LogRecord, RecordFormatter, Result};
use parking_lot::Mutex;
use std::io::{self, Write};

pub struct ConsoleLogger<W: Write + Send = io::Stdout> {
    filter: LevelFilter,
    formatter: RecordFormatter,
    writer: Mutex<W>,
    use_colors: bool,
}

impl ConsoleLogger {
    /// Create a logger printing to standard output.
    pub fn new(level_name: &str) -> Result<Self> {
        Self::with_writer(level_name, io::stdout())
    }
}

impl<W: Write + Send> ConsoleLogger<W> {
    /// Create a logger printing to `writer`.
    pub fn with_writer(level_name: &str, writer: W) -> Result<Self> {
        Ok(Self {
            filter: LevelFilter::from_name(level_name)?,
            formatter: RecordFormatter::new(),
            writer: Mutex::new(writer),
            use_colors: false,
        })
    }

    /// Color the level token. Off by default so output matches the file layout.
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn render(&self, record: &LogRecord) -> String {
        let line = self.formatter.render(record);
        if self.use_colors {
            colorize_level(&line, record.level())
        } else {
            line
        }
    }
}

#[cfg(feature = "console")]
fn colorize_level(line: &str, level: LogLevel) -> String {
    use colored::Colorize;

    let token = format!("[{}]", level.to_str());
    let colored_token = token.color(level.color_code()).to_string();
    line.replacen(&token, &colored_token, 1)
}

#[cfg(not(feature = "console"))]
fn colorize_level(line: &str, _level: LogLevel) -> String {
    line.to_string()
}

impl<W: Write + Send> Log for ConsoleLogger<W> {
    #[inline]
    fn threshold(&self) -> LogLevel {
        self.filter.threshold()
    }

    fn submit(&self, record: LogRecord) {
        let line = self.render(&record);
        let mut writer = self.writer.lock();
        // Console output is best-effort, like `print!` without the panic
        let _ = writer.write_all(line.as_bytes()).and_then(|()| writer.flush());
    }
}
