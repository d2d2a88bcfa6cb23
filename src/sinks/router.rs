//! Primary / error-duplicate file routing
//!
//! A file-backed logger owns two append-only files: `<base>.log` receives
//! every admitted record, `<base>.err` receives a second copy of each record
//! at `ERROR` or above. Both are opened once, eagerly, and are only ever
//! touched by the background writer.

use crate::core::{LogRecord, LoggerMetrics};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const PRIMARY_EXTENSION: &str = "log";
pub const ERROR_EXTENSION: &str = "err";

/// One persistent append-only output file.
///
/// A handle whose file could not be opened stays in the router as an
/// unavailable handle: writes to it do nothing.
#[derive(Debug)]
pub struct SinkHandle {
    name: &'static str,
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    /// Records appended since the last successful flush
    pending: u64,
    failure_reported: bool,
}

impl SinkHandle {
    /// Open `path` in append-create mode, reporting failure to stderr.
    pub fn open(name: &'static str, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let writer = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to open {} sink '{}': {}",
                    name,
                    path.display(),
                    e
                );
                None
            }
        };
        Self {
            name,
            path,
            writer,
            pending: 0,
            failure_reported: false,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_available(&self) -> bool {
        self.writer.is_some()
    }

    /// Buffer `text` for the next flush. Unavailable handles ignore it.
    fn append(&mut self, text: &str) -> io::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(text.as_bytes())?;
            self.pending += 1;
        }
        Ok(())
    }

    /// Flush buffered records, returning how many reached the file.
    ///
    /// On failure the records stay pending; `BufWriter` keeps the unwritten
    /// bytes and the next flush retries them.
    fn flush(&mut self) -> io::Result<u64> {
        match self.writer.as_mut() {
            Some(writer) => {
                writer.flush()?;
                Ok(std::mem::take(&mut self.pending))
            }
            None => Ok(0),
        }
    }

    fn report_failure(&mut self, operation: &str, error: &io::Error) {
        if !self.failure_reported {
            self.failure_reported = true;
            eprintln!(
                "[LOGGER ERROR] {} of {} sink '{}' failed: {}. Further failures are only counted.",
                operation,
                self.name,
                self.path.display(),
                error
            );
        }
    }
}

impl Drop for SinkHandle {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

/// Routes rendered records to the primary sink and, for `ERROR` and above,
/// to the error-duplicate sink.
#[derive(Debug)]
pub struct SinkRouter {
    primary: SinkHandle,
    error_duplicate: SinkHandle,
    metrics: Arc<LoggerMetrics>,
}

impl SinkRouter {
    /// Open `<directory>/<base_name>.log` and `<directory>/<base_name>.err`.
    pub fn open(directory: &Path, base_name: &str, metrics: Arc<LoggerMetrics>) -> Self {
        let (primary, error) = sink_paths(directory, base_name);
        Self::from_paths(primary, error, metrics)
    }

    pub fn from_paths(
        primary: impl Into<PathBuf>,
        error_duplicate: impl Into<PathBuf>,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        let primary = SinkHandle::open("primary", primary);
        let error_duplicate = SinkHandle::open("error", error_duplicate);
        metrics.set_primary_available(primary.is_available());
        metrics.set_error_sink_available(error_duplicate.is_available());
        Self {
            primary,
            error_duplicate,
            metrics,
        }
    }

    pub fn primary(&self) -> &SinkHandle {
        &self.primary
    }

    pub fn error_duplicate(&self) -> &SinkHandle {
        &self.error_duplicate
    }

    /// Write `text`, the rendering of `record`, to the sinks it belongs in.
    ///
    /// Failures are counted in the metrics and never returned. Records only
    /// count as written once a flush has moved them to the file.
    pub fn write(&mut self, record: &LogRecord, text: &str) {
        if let Err(e) = self.primary.append(text) {
            self.metrics.record_write_failure();
            self.primary.report_failure("write", &e);
        }

        if record.level().is_error_or_above() {
            if let Err(e) = self.error_duplicate.append(text) {
                self.metrics.record_write_failure();
                self.error_duplicate.report_failure("write", &e);
            }
        }
    }

    pub fn flush(&mut self) {
        match self.primary.flush() {
            Ok(flushed) => {
                self.metrics.record_written(flushed);
            }
            Err(e) => {
                self.metrics.record_write_failure();
                self.primary.report_failure("flush", &e);
            }
        }
        match self.error_duplicate.flush() {
            Ok(flushed) => {
                self.metrics.record_error_duplicates(flushed);
            }
            Err(e) => {
                self.metrics.record_write_failure();
                self.error_duplicate.report_failure("flush", &e);
            }
        }
    }
}

/// Paths of the primary and error-duplicate files for a base name.
pub fn sink_paths(directory: &Path, base_name: &str) -> (PathBuf, PathBuf) {
    let stem = directory.join(base_name);
    (
        append_extension(&stem, PRIMARY_EXTENSION),
        append_extension(&stem, ERROR_EXTENSION),
    )
}

// `Path::with_extension` would replace a dot already present in the base name.
fn append_extension(stem: &Path, extension: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LogLevel, RecordFormatter};
    use std::fs;
    use tempfile::TempDir;

    fn record(level: LogLevel, message: &str) -> LogRecord {
        LogRecord::new(level, CallSite::new("test", "router.rs", 7), message.to_string())
    }

    fn route(router: &mut SinkRouter, level: LogLevel, message: &str) {
        let record = record(level, message);
        let text = RecordFormatter::new().render(&record);
        router.write(&record, &text);
    }

    #[test]
    fn test_sink_paths_keep_dotted_base_name() {
        let (log, err) = sink_paths(Path::new("/var/log"), "app.v2");
        assert_eq!(log, PathBuf::from("/var/log/app.v2.log"));
        assert_eq!(err, PathBuf::from("/var/log/app.v2.err"));
    }

    #[test]
    fn test_error_records_are_duplicated() {
        let dir = TempDir::new().unwrap();
        let metrics = Arc::new(LoggerMetrics::new());
        let mut router = SinkRouter::open(dir.path(), "svc", Arc::clone(&metrics));

        route(&mut router, LogLevel::Info, "started");
        route(&mut router, LogLevel::Warning, "slow");
        route(&mut router, LogLevel::Error, "failed");
        route(&mut router, LogLevel::Fatal, "gone");
        router.flush();

        let log = fs::read_to_string(dir.path().join("svc.log")).unwrap();
        let err = fs::read_to_string(dir.path().join("svc.err")).unwrap();
        assert_eq!(log.lines().count(), 4);
        assert_eq!(err.lines().count(), 2);
        let log_lines: Vec<&str> = log.lines().collect();
        let err_lines: Vec<&str> = err.lines().collect();
        assert_eq!(err_lines, &log_lines[2..]);

        assert_eq!(metrics.written(), 4);
        assert_eq!(metrics.error_duplicates(), 2);
        assert!(metrics.health().is_healthy());
    }

    #[test]
    fn test_appends_to_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("svc.log"), "earlier\n").unwrap();

        let mut router = SinkRouter::open(dir.path(), "svc", Arc::new(LoggerMetrics::new()));
        route(&mut router, LogLevel::Info, "later");
        drop(router);

        let log = fs::read_to_string(dir.path().join("svc.log")).unwrap();
        assert!(log.starts_with("earlier\n"));
        assert!(log.ends_with(" later\n"));
    }

    #[test]
    fn test_records_count_as_written_after_flush() {
        let dir = TempDir::new().unwrap();
        let metrics = Arc::new(LoggerMetrics::new());
        let mut router = SinkRouter::open(dir.path(), "svc", Arc::clone(&metrics));

        route(&mut router, LogLevel::Info, "buffered");
        route(&mut router, LogLevel::Error, "buffered error");
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.error_duplicates(), 0);

        router.flush();
        assert_eq!(metrics.written(), 2);
        assert_eq!(metrics.error_duplicates(), 1);

        // Nothing new to flush
        router.flush();
        assert_eq!(metrics.written(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_device_counts_failures_not_writes() {
        let metrics = Arc::new(LoggerMetrics::new());
        let mut router = SinkRouter::from_paths("/dev/full", "/dev/full", Arc::clone(&metrics));
        assert!(router.primary().is_available());

        for i in 0..5 {
            route(&mut router, LogLevel::Info, &format!("lost {i}"));
        }
        route(&mut router, LogLevel::Error, "lost error");
        router.flush();

        let health = metrics.health();
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.error_duplicates(), 0);
        assert!(health.write_failures > 0);
        assert!(health.primary_available);
        assert!(!health.is_healthy());
        assert!(router.primary().failure_reported);
        assert!(router.error_duplicate().failure_reported);
    }

    #[test]
    fn test_unavailable_error_sink_keeps_primary_complete() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("svc.err")).unwrap();
        let metrics = Arc::new(LoggerMetrics::new());
        let mut router = SinkRouter::open(dir.path(), "svc", Arc::clone(&metrics));

        assert!(router.primary().is_available());
        assert!(!router.error_duplicate().is_available());
        route(&mut router, LogLevel::Error, "boom");
        route(&mut router, LogLevel::Info, "ok");
        router.flush();

        let log = fs::read_to_string(dir.path().join("svc.log")).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" boom"));
        assert!(lines[1].ends_with(" ok"));

        let health = metrics.health();
        assert!(health.primary_available);
        assert!(!health.error_sink_available);
        assert_eq!(health.write_failures, 0);
        assert_eq!(metrics.written(), 2);
        assert_eq!(metrics.error_duplicates(), 0);
    }

    #[test]
    fn test_unopenable_sinks_are_no_ops() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let metrics = Arc::new(LoggerMetrics::new());
        let mut router = SinkRouter::open(&missing, "svc", Arc::clone(&metrics));

        assert!(!router.primary().is_available());
        assert!(!router.error_duplicate().is_available());
        route(&mut router, LogLevel::Error, "nowhere");
        router.flush();

        let health = metrics.health();
        assert!(!health.primary_available);
        assert!(!health.error_sink_available);
        assert_eq!(health.write_failures, 0);
        assert_eq!(metrics.written(), 0);
        assert!(!missing.exists());
    }
}
