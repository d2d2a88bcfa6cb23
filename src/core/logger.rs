//! Main logger implementation

use super::{
    call_site::CallSite,
    config::LoggerConfig,
    error::{LoggerError, Result},
    log_level::{LevelFilter, LogLevel},
    log_record::LogRecord,
    metrics::{LoggerMetrics, SinkHealth},
    queue::{BoundedQueue, QueueConsumer},
    writer::BackgroundWriter,
};
use crate::sinks::{router::sink_paths, SinkRouter};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit close.
/// For custom timeout control, use [`Logger::close`] instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Leveled logging entry points shared by every logger in this crate.
///
/// Implementors provide the threshold and what happens to an admitted
/// record; filtering and record construction live here.
pub trait Log {
    fn threshold(&self) -> LogLevel;

    /// Hand over a record that already passed the threshold.
    fn submit(&self, record: LogRecord);

    #[inline]
    fn enabled(&self, level: LogLevel) -> bool {
        LevelFilter::new(self.threshold()).enabled(level)
    }

    /// Log a formatted message with an explicit call site.
    ///
    /// Below the threshold this returns before the message is formatted.
    fn log_at(&self, level: LogLevel, call_site: CallSite, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.submit(LogRecord::new(level, call_site, fmt::format(args)));
    }

    /// Log `message` at `level`, recording the caller's file and line.
    ///
    /// The caller's function name is not available here, so the line shows
    /// it as `unknown`. Use [`log!`](crate::log!) or the level macros such
    /// as [`info!`](crate::info!) to record the full call site.
    ///
    /// ```
    /// use dual_sink_logger::{info, ConsoleLogger, Log};
    ///
    /// fn handle(logger: &ConsoleLogger<Vec<u8>>) {
    ///     logger.info("plain");
    ///     info!(logger, "from {}", "macro");
    /// }
    ///
    /// let logger = ConsoleLogger::with_writer("info", Vec::new()).unwrap();
    /// handle(&logger);
    ///
    /// let out = String::from_utf8(logger.into_inner()).unwrap();
    /// let lines: Vec<&str> = out.lines().collect();
    /// assert!(lines[0].contains(":unknown:"));
    /// assert!(lines[1].contains(":handle:"));
    /// ```
    #[track_caller]
    fn log(&self, level: LogLevel, message: impl Into<String>)
    where
        Self: Sized,
    {
        if !self.enabled(level) {
            return;
        }
        self.submit(LogRecord::new(level, CallSite::caller(), message.into()));
    }

    /// Log at `DEBUG`. The function renders as `unknown`; the
    /// [`debug!`](crate::debug!) macro captures it.
    #[inline]
    #[track_caller]
    fn debug(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogLevel::Debug, message);
    }

    /// Log at `TRACE`. The function renders as `unknown`; the
    /// [`trace!`](crate::trace!) macro captures it.
    #[inline]
    #[track_caller]
    fn trace(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogLevel::Trace, message);
    }

    /// Log at `INFO`. The function renders as `unknown`; the
    /// [`info!`](crate::info!) macro captures it.
    #[inline]
    #[track_caller]
    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogLevel::Info, message);
    }

    /// Log at `WARNING`. The function renders as `unknown`; the
    /// [`warning!`](crate::warning!) macro captures it.
    #[inline]
    #[track_caller]
    fn warning(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogLevel::Warning, message);
    }

    /// Log at `ERROR`. The function renders as `unknown`; the
    /// [`error!`](crate::error!) macro captures it.
    #[inline]
    #[track_caller]
    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogLevel::Error, message);
    }

    /// Log at `FATAL`. The function renders as `unknown`; the
    /// [`fatal!`](crate::fatal!) macro captures it.
    #[inline]
    #[track_caller]
    fn fatal(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogLevel::Fatal, message);
    }
}

/// Asynchronous file logger.
///
/// Admitted records go into a bounded queue; a single background thread
/// renders them into `<directory>/<base_name>.log` and duplicates `ERROR`
/// and `FATAL` records into `<directory>/<base_name>.err`. A log call never
/// blocks on I/O: when the queue is full the record is dropped and counted.
///
/// # Example
///
/// ```no_run
/// use dual_sink_logger::prelude::*;
/// use dual_sink_logger::{error, info};
///
/// let logger = Logger::new_file_logger("info", "/var/log", "api", 10 * 1024 * 1024)?;
/// info!(logger, "listening on port {}", 8080);
/// error!(logger, "fail: {}", "disk");
/// logger.close(DEFAULT_SHUTDOWN_TIMEOUT)?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct Logger {
    filter: LevelFilter,
    /// `None` once the logger is closed
    queue: RwLock<Option<BoundedQueue>>,
    writer: Mutex<Option<BackgroundWriter>>,
    metrics: Arc<LoggerMetrics>,
    primary_path: PathBuf,
    error_path: PathBuf,
    queue_capacity: usize,
    max_size_bytes: u64,
}

impl Logger {
    /// Create a file logger writing to `<directory>/<base_name>.log` and
    /// `<directory>/<base_name>.err`.
    ///
    /// An unrecognized `level_name` is an error. Files that cannot be opened
    /// are not: they are reported to stderr and show up in [`Logger::health`].
    /// `max_size_bytes` is kept for [`Logger::max_size_bytes`] only; files are
    /// never rotated.
    pub fn new_file_logger(
        level_name: &str,
        directory: impl AsRef<Path>,
        base_name: &str,
        max_size_bytes: u64,
    ) -> Result<Self> {
        let mut config = LoggerConfig::new(level_name, directory.as_ref(), base_name);
        config.max_size_bytes = max_size_bytes;
        Self::from_config(&config)
    }

    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let (logger, consumer, router) = Self::unstarted(config)?;
        logger.start(consumer, router)?;
        Ok(logger)
    }

    /// Build everything except the writer thread.
    fn unstarted(config: &LoggerConfig) -> Result<(Self, QueueConsumer, SinkRouter)> {
        let threshold = config.validate()?;
        let metrics = Arc::new(LoggerMetrics::new());
        let router = SinkRouter::open(&config.directory, &config.base_name, Arc::clone(&metrics));
        let (queue, consumer) = BoundedQueue::with_capacity(config.queue_capacity);
        let (primary_path, error_path) = sink_paths(&config.directory, &config.base_name);

        let logger = Self {
            filter: LevelFilter::new(threshold),
            queue: RwLock::new(Some(queue)),
            writer: Mutex::new(None),
            metrics,
            primary_path,
            error_path,
            queue_capacity: config.queue_capacity,
            max_size_bytes: config.max_size_bytes,
        };
        Ok((logger, consumer, router))
    }

    fn start(&self, consumer: QueueConsumer, router: SinkRouter) -> Result<()> {
        let writer = BackgroundWriter::spawn(consumer, router)?;
        *self.writer.lock() = Some(writer);
        Ok(())
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```no_run
    /// use dual_sink_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level("debug")
    ///     .directory("/var/log")
    ///     .base_name("worker")
    ///     .queue_capacity(1_000)
    ///     .build()?;
    /// # Ok::<(), LoggerError>(())
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Configured size limit; accepted but not enforced.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary_path
    }

    pub fn error_path(&self) -> &Path {
        &self.error_path
    }

    /// Records waiting for the background writer.
    pub fn pending(&self) -> usize {
        self.queue.read().as_ref().map_or(0, BoundedQueue::len)
    }

    pub fn is_closed(&self) -> bool {
        self.queue.read().is_none()
    }

    /// Get the number of dropped records
    ///
    /// Counts records discarded because the queue was full, or because the
    /// logger had already been closed.
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Availability of both output files and the count of failed writes.
    pub fn health(&self) -> SinkHealth {
        self.metrics.health()
    }

    /// Stop accepting records, drain the queue and release the files.
    ///
    /// Records logged after this call are dropped. Returns
    /// `ShutdownTimeout` if the writer has not finished draining within
    /// `timeout`; it keeps draining in the background.
    pub fn close(&self, timeout: Duration) -> Result<()> {
        let queue = self.queue.write().take();
        if queue.is_none() {
            return Err(LoggerError::LoggerStopped);
        }
        // Dropping the last producer handle lets the writer see the end of the queue
        drop(queue);

        let writer = self.writer.lock().take();
        match writer {
            Some(writer) => writer.join(timeout),
            None => Ok(()),
        }
    }
}

impl Log for Logger {
    #[inline]
    fn threshold(&self) -> LogLevel {
        self.filter.threshold()
    }

    fn submit(&self, record: LogRecord) {
        let queue = self.queue.read();
        let accepted = match queue.as_ref() {
            Some(queue) => queue.try_push(record),
            None => false,
        };
        if accepted {
            self.metrics.record_accepted();
        } else {
            self.metrics.record_dropped();
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.filter.threshold())
            .field("primary_path", &self.primary_path)
            .field("error_path", &self.error_path)
            .field("queue_capacity", &self.queue_capacity)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        match self.close(DEFAULT_SHUTDOWN_TIMEOUT) {
            Ok(()) | Err(LoggerError::LoggerStopped) => {}
            Err(e) => eprintln!("[LOGGER ERROR] Failed to drain log queue during shutdown: {}", e),
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing a file Logger with a fluent API
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// Set the threshold by level name
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, name: impl Into<String>) -> Self {
        self.config.level = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = directory.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn base_name(mut self, base_name: impl Into<String>) -> Self {
        self.config.base_name = base_name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_size_bytes(mut self, max_size_bytes: u64) -> Self {
        self.config.max_size_bytes = max_size_bytes;
        self
    }

    /// Set how many records may wait for the writer before new ones are dropped
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Build the Logger, opening both files and starting the writer
    pub fn build(self) -> Result<Logger> {
        Logger::from_config(&self.config)
    }
}
