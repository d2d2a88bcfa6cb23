//! # Dual Sink Logger
//!
//! An asynchronous file logger that never blocks the caller on I/O.
//!
//! ## Features
//!
//! - **Non-blocking**: records go into a bounded queue; when it is full the
//!   newest record is dropped and counted instead of stalling the caller
//! - **Two files**: every record lands in `<base>.log`, records at `ERROR`
//!   and above are also copied to `<base>.err`
//! - **Single writer**: one background thread owns both files
//! - **Clean shutdown**: `close` drains the queue before releasing the files
//! - **Console logger**: the same line layout, written synchronously to stdout

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, LevelFilter, Log, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, RecordFormatter, Result, SinkHealth, DEFAULT_QUEUE_CAPACITY,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::ConsoleLogger;
}

pub use crate::core::{
    BackgroundWriter, BoundedQueue, CallSite, LevelFilter, Log, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, PushRejected, QueueConsumer,
    RecordFormatter, Result, SinkHealth, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
    TIMESTAMP_FORMAT,
};
pub use crate::sinks::{ConsoleLogger, SinkRouter};
