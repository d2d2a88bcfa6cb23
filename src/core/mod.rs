//! Core logger types and traits

pub mod call_site;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod writer;

pub use call_site::CallSite;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use formatter::{RecordFormatter, TIMESTAMP_FORMAT};
pub use log_level::{LevelFilter, LogLevel};
pub use log_record::LogRecord;
pub use logger::{Log, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::{LoggerMetrics, SinkHealth};
pub use queue::{BoundedQueue, PushRejected, QueueConsumer, DEFAULT_QUEUE_CAPACITY};
pub use writer::{BackgroundWriter, WRITER_BATCH_SIZE};
