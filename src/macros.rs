//! Logging macros for ergonomic log message formatting.
//!
//! These macros format like `format!`, capture the call site (file, line and
//! enclosing function) and work with any [`Log`](crate::Log) implementor.
//! The message is only formatted when the level passes the threshold.
//!
//! # Examples
//!
//! ```
//! use dual_sink_logger::prelude::*;
//! use dual_sink_logger::info;
//!
//! let logger = ConsoleLogger::new("info")?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use dual_sink_logger::prelude::*;
/// # let logger = ConsoleLogger::new("debug")?;
/// use dual_sink_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.log_at($level, $crate::call_site!(), ::std::format_args!($($arg)+))
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a trace-level message.
///
/// Note that `TRACE` ranks above `DEBUG` in this crate's ordering.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message; it is also copied to the error sink.
///
/// # Examples
///
/// ```
/// # use dual_sink_logger::prelude::*;
/// # let logger = ConsoleLogger::new("debug")?;
/// use dual_sink_logger::error;
/// error!(logger, "fail: {}", "disk");
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message. Logging does not terminate the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
