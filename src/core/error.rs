//! Error types for the logger system

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name that is not one of the recognized severities
    #[error("Invalid log level: '{name}' (expected one of debug, trace, info, warning, error, fatal)")]
    InvalidLevel { name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration document could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Logger already closed
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Background writer did not drain the queue in time
    #[error("Background writer did not finish within {timeout:?}; queued records may be lost")]
    ShutdownTimeout { timeout: Duration },

    /// Background writer panicked
    #[error("Background writer panicked: {0}")]
    WorkerPanicked(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// True for errors caused by the caller's configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidLevel { .. }
                | LoggerError::InvalidConfiguration { .. }
                | LoggerError::JsonError(_)
        )
    }
}
