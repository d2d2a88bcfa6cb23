//! File logger configuration

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::queue::DEFAULT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for a file-backed [`Logger`](crate::Logger).
///
/// Missing fields in a JSON document take their defaults:
///
/// ```
/// use dual_sink_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{ "level": "warning", "base_name": "api" }"#).unwrap();
/// assert_eq!(config.base_name, "api");
/// assert_eq!(config.queue_capacity, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Threshold level name, case-insensitive
    pub level: String,

    /// Directory holding the two log files; it is not created
    pub directory: PathBuf,

    /// File stem of `<base_name>.log` and `<base_name>.err`
    pub base_name: String,

    /// Size limit carried for callers that read it back; never enforced
    pub max_size_bytes: u64,

    /// Records buffered before new ones are dropped
    pub queue_capacity: usize,
}

impl LoggerConfig {
    pub fn new(
        level: impl Into<String>,
        directory: impl Into<PathBuf>,
        base_name: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            directory: directory.into(),
            base_name: base_name.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the configuration and return the parsed threshold.
    pub fn validate(&self) -> Result<LogLevel> {
        let threshold = self.level.parse::<LogLevel>()?;
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "queue_capacity",
                "capacity must be at least 1",
            ));
        }
        if self.base_name.is_empty() {
            return Err(LoggerError::config("base_name", "base name must not be empty"));
        }
        Ok(threshold)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: PathBuf::from("."),
            base_name: "app".to_string(),
            max_size_bytes: 0,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.validate().unwrap(), LogLevel::Info);
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn test_from_json() {
        let config = LoggerConfig::from_json(
            r#"{
                "level": "DEBUG",
                "directory": "/tmp/logs",
                "base_name": "worker",
                "max_size_bytes": 10485760,
                "queue_capacity": 128
            }"#,
        )
        .unwrap();
        assert_eq!(config.validate().unwrap(), LogLevel::Debug);
        assert_eq!(config.directory, PathBuf::from("/tmp/logs"));
        assert_eq!(config.max_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.queue_capacity, 128);
    }

    #[test]
    fn test_malformed_json() {
        let err = LoggerConfig::from_json("{ level: ").unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = LoggerConfig::new("loud", ".", "app");
        assert!(matches!(config.validate(), Err(LoggerError::InvalidLevel { .. })));

        let mut config = LoggerConfig::new("info", ".", "app");
        config.queue_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        let config = LoggerConfig::new("info", ".", "");
        assert!(config.validate().unwrap_err().is_config_error());
    }
}
