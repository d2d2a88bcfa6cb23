//! Logger metrics and sink health
//!
//! Producers and the background writer update these counters; nothing on
//! the asynchronous path reports errors to the caller of `log`, so this is
//! the only place overflow drops and failed writes become visible.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Counters shared between the logging facade and its background writer.
///
/// # Example
///
/// ```
/// use dual_sink_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_accepted();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.accepted(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records admitted by the filter and queued
    accepted: AtomicU64,

    /// Records discarded because the queue was full or closed
    dropped_count: AtomicU64,

    /// Records flushed to the primary sink
    written: AtomicU64,

    /// Records duplicated into the error sink and flushed
    error_duplicates: AtomicU64,

    /// Writes or flushes that failed on either sink
    write_failures: AtomicU64,

    primary_available: AtomicBool,
    error_sink_available: AtomicBool,
}

/// Point-in-time view of the two output handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkHealth {
    pub primary_available: bool,
    pub error_sink_available: bool,
    pub write_failures: u64,
}

impl SinkHealth {
    /// Both handles open and no write has failed so far.
    pub fn is_healthy(&self) -> bool {
        self.primary_available && self.error_sink_available && self.write_failures == 0
    }
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            written: AtomicU64::new(0),
            error_duplicates: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            primary_available: AtomicBool::new(true),
            error_sink_available: AtomicBool::new(true),
        }
    }

    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn error_duplicates(&self) -> u64 {
        self.error_duplicates.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Record a queued entry
    #[inline]
    pub fn record_accepted(&self) -> u64 {
        self.accepted.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped entry, returning the previous drop count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record `count` primary records that reached the file
    #[inline]
    pub fn record_written(&self, count: u64) -> u64 {
        self.written.fetch_add(count, Ordering::Relaxed)
    }

    /// Record `count` error duplicates that reached the file
    #[inline]
    pub fn record_error_duplicates(&self, count: u64) -> u64 {
        self.error_duplicates.fetch_add(count, Ordering::Relaxed)
    }

    /// Record a failed write or flush, returning the previous failure count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    pub fn set_primary_available(&self, available: bool) {
        self.primary_available.store(available, Ordering::Relaxed);
    }

    pub fn set_error_sink_available(&self, available: bool) {
        self.error_sink_available.store(available, Ordering::Relaxed);
    }

    pub fn health(&self) -> SinkHealth {
        SinkHealth {
            primary_available: self.primary_available.load(Ordering::Relaxed),
            error_sink_available: self.error_sink_available.load(Ordering::Relaxed),
            write_failures: self.write_failures(),
        }
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been offered to the queue.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.accepted() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        let health = self.health();
        Self {
            accepted: AtomicU64::new(self.accepted()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            written: AtomicU64::new(self.written()),
            error_duplicates: AtomicU64::new(self.error_duplicates()),
            write_failures: AtomicU64::new(health.write_failures),
            primary_available: AtomicBool::new(health.primary_available),
            error_sink_available: AtomicBool::new(health.error_sink_available),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.accepted(), 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.error_duplicates(), 0);
        assert!(metrics.health().is_healthy());
    }

    #[test]
    fn test_metrics_record_dropped() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_dropped(), 0); // Returns previous value
        assert_eq!(metrics.dropped_count(), 1);
        metrics.record_dropped();
        assert_eq!(metrics.dropped_count(), 2);
    }

    #[test]
    fn test_metrics_drop_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_accepted();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }
        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_health_degrades() {
        let metrics = LoggerMetrics::new();
        metrics.set_error_sink_available(false);
        let health = metrics.health();
        assert!(health.primary_available);
        assert!(!health.error_sink_available);
        assert!(!health.is_healthy());

        let metrics = LoggerMetrics::new();
        metrics.record_write_failure();
        assert_eq!(metrics.health().write_failures, 1);
        assert!(!metrics.health().is_healthy());
    }

    #[test]
    fn test_metrics_clone() {
        let metrics = LoggerMetrics::new();
        metrics.record_dropped();
        metrics.record_written(2);
        metrics.set_primary_available(false);

        let snapshot = metrics.clone();
        assert_eq!(snapshot.dropped_count(), 1);
        assert_eq!(snapshot.written(), 2);
        assert!(!snapshot.health().primary_available);

        // Original and clone are independent
        metrics.record_dropped();
        assert_eq!(metrics.dropped_count(), 2);
        assert_eq!(snapshot.dropped_count(), 1);
    }
}
