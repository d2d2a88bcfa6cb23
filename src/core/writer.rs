//! Background writer thread
//!
//! The writer is the only consumer of a logger's queue and the only owner of
//! its output files. It blocks until records arrive, writes everything that
//! is ready in one batch, flushes, and goes back to waiting. When every
//! producer handle is gone it drains what is left, flushes and exits,
//! closing the files.

use super::{
    error::{LoggerError, Result},
    formatter::RecordFormatter,
    log_record::LogRecord,
    queue::QueueConsumer,
};
use crate::sinks::SinkRouter;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Upper bound on records written between two flushes.
pub const WRITER_BATCH_SIZE: usize = 256;

pub const WRITER_THREAD_NAME: &str = "dual-sink-writer";

#[derive(Debug)]
pub struct BackgroundWriter {
    handle: JoinHandle<()>,
}

impl BackgroundWriter {
    /// Start the writer thread, handing it the queue consumer and the sinks.
    pub fn spawn(consumer: QueueConsumer, router: SinkRouter) -> Result<Self> {
        let handle = thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || drain(consumer, router))
            .map_err(|e| {
                LoggerError::io_operation(
                    "spawning background writer",
                    "cannot start worker thread",
                    e,
                )
            })?;
        Ok(Self { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the writer to exit after its queue was closed.
    ///
    /// If the writer is still running when `timeout` expires it is left
    /// detached and `ShutdownTimeout` is returned.
    pub fn join(self, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        while !self.handle.is_finished() {
            if start.elapsed() >= timeout {
                return Err(LoggerError::ShutdownTimeout { timeout });
            }
            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(5));
        }

        self.handle.join().map_err(|panic_info| {
            let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            LoggerError::WorkerPanicked(message)
        })
    }
}

fn drain(consumer: QueueConsumer, mut router: SinkRouter) {
    let formatter = RecordFormatter::new();
    let mut line = String::with_capacity(256);

    while let Some(record) = consumer.pop() {
        write_record(&formatter, &mut router, &mut line, &record);

        // Take whatever else is already queued before paying for a flush
        let mut batched = 1;
        while batched < WRITER_BATCH_SIZE {
            match consumer.try_pop() {
                Some(record) => {
                    write_record(&formatter, &mut router, &mut line, &record);
                    batched += 1;
                }
                None => break,
            }
        }

        router.flush();
    }

    router.flush();
}

fn write_record(
    formatter: &RecordFormatter,
    router: &mut SinkRouter,
    line: &mut String,
    record: &LogRecord,
) {
    line.clear();
    formatter.render_into(record, line);
    router.write(record, line);
}
