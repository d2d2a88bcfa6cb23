//! Bounded multi-producer, single-consumer record queue
//!
//! Producers never block: a push into a full queue discards the record.
//! The consumer blocks until a record arrives, and sees the end of the
//! stream once every producer handle has been dropped and the queue has
//! been drained.

use super::log_record::LogRecord;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

/// Default number of records a queue holds before new ones are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 50_000;

/// Outcome of a push that was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushRejected {
    /// The queue was at capacity
    Full,
    /// The consumer is gone
    Closed,
}

/// Producer side of the queue; cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct BoundedQueue {
    sender: Sender<LogRecord>,
    capacity: usize,
}

/// Consumer side of the queue, owned by the background writer.
#[derive(Debug)]
pub struct QueueConsumer {
    receiver: Receiver<LogRecord>,
}

impl BoundedQueue {
    /// Create a queue and its single consumer.
    ///
    /// `capacity` must be at least 1; a zero-capacity channel would never
    /// accept a non-blocking push.
    pub fn with_capacity(capacity: usize) -> (Self, QueueConsumer) {
        debug_assert!(capacity > 0, "queue capacity must be at least 1");
        let (sender, receiver) = bounded(capacity);
        (Self { sender, capacity }, QueueConsumer { receiver })
    }

    /// Enqueue without blocking. Returns `false` if the record was dropped.
    #[inline]
    pub fn try_push(&self, record: LogRecord) -> bool {
        self.push(record).is_ok()
    }

    /// Enqueue without blocking, reporting why a record was dropped.
    pub fn push(&self, record: LogRecord) -> Result<(), PushRejected> {
        match self.sender.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(PushRejected::Full),
            Err(TrySendError::Disconnected(_)) => Err(PushRejected::Closed),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records currently waiting for the consumer.
    #[inline]
    pub fn len(&self) -> usize {
        self.sender.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }
}

impl QueueConsumer {
    /// Block until a record is available.
    ///
    /// Returns `None` once all producers are gone and nothing is left.
    pub fn pop(&self) -> Option<LogRecord> {
        self.receiver.recv().ok()
    }

    /// Take a record if one is ready, without waiting.
    pub fn try_pop(&self) -> Option<LogRecord> {
        match self.receiver.try_recv() {
            Ok(record) => Some(record),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
