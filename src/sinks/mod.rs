//! Output sinks

pub mod console;
pub mod router;

pub use console::ConsoleLogger;
pub use router::{SinkHandle, SinkRouter};
