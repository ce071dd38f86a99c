//! Leveled logging boundary contract.

use crate::fields::KeyValue;
use std::error::Error;

/// Capability to write informational messages.
///
/// This is what [`Logger::v`] hands back: either the live logger or the
/// shared no-op sink. Call sites treat both the same way.
pub trait InfoWriter: Send + Sync {
    /// Write a non-error message with structured fields.
    fn info(&self, message: &str, kv: &[KeyValue]);
}

/// Leveled logger with structured fields and a verbosity threshold.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. [`Logger::set_level`] may run
/// concurrently with logging calls from other threads.
pub trait Logger: InfoWriter {
    /// Write an error message. `error`, when present, is attached so the
    /// backend can render it next to the message.
    fn error(&self, error: Option<&dyn Error>, message: &str, kv: &[KeyValue]);

    /// Gate on a verbosity level.
    ///
    /// Returns a live writer when `level` is at or below the current
    /// threshold and a no-op writer when it is above.
    fn v(&self, level: u32) -> &dyn InfoWriter;

    /// Replace the verbosity threshold.
    fn set_level(&self, level: u32);
}
