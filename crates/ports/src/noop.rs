//! No-operation logger.

use crate::fields::KeyValue;
use crate::logger::{InfoWriter, Logger};
use std::error::Error;

/// A logger that discards everything.
///
/// [`Logger::v`] implementations return [`NOOP_LOGGER`] for suppressed
/// levels. It holds no state, so one shared instance serves every thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

/// The process-wide no-op logger.
pub static NOOP_LOGGER: NoopLogger = NoopLogger;

/// Returns the process-wide no-op logger.
#[must_use]
pub fn noop_logger() -> &'static NoopLogger {
    &NOOP_LOGGER
}

impl InfoWriter for NoopLogger {
    #[inline]
    fn info(&self, _message: &str, _kv: &[KeyValue]) {}
}

impl Logger for NoopLogger {
    #[inline]
    fn error(&self, _error: Option<&dyn Error>, _message: &str, _kv: &[KeyValue]) {}

    fn v(&self, _level: u32) -> &dyn InfoWriter {
        self
    }

    #[inline]
    fn set_level(&self, _level: u32) {}
}
