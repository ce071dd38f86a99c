//! A [`Logger`] that records calls in memory.

use kvlog_ports::{InfoWriter, KeyValue, LogFields, Logger, NOOP_LOGGER, fields_from_kv};
use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Severity of a recorded entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedLevel {
    /// Recorded through [`InfoWriter::info`].
    Info,
    /// Recorded through [`Logger::error`].
    Error,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEntry {
    /// Severity.
    pub level: RecordedLevel,
    /// Message text.
    pub message: String,
    /// Key/value pairs after last-wins deduplication.
    pub fields: LogFields,
    /// Rendered error, if one was passed.
    pub error: Option<String>,
}

/// Records every emitted entry, gating `v` like the real adapter.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    verbosity: AtomicU32,
    entries: Mutex<Vec<RecordedEntry>>,
}

impl RecordingLogger {
    /// Create a recorder with the given verbosity threshold.
    pub fn new(verbosity: u32) -> Self {
        Self {
            verbosity: AtomicU32::new(verbosity),
            entries: Mutex::default(),
        }
    }

    /// Returns the current verbosity threshold.
    pub fn verbosity(&self) -> u32 {
        self.verbosity.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the recorded entries.
    pub fn entries(&self) -> Vec<RecordedEntry> {
        self.lock().clone()
    }

    /// Returns the recorded entries and clears the log.
    pub fn take(&self) -> Vec<RecordedEntry> {
        std::mem::take(&mut *self.lock())
    }

    fn record(&self, level: RecordedLevel, message: &str, kv: &[KeyValue], error: Option<String>) {
        self.lock().push(RecordedEntry {
            level,
            message: message.to_owned(),
            fields: fields_from_kv(kv),
            error,
        });
    }
}

impl InfoWriter for RecordingLogger {
    fn info(&self, message: &str, kv: &[KeyValue]) {
        self.record(RecordedLevel::Info, message, kv, None);
    }
}

impl Logger for RecordingLogger {
    fn error(&self, error: Option<&dyn Error>, message: &str, kv: &[KeyValue]) {
        self.record(
            RecordedLevel::Error,
            message,
            kv,
            error.map(ToString::to_string),
        );
    }

    fn v(&self, level: u32) -> &dyn InfoWriter {
        if level > self.verbosity() {
            return &NOOP_LOGGER;
        }
        self
    }

    fn set_level(&self, level: u32) {
        self.verbosity.store(level, Ordering::Relaxed);
    }
}
