//! In-memory capture of backend output.
//!
//! [`capture_dispatch`] builds a `tracing` dispatch that writes formatted
//! lines into a shared buffer instead of a real stream. Timestamps and ANSI
//! colors are disabled so assertions can match on exact text.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Shared, cloneable byte buffer usable as a `tracing-subscriber` writer.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the non-empty lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Parses every non-empty line as a JSON object.
    pub fn json_lines(&self) -> Result<Vec<serde_json::Value>, serde_json::Error> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line))
            .collect()
    }

    /// Returns the contents and empties the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Empties the buffer.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns true when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedOutput {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Line format of a capture dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFormat {
    /// `tracing-subscriber`'s default text format.
    Text,
    /// `tracing-subscriber`'s JSON format (fields nested under `fields`).
    Json,
}

/// Build a dispatch that records every event (any level) into a buffer.
pub fn capture_dispatch(format: CaptureFormat) -> (Dispatch, CapturedOutput) {
    capture_dispatch_with_level(format, LevelFilter::TRACE)
}

/// Like [`capture_dispatch`], with an explicit backend level filter.
pub fn capture_dispatch_with_level(
    format: CaptureFormat,
    max_level: LevelFilter,
) -> (Dispatch, CapturedOutput) {
    let output = CapturedOutput::new();
    let builder = tracing_subscriber::fmt()
        .with_writer(output.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(max_level);

    let dispatch = match format {
        CaptureFormat::Text => Dispatch::new(builder.finish()),
        CaptureFormat::Json => Dispatch::new(builder.json().finish()),
    };
    (dispatch, output)
}
