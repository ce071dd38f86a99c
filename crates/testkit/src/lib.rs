//! # kvlog-testkit
//!
//! Test helpers: an in-memory capture dispatch for the `tracing` backend and
//! a recording [`Logger`](kvlog_ports::Logger) double.
//! This crate depends on `ports` only.

pub mod capture;
pub mod recording;

pub use capture::{CaptureFormat, CapturedOutput, capture_dispatch, capture_dispatch_with_level};
pub use recording::{RecordedEntry, RecordedLevel, RecordingLogger};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
