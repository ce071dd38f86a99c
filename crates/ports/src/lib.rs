//! # kvlog-ports
//!
//! The leveled logging interface implemented by kvlog adapters.
//!
//! A [`Logger`] offers informational and error messages with structured
//! key/value fields, plus verbosity gating through [`Logger::v`]. Higher
//! verbosity numbers mean chattier, less urgent messages: `v(level)` hands
//! back a live writer only when `level` is at or below the configured
//! threshold, otherwise the shared [`NoopLogger`].
//!
//! ```
//! use kvlog_ports::{InfoWriter, Logger, NOOP_LOGGER, kv};
//!
//! fn report(logger: &dyn Logger) {
//!     logger.info("started", &kv!["port" => 8080]);
//!     logger.v(4).info("noisy detail", &[]);
//! }
//!
//! report(&NOOP_LOGGER);
//! ```
//!
//! This crate has no workspace dependencies.

pub mod fields;
pub mod logger;
pub mod noop;

pub use fields::{
    FieldsDisplay, FieldsJson, KeyValue, LogFields, display_fields, fields_from_kv, json_fields,
};
pub use logger::{InfoWriter, Logger};
pub use noop::{NOOP_LOGGER, NoopLogger, noop_logger};

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
