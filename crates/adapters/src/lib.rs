//! # kvlog-adapters
//!
//! Binds the [`Logger`](kvlog_ports::Logger) interface to a `tracing`
//! backend and builds that backend from a
//! [`LoggingConfig`](kvlog_config::LoggingConfig).
//! This crate depends on `ports` and `config`.

pub mod dispatch;
pub mod level_logger;

pub use dispatch::{
    build_dispatch, build_logger, dispatch_with_writer, field_encoding, level_filter,
};
pub use level_logger::{FieldEncoding, LOG_TARGET, LOGGER_LABEL, LevelLogger};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
