//! # kvlog-shared
//!
//! Shared error handling for the kvlog workspace.
//!
//! The logging path itself never fails. Errors only exist at the edges:
//! configuration loading and the CLI. Those edges report failures as an
//! [`ErrorEnvelope`] so callers can match on a stable [`ErrorCode`].
//!
//! This crate has no workspace dependencies.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;

pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, Result};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
