//! # kvlog-config
//!
//! Logging configuration schema, env overrides, and loading.
//! This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_ANSI, ENV_FORMAT, ENV_MAX_LEVEL, ENV_NAME, ENV_OUTPUT, ENV_TIMESTAMPS, ENV_VERBOSITY,
    EnvParseError, LoggingEnv, apply_env_overrides,
};
pub use load::{
    load_logging_config_from_path, load_logging_config_from_sources, to_pretty_json,
    to_pretty_toml,
};
pub use schema::{
    BackendLevel, ConfigSchemaError, LogFormat, LogOutput, LoggingConfig, MAX_NAME_CHARS,
    UnknownVariant, parse_logging_config_json, parse_logging_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
