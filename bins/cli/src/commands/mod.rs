//! CLI command handlers.

pub mod config;
pub mod emit;

pub use config::{resolve_config, run_config_show};
pub use emit::{EmitInput, run_emit};
