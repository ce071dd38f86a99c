//! Global logging flags shared by every command.

use clap::{Args, ValueEnum};
use kvlog_config::LogFormat;
use std::path::PathBuf;

/// Backend format choices accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-friendly text lines.
    Text,
    /// One JSON object per line.
    Json,
}

impl From<FormatArg> for LogFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Logging-related CLI flags. Flags win over env, env wins over the file.
#[derive(Debug, Default, Args)]
pub struct LoggingArgs {
    /// Config file path (JSON/TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Verbosity threshold; `--v` levels above it are dropped.
    #[arg(long, global = true)]
    pub verbosity: Option<u32>,
    /// Logger name attached to every line (empty clears it).
    #[arg(long, global = true)]
    pub name: Option<String>,
    /// Backend output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<FormatArg>,
}
