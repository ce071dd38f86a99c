//! Logging configuration schema.
//!
//! The schema describes how a caller wants the backend built (format,
//! destination, backend level filter) and how the leveled logger is set up
//! (verbosity threshold, optional name). Parsing is strict: unknown fields
//! are rejected.

use kvlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum accepted logger name length (in chars).
pub const MAX_NAME_CHARS: usize = 256;

/// Output format of the backend subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable single-line text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Destination stream of the backend subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

/// Most verbose severity the backend subscriber lets through.
///
/// This filter lives in the backend and is independent of the leveled
/// logger's verbosity threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendLevel {
    /// Everything.
    Trace,
    /// Debug and above.
    Debug,
    /// Info and above.
    #[default]
    Info,
    /// Warnings and errors.
    Warn,
    /// Errors only.
    Error,
}

impl BackendLevel {
    /// Returns the lowercase label used in config files and env vars.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for BackendLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when a textual enum value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported value: {value}")]
pub struct UnknownVariant {
    /// Raw input.
    pub value: String,
}

impl FromStr for LogFormat {
    type Err = UnknownVariant;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(UnknownVariant {
                value: input.to_owned(),
            }),
        }
    }
}

impl FromStr for LogOutput {
    type Err = UnknownVariant;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "stderr" => Ok(Self::Stderr),
            "stdout" => Ok(Self::Stdout),
            _ => Err(UnknownVariant {
                value: input.to_owned(),
            }),
        }
    }
}

impl FromStr for BackendLevel {
    type Err = UnknownVariant;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(UnknownVariant {
                value: input.to_owned(),
            }),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Verbosity threshold of the leveled logger.
    pub verbosity: u32,
    /// Optional logger name attached to every line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Box<str>>,
    /// Backend output format.
    pub format: LogFormat,
    /// Backend destination stream.
    pub output: LogOutput,
    /// Backend severity filter.
    pub max_level: BackendLevel,
    /// Emit ANSI colors.
    pub ansi: bool,
    /// Prefix lines with a timestamp.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            name: None,
            format: LogFormat::Text,
            output: LogOutput::Stderr,
            max_level: BackendLevel::Info,
            ansi: false,
            timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Validate and normalize the config.
    ///
    /// The name is trimmed and an empty name becomes `None`.
    pub fn validate_and_normalize(mut self) -> Result<Self, ConfigSchemaError> {
        self.name = match self.name.take() {
            None => None,
            Some(name) => normalize_name(&name)?,
        };
        Ok(self)
    }
}

fn normalize_name(raw: &str) -> Result<Option<Box<str>>, ConfigSchemaError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ConfigSchemaError::InvalidName {
            name: trimmed.to_owned(),
        });
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_CHARS {
        return Err(ConfigSchemaError::NameTooLong {
            len,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(Some(trimmed.into()))
}

/// Validation failures for [`LoggingConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigSchemaError {
    /// The logger name contains control characters.
    #[error("name must not contain control characters")]
    InvalidName {
        /// Offending name.
        name: String,
    },
    /// The logger name exceeds the length limit.
    #[error("name is too long ({len} chars, max {max})")]
    NameTooLong {
        /// Name length in chars.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let message = error.to_string();
        match error {
            ConfigSchemaError::InvalidName { name } => {
                Self::expected(ErrorCode::new("config", "invalid_name"), message)
                    .with_metadata("name", name.escape_debug().to_string())
            },
            ConfigSchemaError::NameTooLong { len, max } => {
                Self::expected(ErrorCode::new("config", "name_too_long"), message)
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string())
            },
        }
    }
}

/// Parse a logging config from a TOML string, applying validation and normalization.
pub fn parse_logging_config_toml(input: &str) -> Result<LoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a logging config from a JSON string, applying validation and normalization.
pub fn parse_logging_config_json(input: &str) -> Result<LoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}
