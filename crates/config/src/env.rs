//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict: a variable that is present but malformed fails fast
//! instead of silently falling back to a default.

use crate::schema::{BackendLevel, LogFormat, LogOutput, LoggingConfig};
use kvlog_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

/// Env var: verbosity threshold.
pub const ENV_VERBOSITY: &str = "KVLOG_VERBOSITY";
/// Env var: logger name (empty clears it).
pub const ENV_NAME: &str = "KVLOG_NAME";
/// Env var: output format (`text` | `json`).
pub const ENV_FORMAT: &str = "KVLOG_FORMAT";
/// Env var: destination stream (`stderr` | `stdout`).
pub const ENV_OUTPUT: &str = "KVLOG_OUTPUT";
/// Env var: backend severity filter.
pub const ENV_MAX_LEVEL: &str = "KVLOG_MAX_LEVEL";
/// Env var: ANSI colors.
pub const ENV_ANSI: &str = "KVLOG_ANSI";
/// Env var: timestamps.
pub const ENV_TIMESTAMPS: &str = "KVLOG_TIMESTAMPS";

const ALL_VARS: [&str; 7] = [
    ENV_VERBOSITY,
    ENV_NAME,
    ENV_FORMAT,
    ENV_OUTPUT,
    ENV_MAX_LEVEL,
    ENV_ANSI,
    ENV_TIMESTAMPS,
];

/// Typed env-derived overrides for [`LoggingConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingEnv {
    /// Override for `verbosity`.
    pub verbosity: Option<u32>,
    /// Override for `name`. An empty value clears the name.
    pub name: Option<Box<str>>,
    /// Override for `format`.
    pub format: Option<LogFormat>,
    /// Override for `output`.
    pub output: Option<LogOutput>,
    /// Override for `maxLevel`.
    pub max_level: Option<BackendLevel>,
    /// Override for `ansi`.
    pub ansi: Option<bool>,
    /// Override for `timestamps`.
    pub timestamps: Option<bool>,
}

impl LoggingEnv {
    /// Parse overrides from an explicit variable map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            verbosity: parse_optional_u32(map, ENV_VERBOSITY)?,
            name: map.get(ENV_NAME).map(|raw| raw.trim().into()),
            format: parse_optional_enum(map, ENV_FORMAT)?,
            output: parse_optional_enum(map, ENV_OUTPUT)?,
            max_level: parse_optional_enum(map, ENV_MAX_LEVEL)?,
            ansi: parse_optional_bool(map, ENV_ANSI)?,
            timestamps: parse_optional_bool(map, ENV_TIMESTAMPS)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        Self::from_lookup(std::env::var_os)
    }

    /// Parse overrides from a raw variable lookup.
    ///
    /// A set variable that is not valid Unicode is an error, not unset.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, EnvParseError>
    where
        F: FnMut(&'static str) -> Option<OsString>,
    {
        let mut map = BTreeMap::new();
        for var in ALL_VARS {
            let Some(raw) = lookup(var) else {
                continue;
            };
            let value = raw
                .into_string()
                .map_err(|raw| EnvParseError::InvalidUnicode {
                    var,
                    value: raw.to_string_lossy().into_owned(),
                })?;
            map.insert(var.to_owned(), value);
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Apply env overrides on top of a config, then validate the result.
pub fn apply_env_overrides(
    mut config: LoggingConfig,
    env: &LoggingEnv,
) -> Result<LoggingConfig, ErrorEnvelope> {
    if let Some(verbosity) = env.verbosity {
        config.verbosity = verbosity;
    }
    if let Some(name) = &env.name {
        config.name = Some(name.clone());
    }
    if let Some(format) = env.format {
        config.format = format;
    }
    if let Some(output) = env.output {
        config.output = output;
    }
    if let Some(max_level) = env.max_level {
        config.max_level = max_level;
    }
    if let Some(ansi) = env.ansi {
        config.ansi = ansi;
    }
    if let Some(timestamps) = env.timestamps {
        config.timestamps = timestamps;
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Env var was set to a value that is not valid Unicode.
    InvalidUnicode {
        /// Env var name.
        var: &'static str,
        /// Lossy rendering of the raw value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::InvalidUnicode { .. } => ErrorCode::new("config", "invalid_env_unicode"),
        }
    }

    /// Returns the offending variable name.
    #[must_use]
    pub const fn var(&self) -> &'static str {
        match self {
            Self::EmptyValue { var }
            | Self::InvalidBool { var, .. }
            | Self::InvalidInt { var, .. }
            | Self::InvalidEnum { var, .. }
            | Self::InvalidUnicode { var, .. } => var,
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidInt { var, .. } => {
                write!(formatter, "{var} must be a non-negative integer")
            },
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
            Self::InvalidUnicode { var, .. } => write!(formatter, "{var} must be valid unicode"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message).with_metadata("env_var", error.var());

        match error {
            EnvParseError::EmptyValue { .. } => envelope,
            EnvParseError::InvalidBool { value, .. }
            | EnvParseError::InvalidInt { value, .. }
            | EnvParseError::InvalidEnum { value, .. }
            | EnvParseError::InvalidUnicode { value, .. } => envelope.with_metadata("value", value),
        }
    }
}

fn non_empty<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed))
}

fn parse_optional_u32(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u32>, EnvParseError> {
    let Some(trimmed) = non_empty(map, var)? else {
        return Ok(None);
    };

    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: trimmed.to_owned(),
        })
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(trimmed) = non_empty(map, var)? else {
        return Ok(None);
    };

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: trimmed.to_owned(),
        }),
    }
}

fn parse_optional_enum<T: FromStr>(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<T>, EnvParseError> {
    let Some(trimmed) = non_empty(map, var)? else {
        return Ok(None);
    };

    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidEnum {
            var,
            value: trimmed.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn missing_vars_parse_to_empty_overrides() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv::from_map(&BTreeMap::new())?;
        assert!(env.is_empty());
        Ok(())
    }

    #[test]
    fn all_vars_parse() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv::from_map(&env_map(&[
            (ENV_VERBOSITY, " 7 "),
            (ENV_NAME, "api"),
            (ENV_FORMAT, "json"),
            (ENV_OUTPUT, "stdout"),
            (ENV_MAX_LEVEL, "debug"),
            (ENV_ANSI, "yes"),
            (ENV_TIMESTAMPS, "off"),
        ]))?;

        assert_eq!(env.verbosity, Some(7));
        assert_eq!(env.name.as_deref(), Some("api"));
        assert_eq!(env.format, Some(LogFormat::Json));
        assert_eq!(env.output, Some(LogOutput::Stdout));
        assert_eq!(env.max_level, Some(BackendLevel::Debug));
        assert_eq!(env.ansi, Some(true));
        assert_eq!(env.timestamps, Some(false));
        Ok(())
    }

    #[test]
    fn negative_verbosity_is_rejected() {
        let error = LoggingEnv::from_map(&env_map(&[(ENV_VERBOSITY, "-1")])).err();
        assert_eq!(
            error,
            Some(EnvParseError::InvalidInt {
                var: ENV_VERBOSITY,
                value: "-1".to_owned(),
            })
        );
    }

    #[test]
    fn empty_numeric_value_is_rejected() {
        let error = LoggingEnv::from_map(&env_map(&[(ENV_VERBOSITY, "  ")])).err();
        assert_eq!(error, Some(EnvParseError::EmptyValue { var: ENV_VERBOSITY }));
    }

    #[test]
    fn invalid_enum_and_bool_are_rejected() {
        let format = LoggingEnv::from_map(&env_map(&[(ENV_FORMAT, "xml")])).err();
        assert!(matches!(format, Some(EnvParseError::InvalidEnum { var: ENV_FORMAT, .. })));

        let ansi = LoggingEnv::from_map(&env_map(&[(ENV_ANSI, "maybe")])).err();
        assert!(matches!(ansi, Some(EnvParseError::InvalidBool { var: ENV_ANSI, .. })));
    }

    #[test]
    fn empty_name_clears_configured_name() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv::from_map(&env_map(&[(ENV_NAME, "")]))?;
        let config = LoggingConfig {
            name: Some("from-file".into()),
            ..LoggingConfig::default()
        };
        let config = apply_env_overrides(config, &env)?;
        assert_eq!(config.name, None);
        Ok(())
    }

    #[test]
    fn lookup_reads_only_known_vars() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv::from_lookup(|var| match var {
            ENV_VERBOSITY => Some(OsString::from("4")),
            ENV_FORMAT => Some(OsString::from("json")),
            _ => None,
        })?;
        assert_eq!(env.verbosity, Some(4));
        assert_eq!(env.format, Some(LogFormat::Json));
        assert_eq!(env.name, None);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_value_is_rejected_not_ignored() {
        use std::os::unix::ffi::OsStringExt;

        let error = LoggingEnv::from_lookup(|var| {
            (var == ENV_VERBOSITY).then(|| OsString::from_vec(vec![b'3', 0xff]))
        })
        .err();
        assert_eq!(
            error.as_ref().map(EnvParseError::var),
            Some(ENV_VERBOSITY)
        );
        assert!(matches!(error, Some(EnvParseError::InvalidUnicode { .. })));

        let envelope = error.map(ErrorEnvelope::from);
        assert_eq!(
            envelope.map(|envelope| envelope.code),
            Some(ErrorCode::new("config", "invalid_env_unicode"))
        );
    }

    #[test]
    fn env_errors_convert_to_envelopes() {
        let envelope = ErrorEnvelope::from(EnvParseError::InvalidInt {
            var: ENV_VERBOSITY,
            value: "lots".to_owned(),
        });
        assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_int"));
        assert_eq!(
            envelope.metadata.get("env_var").map(String::as_str),
            Some(ENV_VERBOSITY)
        );
        assert_eq!(
            envelope.metadata.get("value").map(String::as_str),
            Some("lots")
        );
    }
}
