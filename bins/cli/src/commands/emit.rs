//! `emit` command: write one log line through a [`Logger`].

use crate::CliOutput;
use crate::error::CliError;
use kvlog_ports::{KeyValue, Logger};
use serde_json::Value;
use std::fmt;

/// Parsed `emit` arguments.
#[derive(Debug, Default)]
pub struct EmitInput {
    pub message: String,
    pub level: u32,
    pub kv: Vec<String>,
    pub error: Option<String>,
}

/// Error value built from `--error`.
#[derive(Debug)]
struct EmittedError(String);

impl fmt::Display for EmittedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl std::error::Error for EmittedError {}

/// Run `emit` against the given logger.
pub fn run_emit(logger: &dyn Logger, input: &EmitInput) -> Result<CliOutput, CliError> {
    let kv = input
        .kv
        .iter()
        .map(|raw| parse_kv_arg(raw))
        .collect::<Result<Vec<_>, _>>()?;

    match &input.error {
        Some(message) => {
            let error = EmittedError(message.clone());
            logger.error(Some(&error), &input.message, &kv);
        },
        None => logger.v(input.level).info(&input.message, &kv),
    }

    Ok(CliOutput {
        stdout: String::new(),
    })
}

/// Parse a `key=value` argument. Values that parse as JSON keep their type.
fn parse_kv_arg(raw: &str) -> Result<KeyValue, CliError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(CliError::InvalidInput(format!("--kv expects key=value, got {raw:?}")));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidInput(format!("--kv key is empty in {raw:?}")));
    }

    let value = serde_json::from_str::<Value>(value)
        .unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok(KeyValue::new(key, value))
}
