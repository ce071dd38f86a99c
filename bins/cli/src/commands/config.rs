//! Effective config resolution and the `config show` command.

use crate::CliOutput;
use crate::args::LoggingArgs;
use crate::error::CliError;
use kvlog_config::{
    LoggingConfig, LoggingEnv, load_logging_config_from_path, to_pretty_json, to_pretty_toml,
};

/// Resolve the effective config: flags over env over file over defaults.
pub fn resolve_config(args: &LoggingArgs, env: &LoggingEnv) -> Result<LoggingConfig, CliError> {
    let mut config = load_logging_config_from_path(args.config.as_deref(), env)?;

    if let Some(verbosity) = args.verbosity {
        config.verbosity = verbosity;
    }
    if let Some(name) = &args.name {
        config.name = Some(name.as_str().into());
    }
    if let Some(format) = args.format {
        config.format = format.into();
    }

    config
        .validate_and_normalize()
        .map_err(|error| CliError::Config(error.into()))
}

/// Run `config show`.
pub fn run_config_show(config: &LoggingConfig, as_toml: bool) -> Result<CliOutput, CliError> {
    let stdout = if as_toml {
        to_pretty_toml(config)?
    } else {
        to_pretty_json(config)?
    };

    Ok(CliOutput { stdout })
}
