//! CLI binary entrypoint.

mod args;
mod commands;
mod error;

use args::LoggingArgs;
use clap::{Parser, Subcommand};
use commands::{EmitInput, resolve_config, run_config_show, run_emit};
use error::CliError;
use kvlog_adapters::build_logger;
use kvlog_config::LoggingEnv;
use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(
    name = "kvlog",
    version,
    about = "Leveled key/value logging over a tracing backend",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    logging: LoggingArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Emit one log line through the configured logger.
    Emit {
        /// Log message.
        #[arg(long)]
        message: String,
        /// Verbosity level of the line; dropped when above the threshold.
        #[arg(long = "v", default_value_t = 0)]
        level: u32,
        /// Key/value pair (`key=value`); repeatable. JSON values keep their type.
        #[arg(long = "kv", value_name = "KEY=VALUE")]
        kv: Vec<String>,
        /// Emit at error severity with this error text.
        #[arg(long)]
        error: Option<String>,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config (flags > env > file > defaults).
    Show {
        /// Print TOML instead of JSON.
        #[arg(long)]
        toml: bool,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli) -> Result<CliOutput, CliError> {
    let env = LoggingEnv::from_std_env().map_err(|error| CliError::Config(error.into()))?;
    let config = resolve_config(&cli.logging, &env)?;

    match &cli.command {
        Commands::Emit {
            message,
            level,
            kv,
            error,
        } => {
            let logger = build_logger(&config);
            let input = EmitInput {
                message: message.clone(),
                level: *level,
                kv: kv.clone(),
                error: error.clone(),
            };
            run_emit(&logger, &input)
        },
        Commands::Config {
            command: ConfigCommands::Show { toml },
        } => run_config_show(&config, *toml),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
