//! Backend construction: turn a [`LoggingConfig`] into a `tracing` dispatch.
//!
//! The dispatch is never installed globally. Each [`LevelLogger`] carries its
//! own, so several differently configured loggers can coexist in one process.

use crate::level_logger::{FieldEncoding, LevelLogger};
use kvlog_config::{BackendLevel, LogFormat, LogOutput, LoggingConfig};
use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Map the configured backend level onto a `tracing` filter.
#[must_use]
pub const fn level_filter(level: BackendLevel) -> LevelFilter {
    match level {
        BackendLevel::Trace => LevelFilter::TRACE,
        BackendLevel::Debug => LevelFilter::DEBUG,
        BackendLevel::Info => LevelFilter::INFO,
        BackendLevel::Warn => LevelFilter::WARN,
        BackendLevel::Error => LevelFilter::ERROR,
    }
}

/// Build a dispatch writing to an arbitrary writer.
///
/// `config.output` is ignored; the writer decides where lines go.
pub fn dispatch_with_writer<W>(config: &LoggingConfig, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(config.ansi)
        .with_max_level(level_filter(config.max_level));

    match (config.format, config.timestamps) {
        (LogFormat::Text, true) => Dispatch::new(builder.finish()),
        (LogFormat::Text, false) => Dispatch::new(builder.without_time().finish()),
        (LogFormat::Json, true) => Dispatch::new(builder.json().finish()),
        (LogFormat::Json, false) => Dispatch::new(builder.without_time().json().finish()),
    }
}

/// Build a dispatch writing to the configured standard stream.
pub fn build_dispatch(config: &LoggingConfig) -> Dispatch {
    match config.output {
        LogOutput::Stderr => dispatch_with_writer(config, std::io::stderr),
        LogOutput::Stdout => dispatch_with_writer(config, std::io::stdout),
    }
}

/// Map the output format onto the `kv` field encoding.
#[must_use]
pub const fn field_encoding(format: LogFormat) -> FieldEncoding {
    match format {
        LogFormat::Text => FieldEncoding::Text,
        LogFormat::Json => FieldEncoding::Json,
    }
}

/// Build a leveled logger (dispatch, verbosity and name) from a config.
///
/// JSON output renders the `kv` field as a JSON object.
pub fn build_logger(config: &LoggingConfig) -> LevelLogger {
    LevelLogger::new(
        build_dispatch(config),
        config.verbosity,
        config.name.as_deref(),
    )
    .with_field_encoding(field_encoding(config.format))
}
