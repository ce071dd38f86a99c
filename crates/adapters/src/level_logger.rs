//! Leveled logger adapter over a `tracing` dispatch.

use kvlog_ports::{
    FieldsDisplay, FieldsJson, InfoWriter, KeyValue, LogFields, Logger, NOOP_LOGGER,
    display_fields, fields_from_kv, json_fields,
};
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::Dispatch;
use tracing::field;

/// Field key carrying the configured logger name.
pub const LOGGER_LABEL: &str = "logger";

/// Target used for every event emitted by [`LevelLogger`].
pub const LOG_TARGET: &str = "kvlog";

/// How the `kv` field is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldEncoding {
    /// Space separated `key=value` pairs.
    #[default]
    Text,
    /// A compact JSON object; values keep their types.
    Json,
}

/// Logger binding a `tracing` dispatch, a verbosity threshold and an
/// optional name.
///
/// Every call is emitted under the bound dispatch, independent of the
/// thread's or process's default subscriber. Key/value pairs are attached
/// as a single `kv` field and errors as an `error` field.
#[derive(Debug)]
pub struct LevelLogger {
    dispatch: Dispatch,
    name: Option<Box<str>>,
    verbosity: AtomicU32,
    encoding: FieldEncoding,
}

impl LevelLogger {
    /// Create a logger over an already configured dispatch.
    ///
    /// A `Some("")` name is treated like `None`.
    #[must_use]
    pub fn new(dispatch: Dispatch, verbosity: u32, name: Option<&str>) -> Self {
        Self {
            dispatch,
            name: name.filter(|name| !name.is_empty()).map(Box::from),
            verbosity: AtomicU32::new(verbosity),
            encoding: FieldEncoding::Text,
        }
    }

    /// Select how the `kv` field is rendered.
    #[must_use]
    pub fn with_field_encoding(mut self, encoding: FieldEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Create a logger over the dispatch that is current for this thread.
    #[must_use]
    pub fn with_current_dispatch(verbosity: u32, name: Option<&str>) -> Self {
        let dispatch = tracing::dispatcher::get_default(Dispatch::clone);
        Self::new(dispatch, verbosity, name)
    }

    /// Returns the configured name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the current verbosity threshold.
    #[must_use]
    pub fn verbosity(&self) -> u32 {
        self.verbosity.load(Ordering::Relaxed)
    }

    /// Returns the `kv` field encoding.
    #[must_use]
    pub const fn field_encoding(&self) -> FieldEncoding {
        self.encoding
    }

    fn fields(&self, kv: &[KeyValue]) -> LogFields {
        let mut fields = fields_from_kv(kv);
        // The name goes in last so it wins over a caller supplied key.
        if let Some(name) = &self.name {
            fields.insert(LOGGER_LABEL.into(), Value::String(name.to_string()));
        }
        fields
    }

    fn render<'a>(&self, fields: &'a LogFields) -> Option<RenderedFields<'a>> {
        if fields.is_empty() {
            return None;
        }
        Some(match self.encoding {
            FieldEncoding::Text => RenderedFields::Text(display_fields(fields)),
            FieldEncoding::Json => RenderedFields::Json(json_fields(fields)),
        })
    }
}

enum RenderedFields<'a> {
    Text(FieldsDisplay<'a>),
    Json(FieldsJson<'a>),
}

impl fmt::Display for RenderedFields<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(fields) => fmt::Display::fmt(fields, formatter),
            Self::Json(fields) => fmt::Display::fmt(fields, formatter),
        }
    }
}

impl InfoWriter for LevelLogger {
    fn info(&self, message: &str, kv: &[KeyValue]) {
        let fields = self.fields(kv);
        let rendered = self.render(&fields);
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::event!(
                target: LOG_TARGET,
                tracing::Level::INFO,
                kv = rendered.as_ref().map(field::display),
                "{}",
                message
            );
        });
    }
}

impl Logger for LevelLogger {
    fn error(&self, error: Option<&dyn Error>, message: &str, kv: &[KeyValue]) {
        let fields = self.fields(kv);
        let rendered = self.render(&fields);
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::event!(
                target: LOG_TARGET,
                tracing::Level::ERROR,
                kv = rendered.as_ref().map(field::display),
                error = error.map(field::display),
                "{}",
                message
            );
        });
    }

    fn v(&self, level: u32) -> &dyn InfoWriter {
        if level > self.verbosity() {
            return &NOOP_LOGGER;
        }
        self
    }

    fn set_level(&self, level: u32) {
        self.verbosity.store(level, Ordering::Relaxed);
    }
}
