//! Structured logging boundary contract.

use std::collections::BTreeMap;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug.
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
}

/// Additional event fields.
pub type LogFields = BTreeMap<&'static str, serde_json::Value>;

/// Build a field map from `(key, value)` pairs.
pub fn log_fields<I, V>(pairs: I) -> LogFields
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<serde_json::Value>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key, value.into()))
        .collect()
}

/// Structured log event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent<'a> {
    /// Stable dotted event name, e.g. `walk.dir_read_failed`.
    pub event: &'a str,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: &'a str,
    /// Structured fields.
    pub fields: LogFields,
}

/// Boundary contract for structured logging.
pub trait LoggerPort: Send + Sync {
    /// Emit a structured event.
    fn log(&self, event: LogEvent<'_>);

    /// Convenience: debug event.
    fn debug(&self, event: &str, message: &str, fields: LogFields) {
        self.log(LogEvent {
            event,
            level: LogLevel::Debug,
            message,
            fields,
        });
    }

    /// Convenience: info event.
    fn info(&self, event: &str, message: &str, fields: LogFields) {
        self.log(LogEvent {
            event,
            level: LogLevel::Info,
            message,
            fields,
        });
    }

    /// Convenience: warn event.
    fn warn(&self, event: &str, message: &str, fields: LogFields) {
        self.log(LogEvent {
            event,
            level: LogLevel::Warn,
            message,
            fields,
        });
    }

    /// Convenience: error event.
    fn error(&self, event: &str, message: &str, fields: LogFields) {
        self.log(LogEvent {
            event,
            level: LogLevel::Error,
            message,
            fields,
        });
    }
}

/// Logger that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent<'_>) {}
}
