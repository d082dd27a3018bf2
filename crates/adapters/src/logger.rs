//! Structured logger adapter backed by `tracing`.
//!
//! Events keep their stable dotted name in the `event` field and carry the
//! port fields as one JSON object, so both the text and JSON subscriber
//! formats stay greppable.

use serde_json::Value;
use stepdoc_ports::{LogEvent, LogFields, LogLevel, LoggerPort};

/// Logger forwarding port events to the active `tracing` subscriber.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    base_fields: LogFields,
}

impl TracingLogger {
    /// Create a logger with no base fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }
}

impl LoggerPort for TracingLogger {
    fn log(&self, event: LogEvent<'_>) {
        let mut fields = self.base_fields.clone();
        fields.extend(event.fields);
        let fields = render_fields(&fields);
        let name = event.event;
        let message = event.message;

        match event.level {
            LogLevel::Debug => tracing::debug!(event = name, fields = %fields, "{message}"),
            LogLevel::Info => tracing::info!(event = name, fields = %fields, "{message}"),
            LogLevel::Warn => tracing::warn!(event = name, fields = %fields, "{message}"),
            LogLevel::Error => tracing::error!(event = name, fields = %fields, "{message}"),
        }
    }
}

fn render_fields(fields: &LogFields) -> String {
    let object: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect();
    Value::Object(object).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use stepdoc_ports::log_fields;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Ok(mut inner) = self.0.lock() {
                inner.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            self.0
                .lock()
                .map(|inner| String::from_utf8_lossy(&inner).into_owned())
                .unwrap_or_default()
        }
    }

    fn capture_with<F: FnOnce()>(max_level: tracing::Level, action: F) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, action);
        capture.contents()
    }

    #[test]
    fn events_carry_name_message_and_fields() {
        let logger = TracingLogger::new().with_base_fields(log_fields([("item", "7")]));
        let output = capture_with(tracing::Level::DEBUG, || {
            logger.warn(
                "assemble.file_skipped",
                "file missing",
                log_fields([("label", "repo/a.ts")]),
            );
        });

        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("assemble.file_skipped"), "{output}");
        assert!(output.contains("file missing"), "{output}");
        assert!(output.contains("repo/a.ts"), "{output}");
        assert!(output.contains("\"item\""), "{output}");
    }

    #[test]
    fn subscriber_level_filters_events() {
        let logger = TracingLogger::new();
        let output = capture_with(tracing::Level::WARN, || {
            logger.debug("walk.dir_entered", "entered", LogFields::new());
            logger.error("assemble.output_failed", "boom", LogFields::new());
        });

        assert!(!output.contains("walk.dir_entered"), "{output}");
        assert!(output.contains("assemble.output_failed"), "{output}");
    }

    #[test]
    fn event_fields_override_base_fields() {
        let logger = TracingLogger::new().with_base_fields(log_fields([("label", "base")]));
        let output = capture_with(tracing::Level::INFO, || {
            logger.info("checksum.file", "hashed", log_fields([("label", "event")]));
        });

        assert!(output.contains("event"), "{output}");
        assert!(!output.contains("\\\"base\\\""), "{output}");
        assert!(!output.contains("\"base\""), "{output}");
    }
}
