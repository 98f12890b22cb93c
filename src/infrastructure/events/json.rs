//! JSON Event Sink
//!
//! Outputs DNS events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DnsEvent, DnsEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs one JSON object per line
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl DnsEventSink for JsonEventSink {
    fn on_event(&self, event: DnsEvent) {
        let mut value = match serde_json::to_value(&event) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode DNS event");
                return;
            }
        };
        if let DnsEvent::Completed { failed, .. } = &event {
            let status = if *failed == 0 { "success" } else { "partial" };
            value["status"] = serde_json::Value::from(status);
        }

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", value);
            let _ = writer.flush();
        }
    }
}
