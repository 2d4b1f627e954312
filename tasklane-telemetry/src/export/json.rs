use super::{ExportLogs, ExportSpans};
use crate::protocol::{LogRecord, SpanMessage};

/// An exporter that writes each message as one JSON line on stdout.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tasklane_telemetry::{ConsoleJsonExporter, Tracer};
///
/// let tracer = Tracer::new(Arc::new(ConsoleJsonExporter::DEFAULT));
/// ```
#[derive(Debug, Default)]
pub struct ConsoleJsonExporter(());

impl ConsoleJsonExporter {
    /// A `const` version of `ConsoleJsonExporter::default()` to allow use as a `&'static`.
    pub const DEFAULT: Self = ConsoleJsonExporter(());
}

impl ExportLogs for ConsoleJsonExporter {
    fn emit(&self, record: LogRecord<'_>) {
        if let Ok(json) = serde_json::to_string(&record) {
            println!("{json}");
        }
    }
}

impl ExportSpans for ConsoleJsonExporter {
    fn export(&self, message: SpanMessage<'_>) {
        if let Ok(json) = serde_json::to_string(&message) {
            println!("{json}");
        }
    }
}
