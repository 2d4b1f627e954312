use std::sync::{Arc, Mutex};

use super::{ExportLogs, ExportSpans};
use crate::protocol::{LogRecord, SpanMessage};

/// An exporter for testing that stores everything it receives in memory.
///
/// Useful for verifying that specific records and span messages were
/// generated.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tasklane_telemetry::TestExporter;
///
/// let exporter = Arc::new(TestExporter::default());
/// // hand `exporter` to a logger/tracer, then:
/// assert!(exporter.records().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct TestExporter {
    records: Mutex<Vec<LogRecord<'static>>>,
    spans: Mutex<Vec<SpanMessage<'static>>>,
}

impl TestExporter {
    /// Creates an empty exporter behind an [`Arc`], ready to clone into a
    /// logger and a tracer.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All log records received so far.
    pub fn records(&self) -> Vec<LogRecord<'static>> {
        self.records.lock().unwrap().clone()
    }

    /// All span messages received so far.
    pub fn spans(&self) -> Vec<SpanMessage<'static>> {
        self.spans.lock().unwrap().clone()
    }

    /// Removes and returns the received log records.
    pub fn take_records(&self) -> Vec<LogRecord<'static>> {
        self.records.lock().unwrap().drain(..).collect()
    }

    /// Removes and returns the received span messages.
    pub fn take_spans(&self) -> Vec<SpanMessage<'static>> {
        self.spans.lock().unwrap().drain(..).collect()
    }
}

impl ExportLogs for TestExporter {
    fn emit(&self, record: LogRecord<'_>) {
        self.records.lock().unwrap().push(record.into_owned());
    }
}

impl ExportSpans for TestExporter {
    fn export(&self, message: SpanMessage<'_>) {
        self.spans.lock().unwrap().push(message.into_owned());
    }
}
