//! Backend seams for log emission and span delivery.
//!
//! Loggers and tracers hand finished messages to these traits and move on;
//! delivery, buffering and transport are entirely the implementation's
//! concern. Implementations must not panic and must be safe to call from
//! multiple threads.
//!
//! # Built-in exporters
//!
//! - [`ConsoleJsonExporter`] — one JSON line per message on stdout.
//! - [`ConsolePrettyExporter`] — human-readable log lines on stderr.
//! - `TestExporter` — in-memory capture for tests.

mod json;
mod pretty;
mod test;

use core::fmt::Debug;

pub use json::ConsoleJsonExporter;
pub use pretty::ConsolePrettyExporter;
#[doc(hidden)]
pub use test::TestExporter;

use crate::protocol::{LogRecord, SpanMessage};

/// A log-emission backend.
///
/// `emit` is a synchronous hand-off: the call completes when the backend has
/// accepted the record, not when the record has been delivered anywhere.
/// Implementations never report failure back to the logger.
pub trait ExportLogs: Debug + Send + Sync {
    /// Accepts one finished log record.
    fn emit(&self, record: LogRecord<'_>);
}

/// A tracing backend receiving span lifecycle messages.
pub trait ExportSpans: Debug + Send + Sync {
    /// Accepts one span lifecycle message.
    fn export(&self, message: SpanMessage<'_>);
}
