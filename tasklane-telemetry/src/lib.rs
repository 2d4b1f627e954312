//! # `tasklane-telemetry`
//!
//! Severity-filtered task logging and tracing for the Tasklane runtime.
//!
//! Task-execution code gets one capability interface — [`TaskLogger`] — for
//! both leveled log emission and tracing spans. A configured minimum level
//! decides which messages are emitted; the disabled variant turns logging
//! into no-ops without changing a single call site.
//!
//! ## Basic usage
//!
//! ```rust
//! use std::sync::Arc;
//! use tasklane_telemetry::{
//!     properties, ConsoleJsonExporter, FilteredTaskLogger, LogLevel, SpanOptions,
//!     TaskLogger, TaskLoggerConfig, Tracer,
//! };
//!
//! let exporter = Arc::new(ConsoleJsonExporter::DEFAULT);
//! let logger = FilteredTaskLogger::new(TaskLoggerConfig {
//!     level: LogLevel::Info,
//!     exporter: exporter.clone(),
//!     tracer: Tracer::new(exporter),
//! });
//!
//! logger.info("task started", Some(&properties! { attempt = 1 }));
//! logger.debug("dropped, level is info", None);
//!
//! let result = logger.trace(
//!     "resize_image",
//!     |span| {
//!         span.add_event("loaded", Default::default());
//!         "done"
//!     },
//!     SpanOptions::default(),
//! );
//! assert_eq!(result, "done");
//! ```
//!
//! ## Disabling logging
//!
//! ```rust
//! use tasklane_telemetry::{NoopTaskLogger, SpanOptions, TaskLogger};
//!
//! let logger = NoopTaskLogger;
//! logger.error("goes nowhere", None);
//!
//! // `trace` still runs the function, with an inert span.
//! let value = logger.trace("step", |_span| 7, SpanOptions::default());
//! assert_eq!(value, 7);
//! ```
//!
//! ## Defensive property handling
//!
//! Property bags are sanitized through a serialize/deserialize round-trip
//! before flattening; captured errors become plain `{name, message, stack}`
//! records, and a bag that cannot be round-tripped is used as-is rather than
//! costing the log. A leveled call never fails.

pub mod clock;
pub mod export;
pub mod flatten;
pub mod future;
pub mod icons;
pub mod id;
pub mod level;
pub mod logger;
mod macros;
pub mod properties;
pub mod protocol;
mod span;
mod tracer;
pub mod value;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use export::{ConsoleJsonExporter, ConsolePrettyExporter, ExportLogs, ExportSpans};
#[doc(hidden)]
pub use export::TestExporter;
pub use flatten::flatten;
pub use icons::icon_for;
pub use id::{SpanContext, SpanId, TraceId};
pub use level::{LogLevel, ParseLogLevelError};
pub use logger::{
    AnyTaskLogger, FilteredTaskLogger, NoopTaskLogger, STYLE_ICON_ATTRIBUTE, TaskLogger,
    TaskLoggerConfig,
};
pub use properties::{ErrorDetails, Properties, PropertyValue};
pub use protocol::{LogRecord, Severity, SpanMessage};
pub use span::{Span, SpanOptions};
pub use tracer::Tracer;
pub use value::{AttributeValue, Attributes};
