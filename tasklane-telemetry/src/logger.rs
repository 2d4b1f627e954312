//! The task logger capability interface and its two variants.
//!
//! Task code holds a [`TaskLogger`] and calls leveled methods or
//! `trace`/`start_span` without caring whether logging is enabled:
//!
//! - [`FilteredTaskLogger`] filters by a configured minimum level, sanitizes
//!   and flattens properties, and forwards records to the emission backend.
//! - [`NoopTaskLogger`] drops every leveled call outright while keeping
//!   `trace` semantics intact through inert spans.
//!
//! The variant is chosen once at construction; [`AnyTaskLogger`] is the
//! closed union for code that stores the choice.
//!
//! Leveled calls never fail and never panic: a property bag that cannot be
//! serialized falls back to its unsanitized form rather than dropping the
//! record, and backend failures are the backend's concern.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::export::ExportLogs;
use crate::flatten::flatten;
use crate::icons::{IconLookup, icon_for};
use crate::level::LogLevel;
use crate::properties::Properties;
use crate::protocol::{LogRecord, Severity};
use crate::span::{Span, SpanOptions};
use crate::tracer::Tracer;
use crate::value::AttributeValue;

/// Reserved attribute key carrying the severity's display icon.
///
/// Namespaced under `tasklane.` so it cannot collide with user attributes,
/// whose key segments all come from the property bag.
pub const STYLE_ICON_ATTRIBUTE: &str = "tasklane.style.icon";

/// The capability interface task code logs and traces through.
///
/// Leveled methods may emit a record as a side effect and never fail.
/// `trace` runs a function with an active span and returns its result;
/// `start_span` hands out a span without activating it.
pub trait TaskLogger {
    /// Logs at `debug` severity.
    fn debug(&self, message: &str, properties: Option<&Properties>);

    /// Logs at `log` severity (filtered like `info`).
    fn log(&self, message: &str, properties: Option<&Properties>);

    /// Logs at `info` severity.
    fn info(&self, message: &str, properties: Option<&Properties>);

    /// Logs at `warn` severity.
    fn warn(&self, message: &str, properties: Option<&Properties>);

    /// Logs at `error` severity.
    fn error(&self, message: &str, properties: Option<&Properties>);

    /// Runs `f` with an active span and returns its result.
    ///
    /// Failures inside `f` propagate to the caller unchanged.
    fn trace<T>(&self, name: &str, f: impl FnOnce(&Span) -> T, options: SpanOptions) -> T;

    /// Starts a span without activating it.
    fn start_span(&self, name: &str, options: SpanOptions) -> Span;
}

/// Configuration for a [`FilteredTaskLogger`]. Immutable after construction.
#[derive(Debug)]
pub struct TaskLoggerConfig {
    /// Minimum level; calls below it are dropped.
    pub level: LogLevel,

    /// The log-emission backend.
    pub exporter: Arc<dyn ExportLogs>,

    /// The tracing handle `trace`/`start_span` delegate to.
    pub tracer: Tracer,
}

/// The active logger variant: severity-filtered, property-sanitizing,
/// backend-emitting.
#[derive(Clone, Debug)]
pub struct FilteredTaskLogger {
    // The configured level's rank, resolved once here and reused for every
    // filtering decision.
    rank: u8,
    exporter: Arc<dyn ExportLogs>,
    tracer: Tracer,
    clock: Arc<dyn Clock>,
    icon_lookup: IconLookup,
}

impl FilteredTaskLogger {
    /// Creates a logger from its configuration.
    pub fn new(config: TaskLoggerConfig) -> Self {
        Self {
            rank: config.level.rank(),
            exporter: config.exporter,
            tracer: config.tracer,
            clock: Arc::new(SystemClock::new()),
            icon_lookup: icon_for,
        }
    }

    /// Replaces the clock. Mainly for tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the severity→icon lookup.
    pub fn with_icon_lookup(mut self, icon_lookup: IconLookup) -> Self {
        self.icon_lookup = icon_lookup;
        self
    }

    fn emit_log(&self, severity: Severity, message: &str, properties: Option<&Properties>) {
        if self.rank < severity.filter_rank() {
            return;
        }

        let timestamp = self.clock.now();

        let mut attributes = match properties {
            Some(properties) => flatten(&sanitize(properties)),
            None => Default::default(),
        };

        if let Some(icon) = (self.icon_lookup)(severity) {
            attributes.insert(STYLE_ICON_ATTRIBUTE.to_owned(), AttributeValue::from(icon));
        }

        self.exporter
            .emit(LogRecord::new(severity, message, attributes, timestamp));
    }
}

/// Produces the sanitized copy of a property bag that gets flattened into
/// record attributes.
///
/// The copy is a serialize/deserialize round-trip through JSON; captured
/// error values are rewritten to plain `{name, message, stack}` records on
/// the way out. If the round-trip fails — a bag nested beyond the parser's
/// recursion limit, for instance — the original bag is used as-is. The
/// fallback is designed behavior, not an exception path: a log is never
/// dropped because its properties would not serialize.
fn sanitize(properties: &Properties) -> serde_json::Value {
    match serde_json::to_string(properties).and_then(|json| serde_json::from_str(&json)) {
        Ok(value) => value,
        Err(_) => properties.raw_json(),
    }
}

impl TaskLogger for FilteredTaskLogger {
    fn debug(&self, message: &str, properties: Option<&Properties>) {
        self.emit_log(Severity::Debug, message, properties);
    }

    fn log(&self, message: &str, properties: Option<&Properties>) {
        self.emit_log(Severity::Log, message, properties);
    }

    fn info(&self, message: &str, properties: Option<&Properties>) {
        self.emit_log(Severity::Info, message, properties);
    }

    fn warn(&self, message: &str, properties: Option<&Properties>) {
        self.emit_log(Severity::Warn, message, properties);
    }

    fn error(&self, message: &str, properties: Option<&Properties>) {
        self.emit_log(Severity::Error, message, properties);
    }

    fn trace<T>(&self, name: &str, f: impl FnOnce(&Span) -> T, options: SpanOptions) -> T {
        self.tracer.start_active_span(name, f, options)
    }

    fn start_span(&self, name: &str, options: SpanOptions) -> Span {
        self.tracer.start_span(name, options)
    }
}

/// The disabled logger variant.
///
/// Leveled methods are true no-ops: no timestamp capture, no serialization,
/// no backend call. `trace` still invokes the supplied function, passing an
/// inert span, so call sites behave uniformly whether logging is active or
/// not. Holds no backend handles and therefore cannot fail regardless of
/// backend availability.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopTaskLogger;

impl TaskLogger for NoopTaskLogger {
    fn debug(&self, _message: &str, _properties: Option<&Properties>) {}

    fn log(&self, _message: &str, _properties: Option<&Properties>) {}

    fn info(&self, _message: &str, _properties: Option<&Properties>) {}

    fn warn(&self, _message: &str, _properties: Option<&Properties>) {}

    fn error(&self, _message: &str, _properties: Option<&Properties>) {}

    fn trace<T>(&self, _name: &str, f: impl FnOnce(&Span) -> T, _options: SpanOptions) -> T {
        f(&Span::noop())
    }

    fn start_span(&self, _name: &str, _options: SpanOptions) -> Span {
        Span::noop()
    }
}

/// The closed set of logger variants, selected once at construction.
#[derive(Clone, Debug)]
pub enum AnyTaskLogger {
    /// Active, severity-filtered logging.
    Filtered(FilteredTaskLogger),
    /// Logging disabled.
    Noop(NoopTaskLogger),
}

impl TaskLogger for AnyTaskLogger {
    fn debug(&self, message: &str, properties: Option<&Properties>) {
        match self {
            AnyTaskLogger::Filtered(logger) => logger.debug(message, properties),
            AnyTaskLogger::Noop(logger) => logger.debug(message, properties),
        }
    }

    fn log(&self, message: &str, properties: Option<&Properties>) {
        match self {
            AnyTaskLogger::Filtered(logger) => logger.log(message, properties),
            AnyTaskLogger::Noop(logger) => logger.log(message, properties),
        }
    }

    fn info(&self, message: &str, properties: Option<&Properties>) {
        match self {
            AnyTaskLogger::Filtered(logger) => logger.info(message, properties),
            AnyTaskLogger::Noop(logger) => logger.info(message, properties),
        }
    }

    fn warn(&self, message: &str, properties: Option<&Properties>) {
        match self {
            AnyTaskLogger::Filtered(logger) => logger.warn(message, properties),
            AnyTaskLogger::Noop(logger) => logger.warn(message, properties),
        }
    }

    fn error(&self, message: &str, properties: Option<&Properties>) {
        match self {
            AnyTaskLogger::Filtered(logger) => logger.error(message, properties),
            AnyTaskLogger::Noop(logger) => logger.error(message, properties),
        }
    }

    fn trace<T>(&self, name: &str, f: impl FnOnce(&Span) -> T, options: SpanOptions) -> T {
        match self {
            AnyTaskLogger::Filtered(logger) => logger.trace(name, f, options),
            AnyTaskLogger::Noop(logger) => logger.trace(name, f, options),
        }
    }

    fn start_span(&self, name: &str, options: SpanOptions) -> Span {
        match self {
            AnyTaskLogger::Filtered(logger) => logger.start_span(name, options),
            AnyTaskLogger::Noop(logger) => logger.start_span(name, options),
        }
    }
}

impl From<FilteredTaskLogger> for AnyTaskLogger {
    fn from(logger: FilteredTaskLogger) -> Self {
        AnyTaskLogger::Filtered(logger)
    }
}

impl From<NoopTaskLogger> for AnyTaskLogger {
    fn from(logger: NoopTaskLogger) -> Self {
        AnyTaskLogger::Noop(logger)
    }
}
