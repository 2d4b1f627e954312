//! The tracing handle loggers delegate to.

use std::borrow::Cow;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::export::ExportSpans;
use crate::id::{SpanContext, SpanId, TraceId};
use crate::protocol::{SpanMessage, SpanStartMessage};
use crate::span::{Span, SpanOptions};

/// Starts spans and hands their lifecycle messages to a tracing backend.
///
/// A tracer is cheap to clone; clones share the backend handle and the trace
/// id. Every span started through a tracer belongs to its trace.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tasklane_telemetry::{ConsoleJsonExporter, SpanOptions, Tracer};
///
/// let tracer = Tracer::new(Arc::new(ConsoleJsonExporter::DEFAULT));
///
/// let total = tracer.start_active_span(
///     "sum",
///     |span| {
///         span.add_event("computing", Default::default());
///         2 + 2
///     },
///     SpanOptions::default(),
/// );
/// assert_eq!(total, 4);
/// ```
#[derive(Clone, Debug)]
pub struct Tracer {
    exporter: Arc<dyn ExportSpans>,
    clock: Arc<dyn Clock>,
    trace_id: TraceId,
}

impl Tracer {
    /// Creates a tracer with a fresh random trace id and the system clock.
    pub fn new(exporter: Arc<dyn ExportSpans>) -> Self {
        Self::with_clock(exporter, Arc::new(SystemClock::new()))
    }

    /// Creates a tracer with an explicit clock.
    pub fn with_clock(exporter: Arc<dyn ExportSpans>, clock: Arc<dyn Clock>) -> Self {
        Self {
            exporter,
            clock,
            trace_id: TraceId::random(&mut rand::rng()),
        }
    }

    /// The trace all spans started through this tracer belong to.
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Starts a span without activating it.
    ///
    /// Span creation is infallible at this layer; unreasonable options are
    /// the caller's responsibility. The span ends when dropped or when
    /// [`Span::end`] is called.
    pub fn start_span(&self, name: &str, options: SpanOptions) -> Span {
        let context = SpanContext::new(self.trace_id, SpanId::next_id());

        self.exporter.export(SpanMessage::Start(SpanStartMessage {
            context,
            parent: options.parent,
            name: Cow::Borrowed(name),
            start_time: self.clock.now(),
            attributes: options.attributes,
        }));

        Span::recording(context, Arc::clone(&self.exporter), Arc::clone(&self.clock))
    }

    /// Starts a span, runs `f` with it active, and ends it.
    ///
    /// Returns whatever `f` returns. If `f` panics the panic propagates
    /// unchanged; the span still ends, through its drop during unwinding.
    pub fn start_active_span<T>(
        &self,
        name: &str,
        f: impl FnOnce(&Span) -> T,
        options: SpanOptions,
    ) -> T {
        let span = self.start_span(name, options);
        let result = f(&span);
        span.end();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, Timestamp};
    use crate::export::TestExporter;

    fn tracer(exporter: &Arc<TestExporter>) -> Tracer {
        Tracer::with_clock(
            Arc::clone(exporter) as Arc<dyn ExportSpans>,
            Arc::new(ManualClock::new(Timestamp(1000))),
        )
    }

    #[test]
    fn spans_share_the_tracer_trace_id() {
        let exporter = TestExporter::new();
        let tracer = tracer(&exporter);

        let first = tracer.start_span("first", SpanOptions::default());
        let second = tracer.start_span("second", SpanOptions::default());

        assert_eq!(first.context().unwrap().trace_id, tracer.trace_id());
        assert_eq!(second.context().unwrap().trace_id, tracer.trace_id());
        assert_ne!(
            first.context().unwrap().span_id,
            second.context().unwrap().span_id
        );
    }

    #[test]
    fn start_span_exports_a_start_message() {
        let exporter = TestExporter::new();
        let tracer = tracer(&exporter);

        let span = tracer.start_span("work", SpanOptions::default());
        let context = span.context().unwrap();

        let spans = exporter.take_spans();
        assert_eq!(spans.len(), 1);
        match &spans[0] {
            SpanMessage::Start(start) => {
                assert_eq!(start.context, context);
                assert_eq!(start.name, "work");
                assert_eq!(start.start_time, Timestamp(1000));
                assert_eq!(start.parent, None);
            }
            other => panic!("expected a start message, got {other:?}"),
        }
    }

    #[test]
    fn active_span_returns_the_closure_value_and_ends() {
        let exporter = TestExporter::new();
        let tracer = tracer(&exporter);

        let result =
            tracer.start_active_span("compute", |_span| "done", SpanOptions::default());
        assert_eq!(result, "done");

        let spans = exporter.take_spans();
        assert_eq!(spans.len(), 2);
        assert!(matches!(spans[0], SpanMessage::Start(_)));
        assert!(matches!(spans[1], SpanMessage::End(_)));
    }

    #[test]
    fn explicit_parent_is_forwarded() {
        let exporter = TestExporter::new();
        let tracer = tracer(&exporter);

        let parent = tracer.start_span("parent", SpanOptions::default());
        let parent_context = parent.context().unwrap();

        let _child = tracer.start_span(
            "child",
            SpanOptions {
                parent: Some(parent_context),
                ..SpanOptions::default()
            },
        );

        let spans = exporter.take_spans();
        match &spans[1] {
            SpanMessage::Start(start) => assert_eq!(start.parent, Some(parent_context)),
            other => panic!("expected a start message, got {other:?}"),
        }
    }
}
