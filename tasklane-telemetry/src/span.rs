//! Span handles.
//!
//! A [`Span`] is an opaque handle to a unit of work. The recording variant
//! forwards lifecycle messages to the tracing backend; the inert variant
//! ([`Span::noop`]) accepts the same calls and does nothing, so code written
//! against a span works identically whether tracing is active or disabled.

use std::borrow::Cow;
use std::sync::Arc;

use crate::clock::Clock;
use crate::export::ExportSpans;
use crate::id::SpanContext;
use crate::protocol::{
    SpanEndMessage, SpanEventMessage, SpanMessage, SpanSetAttributeMessage,
};
use crate::value::{AttributeValue, Attributes};

/// Options for span creation.
#[derive(Clone, Debug, Default)]
pub struct SpanOptions {
    /// Initial attributes attached to the span.
    pub attributes: Attributes,

    /// An explicit parent span, for callers stitching task steps together.
    pub parent: Option<SpanContext>,
}

/// A handle to a unit of work within a trace.
///
/// Spans are created by a [`Tracer`][crate::Tracer] (or as placeholders via
/// [`Span::noop`]) and end when explicitly told to or when dropped, whichever
/// comes first. Ending is idempotent; the backend sees exactly one end
/// message per recording span.
#[must_use]
#[derive(Debug, Default)]
pub struct Span {
    inner: Option<SpanInner>,
}

#[derive(Debug)]
struct SpanInner {
    context: SpanContext,
    exporter: Arc<dyn ExportSpans>,
    clock: Arc<dyn Clock>,
}

impl Span {
    /// Creates an inert span that performs no tracing operations.
    ///
    /// Returned by the disabled logger so callers that read span fields or
    /// record events do not fail; they simply operate on an inert handle.
    #[inline]
    pub fn noop() -> Self {
        Self { inner: None }
    }

    pub(crate) fn recording(
        context: SpanContext,
        exporter: Arc<dyn ExportSpans>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Some(SpanInner {
                context,
                exporter,
                clock,
            }),
        }
    }

    /// The identity of this span, or `None` for an inert span.
    pub fn context(&self) -> Option<SpanContext> {
        self.inner.as_ref().map(|inner| inner.context)
    }

    /// Whether this span forwards anything to a backend.
    pub fn is_recording(&self) -> bool {
        self.inner.is_some()
    }

    /// Adds a point-in-time event to this span.
    pub fn add_event(&self, name: &str, attributes: Attributes) {
        if let Some(inner) = &self.inner {
            inner.exporter.export(SpanMessage::AddEvent(SpanEventMessage {
                span_id: inner.context.span_id,
                name: Cow::Borrowed(name),
                time: inner.clock.now(),
                attributes,
            }));
        }
    }

    /// Sets an attribute on this span.
    pub fn set_attribute(&self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        if let Some(inner) = &self.inner {
            inner
                .exporter
                .export(SpanMessage::SetAttribute(SpanSetAttributeMessage {
                    span_id: inner.context.span_id,
                    key: key.into(),
                    value: value.into(),
                }));
        }
    }

    /// Ends the span now instead of when it is dropped.
    pub fn end(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.exporter.export(SpanMessage::End(SpanEndMessage {
                span_id: inner.context.span_id,
                end_time: inner.clock.now(),
            }));
        }
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        self.finish();
    }
}
