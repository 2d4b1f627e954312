//! Span instrumentation for futures.
//!
//! `trace` covers synchronous closures; async task steps use
//! [`FutureExt::in_span`] instead, which ties a span's lifetime to a
//! future's: the span ends when the future completes, or when the future is
//! dropped unfinished.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use tasklane_telemetry::future::FutureExt;
//! use tasklane_telemetry::{ConsoleJsonExporter, SpanOptions, Tracer};
//!
//! async fn example(tracer: &Tracer) {
//!     let span = tracer.start_span("async_operation", SpanOptions::default());
//!
//!     some_async_work().in_span(span).await;
//! }
//!
//! async fn some_async_work() {
//!     // This work is traced under the "async_operation" span.
//! }
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use crate::span::Span;

impl<T> FutureExt for T where T: Future {}

/// Extension trait attaching spans to futures.
pub trait FutureExt: Future + Sized {
    /// Ties `span` to this future; the span ends when the future completes
    /// or is dropped.
    fn in_span(self, span: Span) -> InSpan<Self> {
        InSpan {
            inner: self,
            span: Some(span),
        }
    }
}

/// A future holding a span for its lifetime.
///
/// Created by [`FutureExt::in_span`].
#[pin_project::pin_project]
#[derive(Debug)]
pub struct InSpan<T> {
    #[pin]
    inner: T,
    span: Option<Span>,
}

impl<T> Future for InSpan<T>
where
    T: Future,
{
    type Output = T::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.inner.poll(cx) {
            Poll::Ready(output) => {
                if let Some(span) = this.span.take() {
                    span.end();
                }
                Poll::Ready(output)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
