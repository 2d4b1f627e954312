//! Record and span message types handed to exporters.
//!
//! These are the values crossing the boundary between the logger/tracer and
//! the configured backends: a [`LogRecord`] per emitted leveled call, and a
//! [`SpanMessage`] per span lifecycle transition.
//!
//! Record bodies and span names borrow from the call site; exporters that
//! retain messages past the call use [`LogRecord::into_owned`] /
//! [`SpanMessage::into_owned`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::id::{SpanContext, SpanId};
use crate::value::{AttributeValue, Attributes};

/// The severity of an individual log record.
///
/// Unlike [`LogLevel`][crate::level::LogLevel] this never contains `none`;
/// a record always has a concrete severity. `Log` and `Info` filter at the
/// same rank and share a backend severity number, but stay distinct here so
/// the emitted `severityText` can tell them apart.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Detailed diagnostics, dropped unless the logger runs at `debug`.
    Debug,
    /// General output, same filtering position as `Info`.
    Log,
    /// Useful information.
    Info,
    /// Hazardous situations.
    Warn,
    /// Serious failures.
    Error,
}

impl Severity {
    /// The `severityText` value carried by emitted records.
    pub const fn text(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Log => "log",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// The backend-facing numeric severity.
    ///
    /// Follows the OpenTelemetry log data model numbers; `Log` and `Info`
    /// intentionally share one.
    pub const fn number(self) -> u8 {
        match self {
            Severity::Debug => 5,
            Severity::Log | Severity::Info => 9,
            Severity::Warn => 13,
            Severity::Error => 17,
        }
    }

    /// The rank a configured [`LogLevel`][crate::level::LogLevel] is compared
    /// against when deciding whether to emit a call at this severity.
    pub(crate) const fn filter_rank(self) -> u8 {
        match self {
            Severity::Error => 1,
            Severity::Warn => 2,
            Severity::Info | Severity::Log => 3,
            Severity::Debug => 4,
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.text())
    }
}

/// A structured log record, assembled per emitted call and handed to the
/// log-emission backend.
///
/// Not retained by the logger; ownership moves to the exporter with the
/// `emit` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord<'a> {
    /// Backend-facing numeric severity, derived from `severity`.
    pub severity_number: u8,

    /// The severity, serialized as the record's `severityText`.
    #[serde(rename = "severityText")]
    pub severity: Severity,

    /// The message body.
    pub body: Cow<'a, str>,

    /// Flattened attributes, including the reserved icon entry when present.
    pub attributes: Attributes,

    /// When the call was made.
    pub timestamp: Timestamp,
}

impl<'a> LogRecord<'a> {
    /// Assembles a record, deriving the numeric severity.
    pub fn new(
        severity: Severity,
        body: impl Into<Cow<'a, str>>,
        attributes: Attributes,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            severity_number: severity.number(),
            severity,
            body: body.into(),
            attributes,
            timestamp,
        }
    }

    /// The record's `severityText`.
    pub const fn severity_text(&self) -> &'static str {
        self.severity.text()
    }

    /// Converts the record into one that owns its body.
    pub fn into_owned(self) -> LogRecord<'static> {
        LogRecord {
            severity_number: self.severity_number,
            severity: self.severity,
            body: Cow::Owned(self.body.into_owned()),
            attributes: self.attributes,
            timestamp: self.timestamp,
        }
    }
}

/// A span lifecycle message handed to the tracing backend.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SpanMessage<'a> {
    /// A span has been started.
    Start(SpanStartMessage<'a>),
    /// An event was added to a span.
    AddEvent(SpanEventMessage<'a>),
    /// An attribute was set on a span.
    SetAttribute(SpanSetAttributeMessage),
    /// A span has ended.
    End(SpanEndMessage),
}

impl SpanMessage<'_> {
    /// Converts the message into one that owns its name.
    pub fn into_owned(self) -> SpanMessage<'static> {
        match self {
            SpanMessage::Start(message) => SpanMessage::Start(SpanStartMessage {
                context: message.context,
                parent: message.parent,
                name: Cow::Owned(message.name.into_owned()),
                start_time: message.start_time,
                attributes: message.attributes,
            }),
            SpanMessage::AddEvent(message) => SpanMessage::AddEvent(SpanEventMessage {
                span_id: message.span_id,
                name: Cow::Owned(message.name.into_owned()),
                time: message.time,
                attributes: message.attributes,
            }),
            SpanMessage::SetAttribute(message) => SpanMessage::SetAttribute(message),
            SpanMessage::End(message) => SpanMessage::End(message),
        }
    }
}

/// A new span has been started.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpanStartMessage<'a> {
    /// The identity of the new span.
    pub context: SpanContext,

    /// An explicit parent, when the caller supplied one in the span options.
    pub parent: Option<SpanContext>,

    /// The span name.
    pub name: Cow<'a, str>,

    /// When the span started.
    pub start_time: Timestamp,

    /// Initial attributes from the span options.
    pub attributes: Attributes,
}

/// A point-in-time event within a span's lifetime.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpanEventMessage<'a> {
    /// The span the event belongs to.
    pub span_id: SpanId,

    /// The event name.
    pub name: Cow<'a, str>,

    /// When the event occurred.
    pub time: Timestamp,

    /// Event attributes.
    pub attributes: Attributes,
}

/// An attribute set on a span after it started.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpanSetAttributeMessage {
    /// The span the attribute is set on.
    pub span_id: SpanId,

    /// Attribute key.
    pub key: String,

    /// Attribute value.
    pub value: AttributeValue,
}

/// A span has ended.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SpanEndMessage {
    /// The span that ended.
    pub span_id: SpanId,

    /// When the span ended.
    pub end_time: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TraceId;

    #[test]
    fn log_and_info_share_a_number_but_not_a_text() {
        assert_eq!(Severity::Log.number(), Severity::Info.number());
        assert_ne!(Severity::Log.text(), Severity::Info.text());
        assert_eq!(Severity::Log.filter_rank(), Severity::Info.filter_rank());
    }

    #[test]
    fn record_derives_its_number() {
        let record = LogRecord::new(
            Severity::Warn,
            "careful",
            Attributes::new(),
            Timestamp(12),
        );
        assert_eq!(record.severity_number, 13);
        assert_eq!(record.severity_text(), "warn");
    }

    #[test]
    fn record_serializes_with_backend_field_names() {
        let record = LogRecord::new(Severity::Log, "hi", Attributes::new(), Timestamp(7));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["severityNumber"], 9);
        assert_eq!(json["severityText"], "log");
        assert_eq!(json["body"], "hi");
        assert_eq!(json["timestamp"], 7);
    }

    #[test]
    fn into_owned_preserves_content() {
        let body = String::from("borrowed");
        let record = LogRecord::new(
            Severity::Info,
            body.as_str(),
            Attributes::new(),
            Timestamp(1),
        );
        let owned = record.clone().into_owned();
        assert_eq!(owned, record.into_owned());
        assert_eq!(owned.body, "borrowed");
    }

    #[test]
    fn span_message_into_owned() {
        let name = String::from("work");
        let message = SpanMessage::Start(SpanStartMessage {
            context: SpanContext::new(TraceId::from_raw(1), SpanId(2)),
            parent: None,
            name: Cow::Borrowed(name.as_str()),
            start_time: Timestamp(3),
            attributes: Attributes::new(),
        });

        let owned: SpanMessage<'static> = message.into_owned();
        match owned {
            SpanMessage::Start(start) => assert_eq!(start.name, "work"),
            other => panic!("expected a start message, got {other:?}"),
        }
    }
}
