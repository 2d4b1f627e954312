//! Unique identifiers for traces and spans.
//!
//! A [`TraceId`] identifies one logical task execution; every span started
//! through a [`Tracer`][crate::Tracer] shares its tracer's trace id. A
//! [`SpanId`] is unique within the process. Both render and serialize as
//! fixed-width lowercase hex.

use core::fmt;
use core::str::FromStr;
use core::sync::atomic::{AtomicU64, Ordering};

/// A globally-unique id for one trace.
///
/// Prefer [`TraceId::random`]; constant or re-used raw values defeat the
/// point of the id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct TraceId(u128);

impl TraceId {
    /// Generates a random trace id.
    pub fn random(rng: &mut impl rand::Rng) -> Self {
        Self(rng.random())
    }

    /// Creates a trace id from a raw value.
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw value of this id.
    pub const fn to_raw(self) -> u128 {
        self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u128::from_str_radix(s, 16).map(TraceId)
    }
}

impl serde::Serialize for TraceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut hex_bytes = [0u8; size_of::<u128>() * 2];
        hex::encode_to_slice(self.0.to_be_bytes(), &mut hex_bytes).unwrap();

        serializer.serialize_str(str::from_utf8(&hex_bytes).unwrap())
    }
}

impl<'de> serde::Deserialize<'de> for TraceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let string = <&str>::deserialize(deserializer)?;

        let mut raw = [0u8; size_of::<u128>()];
        hex::decode_to_slice(string, &mut raw).map_err(D::Error::custom)?;

        Ok(TraceId(u128::from_be_bytes(raw)))
    }
}

/// A process-unique id for a span.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SpanId(pub u64);

impl SpanId {
    /// Allocates the next span id. Never zero.
    #[inline]
    pub fn next_id() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        SpanId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for SpanId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16).map(SpanId)
    }
}

impl serde::Serialize for SpanId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut hex_bytes = [0u8; size_of::<u64>() * 2];
        hex::encode_to_slice(self.0.to_be_bytes(), &mut hex_bytes).unwrap();

        serializer.serialize_str(str::from_utf8(&hex_bytes).unwrap())
    }
}

impl<'de> serde::Deserialize<'de> for SpanId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let string = <&str>::deserialize(deserializer)?;

        let mut raw = [0u8; size_of::<u64>()];
        hex::decode_to_slice(string, &mut raw).map_err(D::Error::custom)?;

        Ok(SpanId(u64::from_be_bytes(raw)))
    }
}

/// The identity of a span: its trace and its span id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize)]
pub struct SpanContext {
    /// The trace this span belongs to.
    pub trace_id: TraceId,
    /// The span's own id.
    pub span_id: SpanId,
}

impl SpanContext {
    /// Creates a context from its parts.
    pub const fn new(trace_id: TraceId, span_id: SpanId) -> Self {
        Self { trace_id, span_id }
    }
}

impl fmt::Display for SpanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { trace_id, span_id } = self;
        write!(f, "{trace_id}:{span_id}")
    }
}

/// Errors that can occur while parsing a [`SpanContext`] from a string.
#[derive(Clone, Debug)]
pub enum ParseSpanContextError {
    /// The string is missing a `:` separator.
    MissingSeparator,

    /// The embedded [`TraceId`] failed to parse.
    InvalidTraceId(core::num::ParseIntError),

    /// The embedded [`SpanId`] failed to parse.
    InvalidSpanId(core::num::ParseIntError),
}

impl fmt::Display for ParseSpanContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => f.write_str("missing ':' separator"),
            Self::InvalidTraceId(_) => f.write_str("failed to parse trace id"),
            Self::InvalidSpanId(_) => f.write_str("failed to parse span id"),
        }
    }
}

impl core::error::Error for ParseSpanContextError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::MissingSeparator => None,
            Self::InvalidTraceId(error) => Some(error),
            Self::InvalidSpanId(error) => Some(error),
        }
    }
}

impl FromStr for SpanContext {
    type Err = ParseSpanContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((trace_id, span_id)) = s.split_once(":") else {
            return Err(ParseSpanContextError::MissingSeparator);
        };
        let trace_id =
            TraceId::from_str(trace_id).map_err(ParseSpanContextError::InvalidTraceId)?;
        let span_id = SpanId::from_str(span_id).map_err(ParseSpanContextError::InvalidSpanId)?;
        Ok(Self { trace_id, span_id })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn span_ids_are_unique_and_non_zero() {
        let ids: Vec<SpanId> = (0..1000).map(|_| SpanId::next_id()).collect();

        let mut seen = HashSet::new();
        for id in &ids {
            assert_ne!(id.0, 0);
            assert!(seen.insert(id.0));
        }
    }

    #[test]
    fn trace_id_display_from_str_roundtrip() {
        for raw in [0u128, 1, 0x123, u128::MAX, 0x123456789ABCDEF0FEDCBA9876543210] {
            let id = TraceId::from_raw(raw);
            assert_eq!(id.to_string().parse::<TraceId>().unwrap(), id);
        }
    }

    #[test]
    fn trace_id_serde_matches_display() {
        let id = TraceId::from_raw(0x123);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let parsed: TraceId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn span_id_serde_roundtrip() {
        for raw in [0u64, 1, 0xFEDCBA9876543210, u64::MAX] {
            let id = SpanId(raw);
            let json = serde_json::to_string(&id).unwrap();
            let parsed: SpanId = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn span_context_display_from_str_roundtrip() {
        let context = SpanContext::new(TraceId::from_raw(0xABC), SpanId(0x123));
        let parsed = context.to_string().parse::<SpanContext>().unwrap();
        assert_eq!(parsed, context);
    }

    #[test]
    fn span_context_parse_errors() {
        assert!(matches!(
            "deadbeef".parse::<SpanContext>(),
            Err(ParseSpanContextError::MissingSeparator)
        ));
        assert!(matches!(
            "xyz:123".parse::<SpanContext>(),
            Err(ParseSpanContextError::InvalidTraceId(_))
        ));
        assert!(matches!(
            "123:xyz".parse::<SpanContext>(),
            Err(ParseSpanContextError::InvalidSpanId(_))
        ));
    }
}
