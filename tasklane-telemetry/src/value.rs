//! Flat attribute values attached to records and spans.
//!
//! Attribute maps are the *flattened* form of caller-supplied property bags:
//! every value is a primitive, every key a dotted path. The nested form lives
//! in [`properties`][crate::properties].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A flat mapping of dotted attribute keys to primitive values.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A primitive attribute value.
///
/// # Examples
///
/// ```rust
/// use tasklane_telemetry::AttributeValue;
///
/// let text = AttributeValue::from("alice");
/// let count = AttributeValue::from(42);
/// let ratio = AttributeValue::from(0.5);
/// let flag = AttributeValue::from(true);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string value.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    I64(i64),
    /// A 64-bit floating-point number.
    F64(f64),
}

impl core::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            // Strings are debug-printed so they get delimiters; attribute
            // values end up in contexts where knowing where the string ends
            // matters.
            AttributeValue::String(value) => write!(f, "{value:?}"),
            AttributeValue::Bool(value) => write!(f, "{value}"),
            AttributeValue::I64(value) => write!(f, "{value}"),
            AttributeValue::F64(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::I64(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::F64(value)
    }
}
