//! Nested property bags attached to leveled log calls.
//!
//! A [`Properties`] bag is caller-owned, arbitrarily nested, and may contain
//! captured error values. The logger never mutates a bag; before emission it
//! produces a best-effort sanitized copy (a serialize/deserialize round-trip
//! through JSON) and flattens that copy into attributes. Error values are
//! rewritten to plain `{name, message, stack}` records during serialization
//! so they survive the generic round-trip.
//!
//! # Examples
//!
//! ```rust
//! use tasklane_telemetry::{properties, ErrorDetails};
//!
//! let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "no such task");
//! let bag = properties! {
//!     attempt = 2,
//!     "user.name" = "ada",
//!     err = ErrorDetails::from_error(&missing),
//! };
//! assert_eq!(bag.len(), 3);
//! ```

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A nested bag of named properties.
///
/// Build one with [`properties!`][crate::properties!] or [`Properties::insert`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, PropertyValue>);

impl Properties {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a property, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// Whether the bag holds no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of top-level properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the top-level entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Converts the bag into a JSON value directly, without a round-trip.
    ///
    /// This is the fallback used when the sanitizing round-trip fails: a pure
    /// structural conversion that cannot fail, preserving the original bag
    /// as-is.
    pub fn raw_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.raw_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, PropertyValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single property value.
///
/// The variants mirror JSON, with one addition: [`PropertyValue::Error`]
/// carries a captured error. Its `Serialize` implementation rewrites the
/// error to a plain `{name, message, stack}` object, which is what makes
/// error values survive the sanitizing round-trip.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// An absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Array(Vec<PropertyValue>),
    /// A nested bag.
    Map(BTreeMap<String, PropertyValue>),
    /// A captured error value.
    Error(ErrorDetails),
}

impl PropertyValue {
    fn raw_json(&self) -> serde_json::Value {
        match self {
            PropertyValue::Null => serde_json::Value::Null,
            PropertyValue::Bool(value) => serde_json::Value::Bool(*value),
            PropertyValue::Int(value) => serde_json::Value::from(*value),
            // Mirrors the serialized form, where non-finite floats become null.
            PropertyValue::Float(value) => serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            PropertyValue::String(value) => serde_json::Value::String(value.clone()),
            PropertyValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(PropertyValue::raw_json).collect())
            }
            PropertyValue::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.raw_json()))
                    .collect(),
            ),
            PropertyValue::Error(details) => details.raw_json(),
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PropertyValue::Null => serializer.serialize_unit(),
            PropertyValue::Bool(value) => serializer.serialize_bool(*value),
            PropertyValue::Int(value) => serializer.serialize_i64(*value),
            PropertyValue::Float(value) => serializer.serialize_f64(*value),
            PropertyValue::String(value) => serializer.serialize_str(value),
            PropertyValue::Array(items) => items.serialize(serializer),
            PropertyValue::Map(entries) => entries.serialize(serializer),
            PropertyValue::Error(details) => details.serialize(serializer),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(value: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(value)
    }
}

impl From<Properties> for PropertyValue {
    fn from(value: Properties) -> Self {
        PropertyValue::Map(value.0)
    }
}

impl From<ErrorDetails> for PropertyValue {
    fn from(value: ErrorDetails) -> Self {
        PropertyValue::Error(value)
    }
}

impl<T> From<Option<T>> for PropertyValue
where
    T: Into<PropertyValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => PropertyValue::Null,
        }
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::Bool(value) => PropertyValue::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => PropertyValue::Int(value),
                None => PropertyValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(value) => PropertyValue::String(value),
            serde_json::Value::Array(items) => {
                PropertyValue::Array(items.into_iter().map(PropertyValue::from).collect())
            }
            serde_json::Value::Object(entries) => PropertyValue::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, PropertyValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// A captured error: name, message and the chain of causes.
///
/// The closest Rust rendition of an exception's name/message/stack triple:
/// the name comes from the error's type, the stack from walking
/// [`Error::source`][core::error::Error::source].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ErrorDetails {
    /// Short error name, usually the error's type name.
    pub name: String,
    /// The error's display message.
    pub message: String,
    /// The rendered cause chain, when the error has one.
    pub stack: Option<String>,
}

impl ErrorDetails {
    /// Creates details from explicit parts.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Captures an error value, deriving the name from its type and the
    /// stack from its source chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tasklane_telemetry::ErrorDetails;
    ///
    /// let error = "x".parse::<u8>().unwrap_err();
    /// let details = ErrorDetails::from_error(&error);
    /// assert_eq!(details.name, "ParseIntError");
    /// ```
    pub fn from_error<E>(error: &E) -> Self
    where
        E: core::error::Error,
    {
        let full_name = core::any::type_name::<E>();
        let name = full_name.rsplit("::").next().unwrap_or(full_name);

        let mut stack = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            stack.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        Self {
            name: name.to_owned(),
            message: error.to_string(),
            stack: (!stack.is_empty()).then(|| stack.join("\n")),
        }
    }

    fn raw_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("name".to_owned(), serde_json::Value::String(self.name.clone()));
        object.insert(
            "message".to_owned(),
            serde_json::Value::String(self.message.clone()),
        );
        object.insert(
            "stack".to_owned(),
            self.stack
                .clone()
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
        );
        serde_json::Value::Object(object)
    }
}

impl Serialize for ErrorDetails {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("stack", &self.stack)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use core::fmt;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::properties;

    #[derive(Debug)]
    struct Outer;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outer failed")
        }
    }

    impl core::error::Error for Outer {
        fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
            Some(&Inner)
        }
    }

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("inner failed")
        }
    }

    impl core::error::Error for Inner {}

    #[test]
    fn macro_builds_nested_bags() {
        let bag = properties! {
            attempt = 3,
            "user.name" = "ada",
            context = properties! { queue = "default" },
        };

        assert_eq!(bag.get("attempt"), Some(&PropertyValue::Int(3)));
        assert_eq!(
            bag.get("user.name"),
            Some(&PropertyValue::String("ada".to_owned()))
        );
        match bag.get("context") {
            Some(PropertyValue::Map(entries)) => {
                assert_eq!(
                    entries.get("queue"),
                    Some(&PropertyValue::String("default".to_owned()))
                );
            }
            other => panic!("expected a nested map, got {other:?}"),
        }
    }

    #[test]
    fn error_values_serialize_as_plain_records() {
        let bag = properties! { err = ErrorDetails::from_error(&Outer) };
        let value = serde_json::to_value(&bag).unwrap();

        assert_eq!(
            value,
            json!({
                "err": {
                    "name": "Outer",
                    "message": "outer failed",
                    "stack": "caused by: inner failed",
                }
            })
        );
    }

    #[test]
    fn from_error_without_sources_has_no_stack() {
        let details = ErrorDetails::from_error(&Inner);
        assert_eq!(details.name, "Inner");
        assert_eq!(details.message, "inner failed");
        assert_eq!(details.stack, None);
    }

    #[test]
    fn raw_json_matches_serialized_form() {
        let bag = properties! {
            flag = true,
            count = 2,
            ratio = 0.5,
            missing = Option::<i64>::None,
            err = ErrorDetails::new("TypeError", "x"),
            items = vec![PropertyValue::Int(1), PropertyValue::from("two")],
        };

        let serialized = serde_json::to_value(&bag).unwrap();
        assert_eq!(bag.raw_json(), serialized);
    }

    #[test]
    fn non_finite_floats_become_null_both_ways() {
        let bag = properties! { bad = f64::NAN };
        assert_eq!(bag.raw_json(), json!({ "bad": null }));

        let round_tripped: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&bag).unwrap()).unwrap();
        assert_eq!(round_tripped, json!({ "bad": null }));
    }

    #[test]
    fn json_values_convert_structurally() {
        let value = PropertyValue::from(json!({ "a": [1, "two", null] }));
        match value {
            PropertyValue::Map(entries) => {
                assert_eq!(
                    entries.get("a"),
                    Some(&PropertyValue::Array(vec![
                        PropertyValue::Int(1),
                        PropertyValue::String("two".to_owned()),
                        PropertyValue::Null,
                    ]))
                );
            }
            other => panic!("expected a map, got {other:?}"),
        }
    }
}
