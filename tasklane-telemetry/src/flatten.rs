//! Flattening of nested JSON values into dotted-key attribute maps.
//!
//! Backends take flat string→primitive attribute maps; property bags are
//! nested. [`flatten`] bridges the two: object keys are joined with `.`,
//! array elements get bracketed index segments, and scalars round-trip
//! unchanged. Flattening an already-flat mapping returns an equal mapping.

use serde_json::Value;

use crate::value::{AttributeValue, Attributes};

/// Sentinel string standing in for JSON `null` in attribute maps, which have
/// no null value of their own.
pub const NULL_SENTINEL: &str = "$null";

/// Flattens a nested JSON value into a dotted-key attribute map.
///
/// Never panics, regardless of nesting depth or content. Empty objects and
/// arrays produce no entries.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use tasklane_telemetry::{flatten, AttributeValue};
///
/// let attributes = flatten(&json!({
///     "user": { "name": "ada" },
///     "items": [1, 2],
/// }));
///
/// assert_eq!(attributes["user.name"], AttributeValue::from("ada"));
/// assert_eq!(attributes["items.[0]"], AttributeValue::from(1));
/// assert_eq!(attributes["items.[1]"], AttributeValue::from(2));
/// ```
pub fn flatten(value: &Value) -> Attributes {
    let mut attributes = Attributes::new();
    flatten_into(value, "", &mut attributes);
    attributes
}

fn flatten_into(value: &Value, prefix: &str, attributes: &mut Attributes) {
    match value {
        Value::Object(entries) => {
            for (key, child) in entries {
                flatten_into(child, &join(prefix, key), attributes);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, &join(prefix, &format!("[{index}]")), attributes);
            }
        }
        Value::Null => {
            attributes.insert(prefix.to_owned(), AttributeValue::from(NULL_SENTINEL));
        }
        Value::Bool(value) => {
            attributes.insert(prefix.to_owned(), AttributeValue::Bool(*value));
        }
        Value::Number(number) => {
            let value = match number.as_i64() {
                Some(value) => AttributeValue::I64(value),
                None => AttributeValue::F64(number.as_f64().unwrap_or(f64::NAN)),
            };
            attributes.insert(prefix.to_owned(), value);
        }
        Value::String(value) => {
            attributes.insert(prefix.to_owned(), AttributeValue::String(value.clone()));
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_round_trip_unchanged() {
        let attributes = flatten(&json!({
            "text": "hello",
            "truth": false,
            "count": 3,
            "ratio": 1.5,
        }));

        assert_eq!(attributes["text"], AttributeValue::from("hello"));
        assert_eq!(attributes["truth"], AttributeValue::from(false));
        assert_eq!(attributes["count"], AttributeValue::from(3));
        assert_eq!(attributes["ratio"], AttributeValue::from(1.5));
    }

    #[test]
    fn nested_objects_use_dotted_keys() {
        let attributes = flatten(&json!({
            "a": { "b": { "c": 1 } },
        }));

        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes["a.b.c"], AttributeValue::from(1));
    }

    #[test]
    fn arrays_use_bracketed_indices() {
        let attributes = flatten(&json!({
            "items": ["x", { "y": 2 }],
        }));

        assert_eq!(attributes["items.[0]"], AttributeValue::from("x"));
        assert_eq!(attributes["items.[1].y"], AttributeValue::from(2));
    }

    #[test]
    fn null_maps_to_the_sentinel() {
        let attributes = flatten(&json!({ "gone": null }));
        assert_eq!(attributes["gone"], AttributeValue::from(NULL_SENTINEL));
    }

    #[test]
    fn empty_containers_produce_no_entries() {
        let attributes = flatten(&json!({ "empty": {}, "list": [] }));
        assert!(attributes.is_empty());
    }

    #[test]
    fn flat_input_is_a_fixed_point() {
        let flat = json!({
            "a": 1,
            "b.c": "two",
            "d": true,
        });

        let once = flatten(&flat);
        let again = flatten(
            &serde_json::to_value(
                once.iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect::<std::collections::BTreeMap<_, _>>(),
            )
            .unwrap(),
        );

        assert_eq!(once, again);
    }

    #[test]
    fn deep_nesting_does_not_panic() {
        let mut value = json!(1);
        for _ in 0..300 {
            value = json!({ "nested": value });
        }

        let attributes = flatten(&value);
        assert_eq!(attributes.len(), 1);
    }
}
