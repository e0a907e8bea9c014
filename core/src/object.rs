//! Object operations over [`Value::Object`].
//!
//! All three build a fresh map; sources are never modified.

use crate::{Error, Matcher, Result, Value};
use std::collections::BTreeMap;

/// Merge objects left to right into a fresh object. Later keys win.
///
/// With `deep`, keys holding objects on both sides merge recursively instead
/// of being replaced.
///
/// ```
/// use sucre::{object, Value};
///
/// let a = Value::object([("a", 1), ("b", 2)]);
/// let b = Value::object([("b", 3)]);
/// assert_eq!(object::merge(&[a, b], false).unwrap(), Value::object([("a", 1), ("b", 3)]));
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if a source is not an object. `Null`
/// sources are skipped.
pub fn merge(sources: &[Value], deep: bool) -> Result<Value> {
    let mut out = BTreeMap::new();
    for (i, source) in sources.iter().enumerate() {
        match source {
            Value::Null => {}
            Value::Object(map) => merge_into(&mut out, map, deep),
            other => {
                return Err(Error::invalid_argument(
                    "sources",
                    format!("source {} is a {}, not an object", i + 1, other.type_name()),
                ))
            }
        }
    }
    Ok(Value::Object(out))
}

fn merge_into(target: &mut BTreeMap<String, Value>, source: &BTreeMap<String, Value>, deep: bool) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) if deep => {
                merge_into(existing, incoming, deep);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Keep the keys `matcher` accepts.
///
/// ```
/// use sucre::{object, Matcher, Value};
///
/// let v = Value::object([("name", 1), ("nickname", 2), ("age", 3)]);
/// let picked = object::select(&v, &Matcher::regex("name$").unwrap()).unwrap();
/// assert_eq!(picked, Value::object([("name", 1), ("nickname", 2)]));
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `object` is not an object.
pub fn select(object: &Value, matcher: &Matcher<str>) -> Result<Value> {
    filter_keys(object, matcher, true)
}

/// Drop the keys `matcher` accepts.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `object` is not an object.
pub fn reject(object: &Value, matcher: &Matcher<str>) -> Result<Value> {
    filter_keys(object, matcher, false)
}

fn filter_keys(object: &Value, matcher: &Matcher<str>, keep: bool) -> Result<Value> {
    let map = object.as_object().ok_or_else(|| {
        Error::invalid_argument("object", format!("expected an object, got a {}", object.type_name()))
    })?;
    Ok(Value::Object(
        map.iter()
            .filter(|(key, _)| matcher.matches(key.as_str()) == keep)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn shallow_merge_replaces() {
        let a = v(json!({"a": {"x": 1}, "b": 1}));
        let b = v(json!({"a": {"y": 2}}));
        assert_eq!(merge(&[a.clone(), b], false).unwrap(), v(json!({"a": {"y": 2}, "b": 1})));
        assert_eq!(a, v(json!({"a": {"x": 1}, "b": 1})));
    }

    #[test]
    fn deep_merge_recurses() {
        let a = v(json!({"a": {"x": 1, "z": 0}}));
        let b = v(json!({"a": {"y": 2, "z": 9}}));
        assert_eq!(
            merge(&[a, b], true).unwrap(),
            v(json!({"a": {"x": 1, "y": 2, "z": 9}}))
        );
    }

    #[test]
    fn merge_skips_null_and_rejects_scalars() {
        assert_eq!(merge(&[Value::Null], false).unwrap(), Value::object::<&str, i32, _>([]));
        let err = merge(&[Value::object([("a", 1)]), Value::from(3)], false).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { argument: "sources", .. }));
    }

    #[test]
    fn select_and_reject_are_complements() {
        let obj = v(json!({"name": "Ann", "age": 30, "city": "Oslo"}));
        let m = Matcher::from("age");
        assert_eq!(select(&obj, &m).unwrap(), v(json!({"age": 30})));
        assert_eq!(reject(&obj, &m).unwrap(), v(json!({"name": "Ann", "city": "Oslo"})));
    }

    #[test]
    fn select_with_predicate() {
        let obj = v(json!({"a": 1, "bb": 2, "ccc": 3}));
        let long = Matcher::predicate(|k: &str| k.len() > 1);
        assert_eq!(select(&obj, &long).unwrap(), v(json!({"bb": 2, "ccc": 3})));
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(select(&Value::from("x"), &Matcher::from("a")).is_err());
    }
}
