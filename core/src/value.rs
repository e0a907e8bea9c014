//! `Value`: Dynamic data that flows between elements, matchers, and projectors
//!
//! Collection operations are generic over their element type, but matching and
//! projection happen on an erased view of each element. `Value` is that view:
//! the same [`Matcher`](crate::Matcher) works for strings, numbers, and records,
//! and the [token formatter](crate::format) reads its substitutions from it.
//!
//! # Equality
//!
//! Numbers compare across representations (`Int(1) == Float(1.0)`). Every other
//! variant compares structurally.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed value.
///
/// Deserializes untagged, so any JSON or YAML document maps onto it directly:
///
/// ```
/// use sucre::Value;
///
/// let v: Value = serde_json::from_str(r#"{"name": "Franklin", "age": 14}"#).unwrap();
/// assert_eq!(v.get("name").and_then(Value::as_str), Some("Franklin"));
/// assert_eq!(v.get("age").and_then(Value::as_int), Some(14));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent or null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// String-keyed record.
    Object(BTreeMap<String, Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Int(a), f @ Self::Float(_)) | (f @ Self::Float(_), Self::Int(a)) => {
                f.as_int() == Some(*a)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Build an object from key/value pairs.
    ///
    /// ```
    /// use sucre::Value;
    ///
    /// let v = Value::object([("n", "Cheech")]);
    /// assert_eq!(v.get("n"), Some(&Value::from("Cheech")));
    /// ```
    pub fn object<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns `true` if this is `Null`.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is `Int` or `Float`.
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Returns `true` if this is `Object`.
    #[inline]
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as an integer. Integral floats inside the `i64`
    /// range convert.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            Self::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    /// Try to get the value as a float. Integers convert.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a list.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Try to get the value as an object.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key in an object. Non-objects have no keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Read a named property.
    ///
    /// Objects expose their keys. Strings and lists expose a virtual `length`
    /// (strings count chars), and lists also accept numeric indexes.
    /// Anything else has no properties.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<Value> {
        match self {
            Self::Object(map) => map.get(key).cloned(),
            Self::String(s) if key == "length" => Some(Self::from(s.chars().count())),
            Self::List(items) if key == "length" => Some(Self::from(items.len())),
            Self::List(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i).cloned()),
            _ => None,
        }
    }

    /// Follow a dotted property path, e.g. `"Path.To.Namespace"`.
    ///
    /// Returns `None` as soon as a segment is absent.
    ///
    /// ```
    /// use sucre::Value;
    ///
    /// let root: Value = serde_json::from_str(r#"{"a": {"b": {"c": 1}}}"#).unwrap();
    /// assert_eq!(root.path("a.b.c"), Some(Value::Int(1)));
    /// assert_eq!(root.path("a.x.c"), None);
    /// ```
    #[must_use]
    pub fn path(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.property(first)?;
        for segment in segments {
            current = current.property(segment)?;
        }
        Some(current)
    }

    /// Returns a string describing the type of this value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// A string key that identifies this value up to equality.
    ///
    /// Two values produce the same key exactly when they are `==`, so the key
    /// can stand in for hashing (which `f64` does not support).
    #[must_use]
    pub fn canonical_key(&self) -> String {
        match self {
            Self::Null => "n:".to_string(),
            Self::Bool(b) => format!("b:{b}"),
            Self::Int(i) => format!("i:{i}"),
            Self::Float(f) => match self.as_int() {
                Some(i) => format!("i:{i}"),
                None => format!("f:{f}"),
            },
            Self::String(s) => format!("s:{s}"),
            Self::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::canonical_key).collect();
                format!("l:[{}]", inner.join(","))
            }
            Self::Object(map) => {
                let inner: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{k:?}={}", v.canonical_key()))
                    .collect();
                format!("o:{{{}}}", inner.join(","))
            }
        }
    }

    /// Total order used for sorting and min/max.
    ///
    /// Values of different kinds order by kind (null < bool < number < string
    /// < list < object); numbers compare numerically across `Int`/`Float`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (a, b) if a.is_number() && b.is_number() => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.total_cmp(&y)
            }
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = x.compare(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Self::Object(a), Self::Object(b)) => a.len().cmp(&b.len()),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::String(_) => 3,
            Self::List(_) => 4,
            Self::Object(_) => 5,
        }
    }
}

/// Renders the way a template substitution would print the value: strings
/// raw, lists comma-joined, objects as JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::String(c.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Self::Float(i as f64), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Object(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
