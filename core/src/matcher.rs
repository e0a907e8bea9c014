//! `Matcher`: The single evaluation routine behind every collection query
//!
//! A matcher is built once at the call boundary and applied element-wise.
//! Four strategies:
//!
//! - [`Matcher::Exact`]: element equals a value (numbers compare across `Int`/`Float`)
//! - [`Matcher::Regex`]: element's scalar string form matches a regex
//! - [`Matcher::Shape`]: every listed property is present and matches its sub-matcher
//! - [`Matcher::Predicate`]: arbitrary closure over the element
//!
//! Evaluation never has side effects beyond what a predicate closure does.

use crate::{compile_regex, Error, Matchable, Result, Value};
use std::fmt;
use std::sync::Arc;

/// Closure type held by [`Matcher::Predicate`].
pub type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A test applied to each element of a collection.
///
/// # Example
///
/// ```
/// use sucre::{Matcher, Value};
///
/// let exact = Matcher::<i32>::from(5);
/// assert!(exact.matches(&5));
/// assert!(!exact.matches(&6));
///
/// let shape = Matcher::<Value>::from_value(Value::object([("a", 1)])).unwrap();
/// assert!(shape.matches(&Value::object([("a", 1), ("b", 2)])));
/// assert!(!shape.matches(&Value::object([("b", 2)])));
/// ```
pub enum Matcher<T: ?Sized> {
    /// Element equals this value.
    Exact(Value),
    /// Element's string form matches.
    Regex(regex::Regex),
    /// Each named property is present and matches.
    Shape(Vec<(String, Matcher<Value>)>),
    /// Caller-supplied test.
    Predicate(PredicateFn<T>),
}

impl<T: ?Sized> Matcher<T> {
    /// Build a matcher from a dynamic value, inspecting its kind.
    ///
    /// Objects become [`Shape`](Self::Shape) (recursively), strings, numbers,
    /// and booleans become [`Exact`](Self::Exact).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for `null` and lists, which name no test.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(Error::invalid_argument(
                "matcher",
                "null is not a string, number, object, regex, or function",
            )),
            Value::List(_) => Err(Error::invalid_argument(
                "matcher",
                "a list is not a string, number, object, regex, or function",
            )),
            Value::Object(map) => {
                let fields = map
                    .into_iter()
                    .map(|(key, v)| Ok((key, Matcher::<Value>::from_value(v)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Shape(fields))
            }
            scalar => Ok(Self::Exact(scalar)),
        }
    }

    /// Create a regex matcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile, or
    /// [`Error::PatternTooLong`] if it exceeds [`MAX_REGEX_PATTERN_LENGTH`](crate::MAX_REGEX_PATTERN_LENGTH).
    pub fn regex(pattern: &str) -> Result<Self> {
        compile_regex(pattern).map(Self::Regex)
    }

    /// Create a predicate matcher.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Create a shape matcher from property/sub-matcher pairs.
    pub fn shape<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Matcher<Value>)>,
    {
        Self::Shape(fields.into_iter().map(|(k, m)| (k.into(), m)).collect())
    }
}

impl<T: Matchable + ?Sized> Matcher<T> {
    /// Test one element.
    pub fn matches(&self, element: &T) -> bool {
        match self {
            Self::Exact(expected) => *element.to_value() == *expected,
            Self::Regex(re) => scalar_text(&element.to_value()).is_some_and(|s| re.is_match(&s)),
            Self::Shape(fields) => {
                if fields.is_empty() {
                    return element.to_value().is_object();
                }
                fields.iter().all(|(key, sub)| {
                    element
                        .property(key)
                        .is_some_and(|value| sub.matches(&value))
                })
            }
            Self::Predicate(f) => f(element),
        }
    }
}

/// String form used by regex matching. Lists and objects have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Int(_) | Value::Float(_) => Some(value.to_string()),
        Value::Null | Value::List(_) | Value::Object(_) => None,
    }
}

impl<T: ?Sized> Clone for Matcher<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(v.clone()),
            Self::Regex(re) => Self::Regex(re.clone()),
            Self::Shape(fields) => Self::Shape(fields.clone()),
            Self::Predicate(f) => Self::Predicate(Arc::clone(f)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => f.debug_tuple("Exact").field(v).finish(),
            Self::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Self::Shape(fields) => f.debug_tuple("Shape").field(fields).finish(),
            Self::Predicate(_) => f.write_str("Predicate(<fn>)"),
        }
    }
}

impl<T: ?Sized> From<Value> for Matcher<T> {
    /// Objects become shapes; anything else is compared exactly.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(_) => Self::from_value(value.clone()).unwrap_or(Self::Exact(value)),
            other => Self::Exact(other),
        }
    }
}

impl<T: ?Sized> From<regex::Regex> for Matcher<T> {
    fn from(re: regex::Regex) -> Self {
        Self::Regex(re)
    }
}

macro_rules! exact_from {
    ($($t:ty),*) => {
        $(
            impl<T: ?Sized> From<$t> for Matcher<T> {
                fn from(v: $t) -> Self {
                    Self::Exact(Value::from(v))
                }
            }
        )*
    };
}

exact_from!(&str, String, char, bool, i32, i64, u32, f64);
