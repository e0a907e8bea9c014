//! `MatcherSpec`: Config-level matcher specification
//!
//! This type represents a user's *intent* for matching (e.g., "regex on ^fee").
//! It compiles to a runtime [`Matcher`] via [`to_matcher()`](MatcherSpec::to_matcher).
//!
//! # Naming: Spec vs Matcher
//!
//! - [`MatcherSpec`] = what the user wrote in YAML/JSON
//! - [`Matcher`] = what evaluates at query time

use crate::{Matcher, Result, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A matcher specification from user configuration.
///
/// Predicates cannot be written in config, so only the three data-driven
/// strategies appear here.
///
/// # Example
///
/// ```
/// use sucre::{MatcherSpec, Value};
///
/// let spec: MatcherSpec = serde_yaml::from_str("regex: ^f").unwrap();
/// let matcher = spec.to_matcher::<Value>().unwrap();
/// assert!(matcher.matches(&Value::from("fee")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherSpec {
    /// Equality with a value.
    Exact(Value),
    /// Regular expression over the element's string form.
    Regex(String),
    /// Property-wise match.
    Shape(BTreeMap<String, MatcherSpec>),
}

impl MatcherSpec {
    /// Compile this spec into a runtime [`Matcher`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`](crate::Error::InvalidPattern) if a regex
    /// is invalid, or [`Error::PatternTooLong`](crate::Error::PatternTooLong) if it
    /// exceeds the length cap.
    pub fn to_matcher<T: ?Sized>(&self) -> Result<Matcher<T>> {
        log::debug!("compiling matcher {self}");
        match self {
            Self::Exact(v) => Ok(Matcher::Exact(v.clone())),
            Self::Regex(pattern) => Matcher::regex(pattern),
            Self::Shape(fields) => {
                let compiled = fields
                    .iter()
                    .map(|(key, spec)| Ok((key.clone(), spec.to_matcher::<Value>()?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Matcher::Shape(compiled))
            }
        }
    }
}

impl fmt::Display for MatcherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "Exact({v})"),
            Self::Regex(v) => write!(f, "Regex(\"{v}\")"),
            Self::Shape(fields) => {
                f.write_str("Shape{")?;
                for (i, (key, spec)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {spec}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn exact_compiles() {
        let spec = MatcherSpec::Exact(Value::from("hello"));
        let m = spec.to_matcher::<Value>().unwrap();
        assert!(m.matches(&Value::from("hello")));
        assert!(!m.matches(&Value::from("world")));
    }

    #[test]
    fn shape_compiles_from_yaml() {
        let yaml = "shape:\n  age:\n    exact: 14\n  name:\n    regex: ^F\n";
        let spec: MatcherSpec = serde_yaml::from_str(yaml).unwrap();
        let m = spec.to_matcher::<Value>().unwrap();
        assert!(m.matches(&Value::object([
            ("name", Value::from("Franklin")),
            ("age", Value::from(14)),
        ])));
        assert!(!m.matches(&Value::object([("name", Value::from("Franklin"))])));
    }

    #[test]
    fn invalid_regex_fails() {
        let spec = MatcherSpec::Regex("[".into());
        assert!(matches!(
            spec.to_matcher::<Value>(),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn display_is_readable() {
        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), MatcherSpec::Regex("x".into()));
        assert_eq!(MatcherSpec::Shape(fields).to_string(), "Shape{a: Regex(\"x\")}");
        assert_eq!(MatcherSpec::Exact(Value::Int(3)).to_string(), "Exact(3)");
    }
}
