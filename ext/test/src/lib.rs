//! sucre-test: Conformance fixtures and a sample element type
//!
//! Provides [`Record`], a plain field map that implements [`Matchable`], and
//! (with the `fixtures` feature) a YAML fixture runner that drives every
//! operation through the [`catalogue`](sucre::catalogue).
//!
//! `Record` is the reference for bringing your own element type to the
//! collection queries: expose a [`Value`] view and resolve named properties.
//!
//! # Example
//!
//! ```
//! use sucre_test::prelude::*;
//!
//! let people = [
//!     Record::new().with("name", "Ann").with("city", "Oslo"),
//!     Record::new().with("name", "Bob").with("city", "Rome"),
//! ];
//!
//! let oslo = Matcher::from_value(Value::object([("city", "Oslo")])).unwrap();
//! assert_eq!(people.count_by(&oslo), 1);
//! ```

use sucre::{Matchable, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// A record: named fields holding dynamic values.
///
/// Used where tests need predictable, structured elements without declaring
/// a struct per case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Get a field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl Matchable for Record {
    fn to_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::Object(self.fields.clone()))
    }

    fn property(&self, key: &str) -> Option<Value> {
        self.fields.get(key).cloned()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::Record;
    pub use sucre::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use sucre::prelude::*;

    fn crew() -> Vec<Record> {
        vec![
            Record::new().with("name", "Ann").with("age", 31).with("city", "Oslo"),
            Record::new().with("name", "bob").with("age", 25).with("city", "Rome"),
            Record::new().with("name", "Cid").with("age", 31).with("city", "Oslo"),
            Record::new().with("name", "Dee"),
        ]
    }

    #[test]
    fn record_builder() {
        let r = Record::new().with("foo", "bar").with("n", 3);

        assert_eq!(r.get("foo"), Some(&Value::from("bar")));
        assert_eq!(r.get("n"), Some(&Value::Int(3)));
        assert_eq!(r.get("missing"), None);
    }

    #[test]
    fn shape_matchers_read_fields() {
        let crew = crew();
        let oslo = Matcher::from_value(Value::object([("city", "Oslo")])).unwrap();

        assert_eq!(crew.count_by(&oslo), 2);
        assert_eq!(crew.find_index(&oslo), Some(0));
    }

    #[test]
    fn missing_fields_do_not_match() {
        let crew = crew();
        let aged = Matcher::from_value(Value::object([("age", 31)])).unwrap();

        assert_eq!(crew.find_all(&aged).len(), 2);
        assert!(crew[3].property("age").is_none());
        assert!(!aged.matches(&crew[3]));
    }

    #[test]
    fn projections_read_fields() {
        let crew = crew();
        let by_city = crew.group_by(&Projector::from("city"));

        assert_eq!(by_city["Oslo"].len(), 2);
        assert_eq!(by_city["null"].len(), 1);

        let oldest = crew.max_of(&Projector::from("age"));
        assert_eq!(oldest.len(), 2);
        assert!((crew.sum_of(&Projector::from("age")) - 87.0).abs() < f64::EPSILON);
    }

    #[test]
    fn predicates_see_the_record() {
        let crew = crew();
        let lower = Matcher::predicate(|r: &Record| {
            r.get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.starts_with(char::is_lowercase))
        });

        assert_eq!(crew.find(&lower).and_then(|r| r.get("name")), Some(&Value::from("bob")));
    }
}
