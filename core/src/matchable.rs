//! `Matchable`: How elements expose themselves to matchers and projectors
//!
//! Collection queries are generic over the element type `T`, but matchers and
//! projectors work on [`Value`]. This trait is the bridge: it hands out a
//! `Value` view of the element and resolves named properties on it.
//!
//! Properties that are absent resolve to `None`, and a shape matcher treats
//! that as a non-match.

use crate::Value;
use std::borrow::Cow;

/// An element that can be inspected by a [`Matcher`](crate::Matcher) or
/// [`Projector`](crate::Projector).
///
/// # Example
///
/// ```
/// use sucre::{Matchable, Value};
/// use std::borrow::Cow;
///
/// struct User { name: String, age: i64 }
///
/// impl Matchable for User {
///     fn to_value(&self) -> Cow<'_, Value> {
///         Cow::Owned(Value::object([
///             ("name", Value::from(self.name.as_str())),
///             ("age", Value::from(self.age)),
///         ]))
///     }
///
///     fn property(&self, key: &str) -> Option<Value> {
///         match key {
///             "name" => Some(Value::from(self.name.as_str())),
///             "age" => Some(Value::from(self.age)),
///             _ => None,
///         }
///     }
/// }
///
/// let u = User { name: "Cheech".into(), age: 40 };
/// assert_eq!(u.property("age"), Some(Value::Int(40)));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Matchable`",
    label = "matchers and projectors cannot inspect this type",
    note = "implement `Matchable::to_value` to expose the element as a `sucre::Value`"
)]
pub trait Matchable {
    /// The dynamic view of this element.
    fn to_value(&self) -> Cow<'_, Value>;

    /// Resolve a named property. Returns `None` if the property is absent.
    ///
    /// The default reads the property off [`to_value`](Self::to_value).
    fn property(&self, key: &str) -> Option<Value> {
        self.to_value().property(key)
    }
}

impl Matchable for Value {
    fn to_value(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }

    fn property(&self, key: &str) -> Option<Value> {
        Value::property(self, key)
    }
}

impl Matchable for str {
    fn to_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::from(self))
    }

    fn property(&self, key: &str) -> Option<Value> {
        (key == "length").then(|| Value::from(self.chars().count()))
    }
}

impl Matchable for String {
    fn to_value(&self) -> Cow<'_, Value> {
        self.as_str().to_value()
    }

    fn property(&self, key: &str) -> Option<Value> {
        self.as_str().property(key)
    }
}

impl Matchable for char {
    fn to_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::from(*self))
    }
}

impl Matchable for bool {
    fn to_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::Bool(*self))
    }
}

impl Matchable for f64 {
    fn to_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::Float(*self))
    }
}

macro_rules! matchable_int {
    ($($t:ty),*) => {
        $(
            impl Matchable for $t {
                fn to_value(&self) -> Cow<'_, Value> {
                    Cow::Owned(Value::Int(i64::from(*self)))
                }
            }
        )*
    };
}

matchable_int!(i8, i16, i32, i64, u8, u16, u32);

impl Matchable for usize {
    fn to_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::from(*self))
    }
}

impl<T: Matchable> Matchable for Vec<T> {
    fn to_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::List(
            self.iter().map(|item| item.to_value().into_owned()).collect(),
        ))
    }

    fn property(&self, key: &str) -> Option<Value> {
        if key == "length" {
            return Some(Value::from(self.len()));
        }
        key.parse::<usize>()
            .ok()
            .and_then(|i| self.get(i))
            .map(|item| item.to_value().into_owned())
    }
}

impl<T: Matchable + ?Sized> Matchable for &T {
    fn to_value(&self) -> Cow<'_, Value> {
        (**self).to_value()
    }

    fn property(&self, key: &str) -> Option<Value> {
        (**self).property(key)
    }
}

impl<T: Matchable + ?Sized> Matchable for Box<T> {
    fn to_value(&self) -> Cow<'_, Value> {
        (**self).to_value()
    }

    fn property(&self, key: &str) -> Option<Value> {
        (**self).property(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_expose_char_length() {
        assert_eq!("fee".property("length"), Some(Value::Int(3)));
        assert_eq!("日本".property("length"), Some(Value::Int(2)));
        assert_eq!("fee".property("size"), None);
    }

    #[test]
    fn integers_view_as_int() {
        assert_eq!(7_u8.to_value().into_owned(), Value::Int(7));
        assert_eq!((-3_i32).to_value().into_owned(), Value::Int(-3));
    }

    #[test]
    fn references_forward() {
        let s = String::from("abc");
        let r = &s;
        assert_eq!(r.property("length"), Some(Value::Int(3)));
        assert_eq!(r.to_value().into_owned(), Value::from("abc"));
    }

    #[test]
    fn vectors_expose_length_and_indexes() {
        let v = vec![10, 20];
        assert_eq!(v.property("length"), Some(Value::Int(2)));
        assert_eq!(v.property("1"), Some(Value::Int(20)));
        assert_eq!(v.property("x"), None);
    }

    #[test]
    fn values_read_object_keys() {
        let v = Value::object([("a", 1)]);
        assert_eq!(Matchable::property(&v, "a"), Some(Value::Int(1)));
        assert_eq!(Matchable::property(&v, "b"), None);
    }
}
