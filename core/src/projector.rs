//! `Projector`: Per-element value extraction for grouping, sorting, and aggregates
//!
//! A string shortcut (`"length"`, `"user.name"`) and a closure normalize to the
//! same type before any query runs. The path is split once at construction.

use crate::{Matchable, Value};
use std::fmt;
use std::sync::Arc;

/// Closure type held by [`Projector::Func`].
pub type ProjectFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Maps an element to the value an aggregate works on.
///
/// ```
/// use sucre::{Projector, Value};
///
/// let by_len = Projector::<&str>::from("length");
/// assert_eq!(by_len.project(&"fee"), Some(Value::Int(3)));
///
/// let doubled = Projector::func(|n: &i32| Value::from(n * 2));
/// assert_eq!(doubled.project(&4), Some(Value::Int(8)));
/// ```
pub enum Projector<T: ?Sized> {
    /// The element itself.
    Identity,
    /// A property path, one segment per level.
    Path(Vec<String>),
    /// Caller-supplied projection.
    Func(ProjectFn<T>),
}

impl<T: ?Sized> Projector<T> {
    /// Create a closure projector.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }

    /// Create a path projector from a dotted path. An empty path is the identity.
    #[must_use]
    pub fn path(path: &str) -> Self {
        if path.is_empty() {
            return Self::Identity;
        }
        Self::Path(path.split('.').map(str::to_string).collect())
    }
}

impl<T: Matchable + ?Sized> Projector<T> {
    /// Project one element. Missing properties give `None`.
    pub fn project(&self, element: &T) -> Option<Value> {
        match self {
            Self::Identity => Some(element.to_value().into_owned()),
            Self::Path(segments) => {
                let (first, rest) = segments.split_first()?;
                let mut current = element.property(first)?;
                for segment in rest {
                    current = current.property(segment)?;
                }
                Some(current)
            }
            Self::Func(f) => Some(f(element)),
        }
    }
}

impl<T: ?Sized> Default for Projector<T> {
    fn default() -> Self {
        Self::Identity
    }
}

impl<T: ?Sized> Clone for Projector<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Path(p) => Self::Path(p.clone()),
            Self::Func(f) => Self::Func(Arc::clone(f)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Projector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Path(p) => write!(f, "Path({})", p.join(".")),
            Self::Func(_) => f.write_str("Func(<fn>)"),
        }
    }
}

impl<T: ?Sized> From<&str> for Projector<T> {
    fn from(path: &str) -> Self {
        Self::path(path)
    }
}

impl<T: ?Sized> From<String> for Projector<T> {
    fn from(path: String) -> Self {
        Self::path(&path)
    }
}
