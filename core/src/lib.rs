//! sucre - Text and collection utilities
//!
//! Case transforms, templates, inflections, script and width conversion,
//! codecs, and a query engine for slices, all driven by one generalized
//! matcher and one projector.
//!
//! # Architecture
//!
//! - [`Value`]: Erased element view (null, bool, numbers, string, list, object)
//! - [`Matchable`]: How an element exposes its `Value` view and named properties
//! - [`Matcher<T>`]: Exact, regex, shape, or predicate test over an element
//! - [`Projector<T>`]: Identity, dotted property path, or closure
//! - [`StrExt`]: String operations
//! - [`SliceExt`] / [`VecExt`]: Collection queries and edits
//! - [`Inflections`]: Plural/singular/human rules, acronyms, title stoplist
//! - [`timing`]: Delay, debounce, throttle, lazy, after, once
//!
//! # Key Design Insights
//!
//! 1. **One evaluation routine**: every matcher-driven query (`find`, `filter_by`,
//!    `count_by`, `exclude`, `remove_where`, `every`, ...) goes through
//!    [`Matcher::matches`].
//!
//! 2. **Absent → false**: a shape matcher whose property is missing on the
//!    element does not match. Projections of missing properties are `None`.
//!
//! 3. **No hidden globals**: inflection tables are passed in. The built-in
//!    English table is an immutable lazily compiled static.
//!
//! # Example
//!
//! ```
//! use sucre::prelude::*;
//!
//! assert_eq!("moz-border-radius".camelize(false), "mozBorderRadius");
//! assert_eq!("jumpy".at(5, true), Some('j'));
//!
//! let lengths = ["fee", "fo", "fum"].sorted_by(&Projector::from("length"), false);
//! assert_eq!(lengths, ["fo", "fee", "fum"]);
//!
//! let evens = [1, 2, 3, 4].find_index(&Matcher::predicate(|n: &i32| n % 2 == 0));
//! assert_eq!(evens, Some(1));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod case;
mod codec;
mod collate;
mod config;
mod format;
mod index;
mod inflect;
mod matchable;
mod matcher;
mod matcher_spec;
mod projector;
mod query;
mod script;
mod text;
mod value;
mod width;

pub mod catalogue;
pub mod object;
pub mod timing;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use matchable::Matchable;
pub use matcher::Matcher;
pub use projector::Projector;
pub use value::Value;

// Config types
pub use config::{InflectionsConfig, IrregularConfig, RuleConfig};
pub use inflect::Inflections;
pub use matcher_spec::MatcherSpec;

// Extension traits
pub use query::{SliceExt, VecExt};
pub use text::{StrExt, TextPattern, Truncate, TruncateFrom};

// Leaf facilities
pub use format::format_tokens;
pub use script::Script;
pub use width::WidthModes;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use sucre::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        Error,
        // Config types
        Inflections,
        // Core types
        Matchable,
        Matcher,
        MatcherSpec,
        Projector,
        Script,
        // Extension traits
        SliceExt,
        StrExt,
        TextPattern,
        Truncate,
        TruncateFrom,
        Value,
        VecExt,
        WidthModes,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum length for literal patterns in configuration (irregulars, acronyms, stoplist).
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum length for regex patterns.
///
/// Regex compilation is expensive even with the linear-time Rust `regex` crate.
/// Shorter limit than [`MAX_PATTERN_LENGTH`] because regex complexity scales
/// faster than literal matching.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from operation arguments, pattern compilation, config loading, and decoding.
///
/// Out-of-range indexes are not errors (they yield `None` or clamp), and
/// unresolved template tokens are left in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An argument has the wrong kind or an unusable value.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Which argument was rejected.
        argument: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// A regex pattern failed to compile.
    #[error("invalid pattern \"{pattern}\": {message}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        message: String,
    },
    /// A pattern exceeds the maximum allowed length.
    #[error("pattern length is {len}, but maximum allowed is {max}")]
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// Configuration deserialization or construction failed.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// The underlying error message.
        message: String,
    },
    /// Encoded input (base64, percent-encoding) is malformed.
    #[error("decode failed: {message}")]
    Decode {
        /// The underlying error message.
        message: String,
    },
}

impl Error {
    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

/// Result alias over [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Compile a regex after checking it against [`MAX_REGEX_PATTERN_LENGTH`].
pub(crate) fn compile_regex(pattern: &str) -> Result<regex::Regex> {
    if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
        return Err(Error::PatternTooLong {
            len: pattern.len(),
            max: MAX_REGEX_PATTERN_LENGTH,
        });
    }
    regex::Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_regex_rejects_long_patterns() {
        let long = "a".repeat(MAX_REGEX_PATTERN_LENGTH + 1);
        assert_eq!(
            compile_regex(&long).unwrap_err(),
            Error::PatternTooLong {
                len: MAX_REGEX_PATTERN_LENGTH + 1,
                max: MAX_REGEX_PATTERN_LENGTH,
            }
        );
    }

    #[test]
    fn compile_regex_reports_bad_syntax() {
        let err = compile_regex("(unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
        assert!(err.to_string().starts_with("invalid pattern \"(unclosed\""));
    }

    #[test]
    fn errors_display_argument_name() {
        let err = Error::invalid_argument("matcher", "null is not matchable");
        assert_eq!(err.to_string(), "invalid argument `matcher`: null is not matchable");
    }
}
