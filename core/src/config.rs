//! Config types for inflection tables.
//!
//! These types mirror the compiled [`Inflections`](crate::Inflections) but are
//! serde-deserializable, so locale data can live in YAML or JSON files and be
//! handed to the library instead of being baked in.
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Loader |
//! |-------------|-------------|--------|
//! | [`InflectionsConfig`] | [`Inflections`](crate::Inflections) | `Inflections::from_config()` |
//! | [`RuleConfig`] | compiled `(Regex, replacement)` | same |
//! | [`IrregularConfig`] | anchored singular/plural rule pair | same |
//!
//! ```yaml
//! extend_defaults: true
//! plurals:
//!   - { pattern: "(ox)$", replacement: "${1}en" }
//! irregulars:
//!   - { singular: cactus, plural: cacti }
//! uncountables: [pokemon]
//! acronyms: [HTML]
//! minor_words: [via]
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for an [`Inflections`](crate::Inflections) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InflectionsConfig {
    /// Layer these rules over the built-in English table (default `true`).
    #[serde(default = "default_true")]
    pub extend_defaults: bool,

    /// Singular to plural rules, highest priority first.
    #[serde(default)]
    pub plurals: Vec<RuleConfig>,

    /// Plural to singular rules, highest priority first.
    #[serde(default)]
    pub singulars: Vec<RuleConfig>,

    /// Rules applied by `humanize` before capitalizing.
    #[serde(default)]
    pub humans: Vec<RuleConfig>,

    /// Word pairs that do not follow the rules.
    #[serde(default)]
    pub irregulars: Vec<IrregularConfig>,

    /// Words with no distinct plural.
    #[serde(default)]
    pub uncountables: Vec<String>,

    /// Words kept in their given case by `camelize` and `humanize`.
    #[serde(default)]
    pub acronyms: Vec<String>,

    /// Words `titleize` leaves lowercase mid-title.
    #[serde(default)]
    pub minor_words: Vec<String>,
}

impl Default for InflectionsConfig {
    fn default() -> Self {
        Self {
            extend_defaults: true,
            plurals: Vec::new(),
            singulars: Vec::new(),
            humans: Vec::new(),
            irregulars: Vec::new(),
            uncountables: Vec::new(),
            acronyms: Vec::new(),
            minor_words: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A regex rewrite rule. Patterns match case-insensitively; replacements use
/// `${1}` group syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Regular expression (Rust `regex` syntax).
    pub pattern: String,
    /// Replacement text.
    pub replacement: String,
}

impl RuleConfig {
    /// Create a rule.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// An irregular singular/plural pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrregularConfig {
    /// Singular form.
    pub singular: String,
    /// Plural form.
    pub plural: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_extends_defaults() {
        let config: InflectionsConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.extend_defaults);
        assert!(config.plurals.is_empty());
    }

    #[test]
    fn full_yaml_parses() {
        let yaml = r#"
extend_defaults: false
plurals:
  - { pattern: "(ox)$", replacement: "${1}en" }
irregulars:
  - { singular: cactus, plural: cacti }
uncountables: [pokemon]
acronyms: [HTML]
minor_words: [via]
"#;
        let config: InflectionsConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.extend_defaults);
        assert_eq!(config.plurals, vec![RuleConfig::new("(ox)$", "${1}en")]);
        assert_eq!(config.irregulars[0].plural, "cacti");
        assert_eq!(config.acronyms, vec!["HTML"]);
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<InflectionsConfig, _> = serde_yaml::from_str("plural: []");
        assert!(result.is_err());
    }
}
