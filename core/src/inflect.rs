//! `Inflections`: Compiled plural, singular, and human rules
//!
//! Rules are stored highest priority first; the first rule whose pattern
//! matches rewrites the word. Irregular pairs compile to anchored rules that
//! keep the case of the word's first letter.
//!
//! The built-in English table is compiled once on first use and never
//! mutated. Callers with other locale data build their own table from an
//! [`InflectionsConfig`] and pass it where needed.

use crate::config::{InflectionsConfig, IrregularConfig, RuleConfig};
use crate::{compile_regex, Error, Result, MAX_PATTERN_LENGTH};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn compile(config: &RuleConfig) -> Result<Self> {
        Ok(Self {
            pattern: compile_regex(&format!("(?i){}", config.pattern))?,
            replacement: config.replacement.clone(),
        })
    }
}

/// A compiled inflection table.
///
/// ```
/// use sucre::Inflections;
///
/// let en = Inflections::english();
/// assert_eq!(en.pluralize("octopus"), "octopi");
/// assert_eq!(en.singularize("people"), "person");
/// assert_eq!(en.pluralize("sheep"), "sheep");
/// ```
#[derive(Debug, Clone)]
pub struct Inflections {
    plurals: Vec<Rule>,
    singulars: Vec<Rule>,
    humans: Vec<Rule>,
    uncountables: Vec<String>,
    uncountable_pattern: Option<Regex>,
    /// Lowercase form to canonical spelling.
    acronyms: BTreeMap<String, String>,
    minor_words: BTreeSet<String>,
}

impl Inflections {
    /// The built-in English table.
    #[must_use]
    pub fn english() -> &'static Self {
        static ENGLISH: OnceLock<Inflections> = OnceLock::new();
        // Built-in rules are pinned by `built_in_rules_compile`.
        ENGLISH.get_or_init(|| {
            Self::compile(&english_config(), None)
                .expect("built-in English inflection rules are valid regexes")
        })
    }

    /// Compile a table from config.
    ///
    /// With `extend_defaults`, the config's rules take priority over the
    /// built-in English ones, and its word lists are added to them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] or [`Error::PatternTooLong`] for a bad
    /// rule, or [`Error::InvalidConfig`] for an empty or oversized word.
    pub fn from_config(config: &InflectionsConfig) -> Result<Self> {
        let base = config.extend_defaults.then(Self::english);
        let table = Self::compile(config, base)?;
        log::debug!(
            "compiled inflections: {} plural, {} singular, {} human rules, {} uncountables, {} acronyms, {} minor words",
            table.plurals.len(),
            table.singulars.len(),
            table.humans.len(),
            table.uncountables.len(),
            table.acronyms.len(),
            table.minor_words.len(),
        );
        Ok(table)
    }

    /// Parse YAML config and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the YAML does not describe an
    /// [`InflectionsConfig`], or any error from [`from_config`](Self::from_config).
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: InflectionsConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::InvalidConfig {
                message: e.to_string(),
            })?;
        Self::from_config(&config)
    }

    /// Parse JSON config and compile it.
    ///
    /// # Errors
    ///
    /// Same as [`from_yaml`](Self::from_yaml).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: InflectionsConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig {
                message: e.to_string(),
            })?;
        Self::from_config(&config)
    }

    fn compile(config: &InflectionsConfig, base: Option<&Self>) -> Result<Self> {
        let mut plurals = Vec::new();
        let mut singulars = Vec::new();
        for irregular in &config.irregulars {
            let (plural, singular) = irregular_rules(irregular)?;
            plurals.extend(plural);
            singulars.extend(singular);
        }
        for rule in &config.plurals {
            plurals.push(Rule::compile(rule)?);
        }
        for rule in &config.singulars {
            singulars.push(Rule::compile(rule)?);
        }
        let mut humans = config
            .humans
            .iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>>>()?;

        let mut uncountables = Vec::new();
        let mut acronyms = BTreeMap::new();
        let mut minor_words = BTreeSet::new();
        if let Some(base) = base {
            plurals.extend(base.plurals.iter().cloned());
            singulars.extend(base.singulars.iter().cloned());
            humans.extend(base.humans.iter().cloned());
            uncountables.extend(base.uncountables.iter().cloned());
            acronyms.extend(base.acronyms.clone());
            minor_words.extend(base.minor_words.iter().cloned());
        }
        for word in &config.uncountables {
            uncountables.push(checked_word("uncountables", word)?.to_lowercase());
        }
        for word in &config.acronyms {
            let word = checked_word("acronyms", word)?;
            acronyms.insert(word.to_lowercase(), word.to_string());
        }
        for word in &config.minor_words {
            minor_words.insert(checked_word("minor_words", word)?.to_lowercase());
        }

        let uncountable_pattern = if uncountables.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = uncountables.iter().map(|w| regex::escape(w)).collect();
            Some(compile_regex(&format!(r"(?i)\b(?:{})$", alternatives.join("|")))?)
        };

        Ok(Self {
            plurals,
            singulars,
            humans,
            uncountables,
            uncountable_pattern,
            acronyms,
            minor_words,
        })
    }

    /// Plural form of the last word in `word`.
    #[must_use]
    pub fn pluralize(&self, word: &str) -> String {
        self.inflect(word, &self.plurals)
    }

    /// Singular form of the last word in `word`.
    #[must_use]
    pub fn singularize(&self, word: &str) -> String {
        self.inflect(word, &self.singulars)
    }

    fn inflect(&self, word: &str, rules: &[Rule]) -> String {
        if word.trim().is_empty() || self.is_uncountable(word) {
            return word.to_string();
        }
        apply_first(rules, word).unwrap_or_else(|| word.to_string())
    }

    /// Whether the last word of `word` has no distinct plural.
    #[must_use]
    pub fn is_uncountable(&self, word: &str) -> bool {
        self.uncountable_pattern
            .as_ref()
            .is_some_and(|re| re.is_match(word))
    }

    /// Apply the first matching human rule, if any.
    #[must_use]
    pub fn apply_humans(&self, text: &str) -> String {
        apply_first(&self.humans, text).unwrap_or_else(|| text.to_string())
    }

    /// Canonical spelling of an acronym, looked up case-insensitively.
    #[must_use]
    pub fn acronym(&self, word: &str) -> Option<&str> {
        self.acronyms.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Whether `titleize` keeps `word` lowercase mid-title.
    #[must_use]
    pub fn is_minor_word(&self, word: &str) -> bool {
        self.minor_words.contains(&word.to_lowercase())
    }
}

impl Default for Inflections {
    fn default() -> Self {
        Self::english().clone()
    }
}

fn apply_first(rules: &[Rule], text: &str) -> Option<String> {
    rules
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.pattern.replace(text, rule.replacement.as_str()).into_owned())
}

fn checked_word<'a>(field: &str, word: &'a str) -> Result<&'a str> {
    if word.trim().is_empty() {
        return Err(Error::InvalidConfig {
            message: format!("{field} contains an empty word"),
        });
    }
    if word.len() > MAX_PATTERN_LENGTH {
        return Err(Error::PatternTooLong {
            len: word.len(),
            max: MAX_PATTERN_LENGTH,
        });
    }
    Ok(word)
}

/// Plural and singular rules for one irregular pair. The first letter is
/// captured so `Person` becomes `People`.
fn irregular_rules(irregular: &IrregularConfig) -> Result<(Vec<Rule>, Vec<Rule>)> {
    let singular = checked_word("irregulars", &irregular.singular)?;
    let plural = checked_word("irregulars", &irregular.plural)?;
    let split = |w: &str| -> (String, String) {
        let mut chars = w.chars();
        let first = chars.next().map(String::from).unwrap_or_default();
        (first, chars.as_str().to_string())
    };
    let (s_first, s_rest) = split(singular);
    let (p_first, p_rest) = split(plural);
    let literal = |s: &str| s.replace('$', "$$");

    let rule = |head: &str, tail: &str, replacement: String| -> Result<Rule> {
        Ok(Rule {
            pattern: compile_regex(&format!(
                r"(?i)\b({}){}$",
                regex::escape(head),
                regex::escape(tail)
            ))?,
            replacement,
        })
    };

    if s_first.to_lowercase() == p_first.to_lowercase() {
        let to_plural = format!("${{1}}{}", literal(&p_rest));
        let to_singular = format!("${{1}}{}", literal(&s_rest));
        Ok((
            vec![
                rule(&s_first, &s_rest, to_plural.clone())?,
                rule(&p_first, &p_rest, to_plural)?,
            ],
            vec![
                rule(&p_first, &p_rest, to_singular.clone())?,
                rule(&s_first, &s_rest, to_singular)?,
            ],
        ))
    } else {
        Ok((
            vec![
                rule(&s_first, &s_rest, literal(plural))?,
                rule(&p_first, &p_rest, literal(plural))?,
            ],
            vec![
                rule(&p_first, &p_rest, literal(singular))?,
                rule(&s_first, &s_rest, literal(singular))?,
            ],
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Built-in English
// ═══════════════════════════════════════════════════════════════════════════════

const ENGLISH_PLURALS: &[(&str, &str)] = &[
    ("(quiz)$", "${1}zes"),
    ("^(oxen)$", "${1}"),
    ("^(ox)$", "${1}en"),
    ("(m|l)ice$", "${1}ice"),
    ("(m|l)ouse$", "${1}ice"),
    ("(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    ("(x|ch|ss|sh)$", "${1}es"),
    ("([^aeiouy]|qu)y$", "${1}ies"),
    ("(hive)$", "${1}s"),
    ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    ("sis$", "ses"),
    ("([ti])a$", "${1}a"),
    ("([ti])um$", "${1}a"),
    ("(buffal|tomat)o$", "${1}oes"),
    ("(bu)s$", "${1}ses"),
    ("(alias|status)$", "${1}es"),
    ("(octop|vir)i$", "${1}i"),
    ("(octop|vir)us$", "${1}i"),
    ("^(ax|test)is$", "${1}es"),
    ("s$", "s"),
    ("$", "s"),
];

const ENGLISH_SINGULARS: &[(&str, &str)] = &[
    ("(database)s$", "${1}"),
    ("(quiz)zes$", "${1}"),
    ("(matr)ices$", "${1}ix"),
    ("(vert|ind)ices$", "${1}ex"),
    ("^(ox)en", "${1}"),
    ("(alias|status)(es)?$", "${1}"),
    ("(octop|vir)(us|i)$", "${1}us"),
    ("^(a)x[ie]s$", "${1}xis"),
    ("(cris|test)(is|es)$", "${1}is"),
    ("(shoe)s$", "${1}"),
    ("(o)es$", "${1}"),
    ("(bus)(es)?$", "${1}"),
    ("(m|l)ice$", "${1}ouse"),
    ("(x|ch|ss|sh)es$", "${1}"),
    ("(m)ovies$", "${1}ovie"),
    ("(s)eries$", "${1}eries"),
    ("([^aeiouy]|qu)ies$", "${1}y"),
    ("([lr])ves$", "${1}f"),
    ("(tive)s$", "${1}"),
    ("(hive)s$", "${1}"),
    ("([^f])ves$", "${1}fe"),
    ("(^analy)(sis|ses)$", "${1}sis"),
    (
        "((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    ("([ti])a$", "${1}um"),
    ("(n)ews$", "${1}ews"),
    ("(ss)$", "${1}"),
    ("s$", ""),
];

const ENGLISH_IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("cow", "kine"),
    ("goose", "geese"),
    ("zombie", "zombies"),
];

const ENGLISH_UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

const ENGLISH_MINOR_WORDS: &[&str] = &[
    "and", "or", "nor", "a", "an", "the", "so", "but", "to", "of", "at", "by", "from", "into",
    "on", "onto", "off", "out", "in", "over", "with", "for",
];

fn rules(table: &[(&str, &str)]) -> Vec<RuleConfig> {
    table
        .iter()
        .map(|&(pattern, replacement)| RuleConfig::new(pattern, replacement))
        .collect()
}

fn english_config() -> InflectionsConfig {
    InflectionsConfig {
        extend_defaults: false,
        plurals: rules(ENGLISH_PLURALS),
        singulars: rules(ENGLISH_SINGULARS),
        humans: Vec::new(),
        irregulars: ENGLISH_IRREGULARS
            .iter()
            .map(|&(singular, plural)| IrregularConfig {
                singular: singular.to_string(),
                plural: plural.to_string(),
            })
            .collect(),
        uncountables: ENGLISH_UNCOUNTABLES.iter().map(|w| (*w).to_string()).collect(),
        acronyms: Vec::new(),
        minor_words: ENGLISH_MINOR_WORDS.iter().map(|w| (*w).to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_rules_compile() {
        let config = english_config();
        for rule in config.plurals.iter().chain(&config.singulars) {
            assert!(Rule::compile(rule).is_ok(), "bad rule {:?}", rule.pattern);
        }
        for irregular in &config.irregulars {
            assert!(irregular_rules(irregular).is_ok(), "bad irregular {}", irregular.singular);
        }
        let table = Inflections::compile(&config, None).unwrap();
        assert!(table.plurals.len() > config.plurals.len());
        assert!(table.singulars.len() > config.singulars.len());
    }

    #[test]
    fn pluralize_examples() {
        let en = Inflections::english();
        assert_eq!(en.pluralize("post"), "posts");
        assert_eq!(en.pluralize("octopus"), "octopi");
        assert_eq!(en.pluralize("sheep"), "sheep");
        assert_eq!(en.pluralize("words"), "words");
        assert_eq!(en.pluralize("CamelOctopus"), "CamelOctopi");
    }

    #[test]
    fn pluralize_rules() {
        let en = Inflections::english();
        assert_eq!(en.pluralize("box"), "boxes");
        assert_eq!(en.pluralize("query"), "queries");
        assert_eq!(en.pluralize("wife"), "wives");
        assert_eq!(en.pluralize("matrix"), "matrices");
        assert_eq!(en.pluralize("mouse"), "mice");
        assert_eq!(en.pluralize("quiz"), "quizzes");
        assert_eq!(en.pluralize("ox"), "oxen");
    }

    #[test]
    fn singularize_examples() {
        let en = Inflections::english();
        assert_eq!(en.singularize("posts"), "post");
        assert_eq!(en.singularize("octopi"), "octopus");
        assert_eq!(en.singularize("sheep"), "sheep");
        assert_eq!(en.singularize("word"), "word");
        assert_eq!(en.singularize("CamelOctopi"), "CamelOctopus");
        assert_eq!(en.singularize("queries"), "query");
        assert_eq!(en.singularize("analyses"), "analysis");
    }

    #[test]
    fn irregulars_keep_first_letter_case() {
        let en = Inflections::english();
        assert_eq!(en.pluralize("person"), "people");
        assert_eq!(en.pluralize("Person"), "People");
        assert_eq!(en.pluralize("people"), "people");
        assert_eq!(en.singularize("Children"), "Child");
        assert_eq!(en.pluralize("cow"), "kine");
        assert_eq!(en.singularize("kine"), "cow");
    }

    #[test]
    fn irregulars_anchor_on_word_boundary() {
        let en = Inflections::english();
        assert_eq!(en.pluralize("human"), "humans");
        assert_eq!(en.pluralize("Man"), "Men");
    }

    #[test]
    fn blank_words_pass_through() {
        assert_eq!(Inflections::english().pluralize(""), "");
        assert_eq!(Inflections::english().pluralize("  "), "  ");
    }

    #[test]
    fn config_rules_take_priority() {
        let table = Inflections::from_yaml(
            "plurals:\n  - { pattern: '(ox)$', replacement: '${1}es' }\nuncountables: [pokemon]\n",
        )
        .unwrap();
        assert_eq!(table.pluralize("ox"), "oxes");
        assert_eq!(table.pluralize("pokemon"), "pokemon");
        assert_eq!(table.pluralize("post"), "posts");
        assert_eq!(table.pluralize("sheep"), "sheep");
    }

    #[test]
    fn config_without_defaults_stands_alone() {
        let table = Inflections::from_json(
            r#"{"extend_defaults": false, "irregulars": [{"singular": "cactus", "plural": "cacti"}]}"#,
        )
        .unwrap();
        assert_eq!(table.pluralize("cactus"), "cacti");
        assert_eq!(table.pluralize("post"), "post");
        assert!(!table.is_minor_word("the"));
    }

    #[test]
    fn acronyms_lookup_case_insensitively() {
        let table = Inflections::from_yaml("acronyms: [HTML, iOS]").unwrap();
        assert_eq!(table.acronym("html"), Some("HTML"));
        assert_eq!(table.acronym("IOS"), Some("iOS"));
        assert_eq!(table.acronym("xml"), None);
    }

    #[test]
    fn bad_configs_are_rejected() {
        assert!(matches!(
            Inflections::from_yaml("plurals: [{ pattern: '(', replacement: x }]"),
            Err(Error::InvalidPattern { .. })
        ));
        assert!(matches!(
            Inflections::from_yaml("uncountables: ['']"),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            Inflections::from_yaml("plurals: 3"),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn minor_words() {
        let en = Inflections::english();
        assert!(en.is_minor_word("The"));
        assert!(!en.is_minor_word("man"));
    }
}
