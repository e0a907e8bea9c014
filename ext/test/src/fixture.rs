//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them through [`sucre::catalogue`].
//!
//! ```yaml
//! name: at_wraps
//! description: Indexes past either end wrap around
//! op: at
//! cases:
//!   - name: past the end
//!     input: jumpy
//!     args: { index: 5 }
//!     expect: j
//!   - name: not a string
//!     input: { a: 1 }
//!     error: invalid_argument
//! ```
//!
//! A case may override the fixture's `op`. A fixture may carry an
//! `inflections` table that replaces the built-in English one.

use serde::Deserialize;
use sucre::{catalogue, Error, Inflections, InflectionsConfig, Value};

/// A complete test fixture
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    /// Operation every case runs unless it names its own.
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub inflections: Option<InflectionsConfig>,
    pub cases: Vec<TestCase>,
}

/// Test case
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub op: Option<String>,
    pub input: Value,
    #[serde(default)]
    pub args: Value,
    /// Expected output. Absent means `null`.
    #[serde(default)]
    pub expect: Value,
    /// Expected error kind instead of an output.
    #[serde(default)]
    pub error: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

/// Snake-case name of an error variant, as fixtures spell it.
#[must_use]
pub fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::InvalidArgument { .. } => "invalid_argument",
        Error::InvalidPattern { .. } => "invalid_pattern",
        Error::PatternTooLong { .. } => "pattern_too_long",
        Error::InvalidConfig { .. } => "invalid_config",
        Error::Decode { .. } => "decode",
    }
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture's `inflections` table does not compile.
    pub fn run(&self) -> Result<Vec<CaseResult>, Error> {
        let custom = self
            .inflections
            .as_ref()
            .map(Inflections::from_config)
            .transpose()?;
        let inflections = custom.as_ref().unwrap_or_else(|| Inflections::english());

        Ok(self
            .cases
            .iter()
            .map(|case| self.run_case(case, inflections))
            .collect())
    }

    fn run_case(&self, case: &TestCase, inflections: &Inflections) -> CaseResult {
        let outcome = match case.op.as_deref().or(self.op.as_deref()) {
            Some(op) => catalogue::invoke(op, &case.input, &case.args, inflections),
            None => Err(Error::InvalidArgument {
                argument: "operation",
                reason: "no op on the case or the fixture".into(),
            }),
        };

        let (passed, actual) = match (&case.error, outcome) {
            (None, Ok(out)) => (out == case.expect, format!("{out:?}")),
            (Some(kind), Err(err)) => (error_kind(&err) == kind, format!("error {err}")),
            (None, Err(err)) => (false, format!("error {err}")),
            (Some(_), Ok(out)) => (false, format!("{out:?}")),
        };
        let expected = match &case.error {
            Some(kind) => format!("error {kind}"),
            None => format!("{:?}", case.expect),
        };

        CaseResult {
            case_name: case.name.clone(),
            passed,
            expected,
            actual,
        }
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' has bad inflections: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: pluralize
description: Built-in and custom plurals
op: pluralize
cases:
  - name: regular
    input: post
    expect: posts
  - name: wrong input
    input: 3
    error: invalid_argument
---
name: custom
description: Fixture-level table
inflections:
  irregulars: [{ singular: cactus, plural: cacti }]
cases:
  - name: irregular from the table
    op: pluralize
    input: cactus
    expect: cacti
"#;

    #[test]
    fn parses_multi_document_yaml() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].cases.len(), 2);
        assert!(fixtures[1].inflections.is_some());
    }

    #[test]
    fn runs_cases() {
        for fixture in Fixture::from_yaml_multi(YAML).unwrap() {
            fixture.run_and_assert();
        }
    }

    #[test]
    fn reports_mismatches() {
        let fixture = Fixture::from_yaml(
            "name: bad\ndescription: wrong expectation\nop: reverse\ncases:\n  - { name: r, input: abc, expect: abc }\n",
        )
        .unwrap();
        let results = fixture.run().unwrap();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, r#"String("cba")"#);
    }

    #[test]
    fn missing_op_fails_the_case() {
        let fixture =
            Fixture::from_yaml("name: x\ndescription: no op\ncases:\n  - { name: r, input: abc }\n").unwrap();
        assert!(!fixture.run().unwrap()[0].passed);
    }

    #[test]
    fn expect_defaults_to_null() {
        let fixture = Fixture::from_yaml(
            "name: x\ndescription: null out\nop: at\ncases:\n  - { name: r, input: abc, args: { index: 9, wrap: false } }\n",
        )
        .unwrap();
        fixture.run_and_assert();
    }
}
