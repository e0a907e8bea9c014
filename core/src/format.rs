//! Token formatter: `{name}` and `{n}` placeholder substitution.
//!
//! Arguments are flattened (lists contribute their items), then numbered from
//! 1. Scalar arguments fill their position; object arguments occupy a position
//! and contribute their keys. Everything merges left to right into one fresh
//! map, so later sources win. Placeholders with no source stay as written.

use crate::Value;
use std::collections::BTreeMap;

/// Substitute placeholders in `template`.
///
/// ```
/// use sucre::{format_tokens, Value};
///
/// let out = format_tokens("{n} and {r}", &[
///     Value::object([("n", "Cheech")]),
///     Value::object([("r", "Chong")]),
/// ]);
/// assert_eq!(out, "Cheech and Chong");
///
/// assert_eq!(format_tokens("You are {1} years old today.", &[Value::from(14)]),
///            "You are 14 years old today.");
/// assert_eq!(format_tokens("{missing}", &[]), "{missing}");
/// ```
#[must_use]
pub fn format_tokens(template: &str, args: &[Value]) -> String {
    let tokens = merge_tokens(args);
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let key = after
            .find(['{', '}'])
            .filter(|&end| end > 0 && after[end..].starts_with('}'))
            .map(|end| &after[..end]);
        match key {
            Some(key) => {
                match tokens.get(key) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn merge_tokens(args: &[Value]) -> BTreeMap<String, Value> {
    let mut flat = Vec::new();
    flatten(args, &mut flat);
    let mut tokens = BTreeMap::new();
    for (i, arg) in flat.into_iter().enumerate() {
        match arg {
            Value::Object(map) => {
                for (k, v) in map {
                    tokens.insert(k.clone(), v.clone());
                }
            }
            scalar => {
                tokens.insert((i + 1).to_string(), scalar.clone());
            }
        }
    }
    tokens
}

fn flatten<'a>(args: &'a [Value], out: &mut Vec<&'a Value>) {
    for arg in args {
        match arg {
            Value::List(items) => flatten(items, out),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_tokens() {
        assert_eq!(
            format_tokens(
                "Welcome, Mr. {name}.",
                &[Value::object([("name", "Franklin")])]
            ),
            "Welcome, Mr. Franklin."
        );
    }

    #[test]
    fn positional_tokens_count_objects() {
        let args = [
            Value::from("a"),
            Value::object([("k", "v")]),
            Value::from("c"),
        ];
        assert_eq!(format_tokens("{1}{2}{3}{k}", &args), "a{2}cv");
    }

    #[test]
    fn lists_flatten_into_positions() {
        let args = [Value::from(vec!["x", "y"]), Value::from("z")];
        assert_eq!(format_tokens("{1}-{2}-{3}", &args), "x-y-z");
    }

    #[test]
    fn later_sources_win() {
        let args = [
            Value::object([("n", "first")]),
            Value::object([("n", "second")]),
        ];
        assert_eq!(format_tokens("{n}", &args), "second");

        let args = [Value::from("positional"), Value::object([("1", "named")])];
        assert_eq!(format_tokens("{1}", &args), "named");
    }

    #[test]
    fn sources_are_not_mutated() {
        let first = Value::object([("n", "a")]);
        let second = Value::object([("n", "b")]);
        let args = [first.clone(), second.clone()];
        let _ = format_tokens("{n}", &args);
        assert_eq!(args[0], first);
        assert_eq!(args[1], second);
    }

    #[test]
    fn unresolved_and_malformed_placeholders_stay_literal() {
        assert_eq!(format_tokens("{nope} {1}", &[]), "{nope} {1}");
        assert_eq!(format_tokens("{} {{x}} {open", &[Value::object([("x", 1)])]), "{} {1} {open");
    }
}
