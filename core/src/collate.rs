//! Collation for sorting: accents and case are ignored first, then the raw
//! strings break ties so the order stays total and deterministic.

use crate::codec;
use crate::Value;
use std::cmp::Ordering;

pub(crate) fn collation_key(s: &str) -> String {
    codec::normalize(s).to_lowercase()
}

pub(crate) fn compare_str(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Strings collate; everything else uses [`Value::compare`].
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => compare_str(x, y),
        _ => a.compare(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_and_accents() {
        assert_eq!(compare_str("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_str("éclair", "eclipse"), Ordering::Less);
        assert_eq!(compare_str("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn raw_order_breaks_ties() {
        assert_eq!(compare_str("A", "a"), Ordering::Less);
        assert_eq!(compare_str("a", "a"), Ordering::Equal);
    }

    #[test]
    fn non_strings_fall_back() {
        assert_eq!(compare_values(&Value::Int(2), &Value::Int(10)), Ordering::Less);
        assert_eq!(compare_values(&Value::Null, &Value::from("a")), Ordering::Less);
    }
}
