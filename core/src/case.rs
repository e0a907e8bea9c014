//! Word-boundary tokenizer and the case transforms built on it.
//!
//! Boundaries are `_`, `-`, whitespace, a lowercase letter or digit followed
//! by an uppercase letter, and the last letter of an uppercase run that is
//! followed by a lowercase letter (`HTMLParser` → `html`, `parser`).
//! Delimiter runs collapse; every other character lands in some word.

use crate::codec;
use crate::Inflections;

/// Split into lowercase word fragments.
pub(crate) fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// First character uppercased, the rest untouched.
fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn camelize(s: &str, first_upper: bool, inflections: &Inflections) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in words(s).iter().enumerate() {
        if i == 0 && !first_upper {
            out.push_str(word);
        } else if let Some(acronym) = inflections.acronym(word) {
            out.push_str(acronym);
        } else {
            out.push_str(&upper_first(word));
        }
    }
    out
}

pub(crate) fn delimit(s: &str, separator: &str) -> String {
    words(s).join(separator)
}

pub(crate) fn humanize(s: &str, inflections: &Inflections) -> String {
    let replaced = inflections.apply_humans(s);
    let mut parts = words(&replaced);
    if parts.len() > 1 && parts.last().is_some_and(|w| w == "id") {
        parts.pop();
    }
    let joined = parts
        .iter()
        .map(|w| inflections.acronym(w).map_or_else(|| w.clone(), str::to_string))
        .collect::<Vec<_>>()
        .join(" ");
    upper_first(&joined)
}

fn ends_sentence(word: &str) -> bool {
    word.ends_with(['.', ':', ';', '!'])
}

pub(crate) fn titleize(s: &str, inflections: &Inflections) -> String {
    let human = humanize(&delimit(s, " "), inflections);
    let parts: Vec<&str> = human.split(' ').filter(|w| !w.is_empty()).collect();
    let last = parts.len().saturating_sub(1);
    let mut after_stop = false;
    let mut out = Vec::with_capacity(parts.len());
    for (i, word) in parts.iter().enumerate() {
        let stop = ends_sentence(word);
        let forced = i == 0 || i == last || stop || after_stop;
        after_stop = stop;
        if forced || !inflections.is_minor_word(word) {
            out.push(upper_first(word));
        } else {
            out.push((*word).to_string());
        }
    }
    out.join(" ")
}

pub(crate) fn parameterize(s: &str, separator: &str) -> String {
    let folded = codec::normalize(s).to_lowercase();
    let mut out = String::with_capacity(folded.len());
    let mut pending = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending && !out.is_empty() {
                out.push_str(separator);
            }
            pending = false;
            out.push(c);
        } else {
            pending = true;
        }
    }
    out
}

pub(crate) fn capitalize(s: &str, all: bool) -> String {
    let lower = s.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut prev_cased = false;
    for (i, c) in lower.chars().enumerate() {
        let cased = c.is_lowercase() || c.is_uppercase();
        let raise = if all { !prev_cased } else { i == 0 };
        if raise {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}
