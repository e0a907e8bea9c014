//! `StrExt`: String operations
//!
//! Indexing counts `char`s, never bytes, and never panics: negative indexes
//! count from the end, out-of-range reads give `None` or an empty slice, and
//! insertion points past either end clamp.
//!
//! Operations that depend on locale data (`camelize`, `humanize`, `titleize`,
//! `pluralize`, `singularize`) come in two forms: the plain one uses
//! [`Inflections::english`], the `_with` one takes a table.

use crate::index;
use crate::{case, codec, format, script, width};
use crate::{compile_regex, Inflections, Result, Script, Value, WidthModes};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Option types
// ═══════════════════════════════════════════════════════════════════════════════

/// What to search for: a literal substring or a regex.
#[derive(Debug, Clone)]
pub enum TextPattern {
    /// Plain substring.
    Literal(String),
    /// Regular expression.
    Regex(Regex),
}

impl TextPattern {
    /// Compile a regex pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`](crate::Error::InvalidPattern) or
    /// [`Error::PatternTooLong`](crate::Error::PatternTooLong).
    pub fn regex(pattern: &str) -> Result<Self> {
        compile_regex(pattern).map(Self::Regex)
    }

    fn is_match(&self, s: &str) -> bool {
        match self {
            Self::Literal(lit) => s.contains(lit.as_str()),
            Self::Regex(re) => re.is_match(s),
        }
    }

    fn anchored(&self, prefix: &str, suffix: &str, case_sensitive: bool) -> Option<Regex> {
        let source = match self {
            Self::Literal(lit) => regex::escape(lit),
            Self::Regex(re) => re.as_str().to_string(),
        };
        RegexBuilder::new(&format!("{prefix}(?:{source}){suffix}"))
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| log::warn!("could not anchor pattern \"{source}\": {e}"))
            .ok()
    }
}

impl From<&str> for TextPattern {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for TextPattern {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<Regex> for TextPattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

/// Which end of the text `truncate_text` cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncateFrom {
    /// Keep the start.
    #[default]
    Right,
    /// Keep the end.
    Left,
    /// Keep both ends.
    Middle,
}

impl FromStr for TruncateFrom {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "middle" => Ok(Self::Middle),
            other => Err(crate::Error::invalid_argument(
                "from",
                format!("expected right, left, or middle, got \"{other}\""),
            )),
        }
    }
}

impl fmt::Display for TruncateFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Middle => "middle",
        })
    }
}

/// Options for [`StrExt::truncate_text`].
///
/// ```
/// use sucre::{StrExt, Truncate, TruncateFrom};
///
/// let s = "just sittin on the dock of the bay";
/// assert_eq!(s.truncate_text(20, &Truncate::default()), "just sittin on th...");
/// assert_eq!(s.truncate_text(20, &Truncate::default().split(false)), "just sittin on...");
/// assert_eq!(s.truncate_text(20, &Truncate::default().from(TruncateFrom::Left)), "...e dock of the bay");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncate {
    /// Allow cutting through a word. When false, a partial word is dropped.
    pub split: bool,
    /// Which end to cut.
    pub from: TruncateFrom,
    /// Marker placed where text was removed. Counts toward the length.
    pub ellipsis: String,
}

impl Default for Truncate {
    fn default() -> Self {
        Self {
            split: true,
            from: TruncateFrom::Right,
            ellipsis: "...".to_string(),
        }
    }
}

impl Truncate {
    /// Set whether words may be split.
    #[must_use]
    pub fn split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    /// Set the cut direction.
    #[must_use]
    pub fn from(mut self, from: TruncateFrom) -> Self {
        self.from = from;
        self
    }

    /// Set the ellipsis marker.
    #[must_use]
    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// StrExt
// ═══════════════════════════════════════════════════════════════════════════════

/// String operations.
///
/// ```
/// use sucre::StrExt;
///
/// assert_eq!("jumpy".at(5, true), Some('j'));
/// assert_eq!("jumpy".at(5, false), None);
/// assert_eq!("lucky charms".slice_from(7), "harms");
/// assert_eq!("dopamine".insert_at("e", 3), "dopeamine");
/// assert_eq!("a_farewell_to_arms".dasherize(), "a-farewell-to-arms");
/// ```
pub trait StrExt {
    // ── Indexing ────────────────────────────────────────────────────────────

    /// Char at `index`. See the module docs for negative and wrapping indexes.
    fn at(&self, index: isize, wrap: bool) -> Option<char>;

    /// [`at`](Self::at) for each index, resolved independently.
    fn at_each(&self, indexes: &[isize], wrap: bool) -> Vec<Option<char>>;

    /// Everything from `index` on.
    fn slice_from(&self, index: isize) -> &str;

    /// Everything before `index`.
    fn slice_to(&self, index: isize) -> &str;

    /// The first `n` chars (all of them if there are fewer).
    fn first_n(&self, n: usize) -> &str;

    /// The last `n` chars (all of them if there are fewer).
    fn last_n(&self, n: usize) -> &str;

    // ── Insertion and truncation ────────────────────────────────────────────

    /// Insert `text` at `index`, or append when `index` is `None`.
    fn add(&self, text: &str, index: Option<isize>) -> String;

    /// Insert `text` at `index`.
    fn insert_at(&self, text: &str, index: isize) -> String;

    /// Shorten to at most `length` chars, ellipsis included.
    fn truncate_text(&self, length: usize, options: &Truncate) -> String;

    /// Fill `{name}` and `{n}` placeholders. See [`format_tokens`](crate::format_tokens).
    fn assign(&self, args: &[Value]) -> String;

    // ── Case ────────────────────────────────────────────────────────────────

    /// `caps_lock` → `CapsLock`, or `capsLock` when `first_upper` is false.
    fn camelize(&self, first_upper: bool) -> String;
    /// [`camelize`](Self::camelize) with the given acronyms.
    fn camelize_with(&self, first_upper: bool, inflections: &Inflections) -> String;
    /// `capsLock` → `caps_lock`.
    fn underscore(&self) -> String;
    /// `capsLock` → `caps-lock`.
    fn dasherize(&self) -> String;
    /// `capsLock` → `caps lock`.
    fn spacify(&self) -> String;
    /// `author_id` → `Author`.
    fn humanize(&self) -> String;
    /// [`humanize`](Self::humanize) with the given rules and acronyms.
    fn humanize_with(&self, inflections: &Inflections) -> String;
    /// `raiders_of_the_lost_ark` → `Raiders of the Lost Ark`.
    fn titleize(&self) -> String;
    /// [`titleize`](Self::titleize) with the given minor words.
    fn titleize_with(&self, inflections: &Inflections) -> String;
    /// `hell, no!` → `hell-no`.
    fn parameterize(&self) -> String;
    /// [`parameterize`](Self::parameterize) with a custom separator.
    fn parameterize_with(&self, separator: &str) -> String;
    /// Lowercase, then uppercase the first letter (or every word's with `all`).
    fn capitalize(&self, all: bool) -> String;
    /// Plural of the last word.
    fn pluralize(&self) -> String;
    /// [`pluralize`](Self::pluralize) with the given table.
    fn pluralize_with(&self, inflections: &Inflections) -> String;
    /// Singular of the last word.
    fn singularize(&self) -> String;
    /// [`singularize`](Self::singularize) with the given table.
    fn singularize_with(&self, inflections: &Inflections) -> String;

    // ── Inspection ──────────────────────────────────────────────────────────

    /// Unicode scalar values.
    fn codes(&self) -> Vec<u32>;
    /// Trim, and collapse each whitespace run to one space.
    fn compact(&self) -> String;
    /// Every match of `pattern`, in order.
    fn each_match(&self, pattern: &TextPattern) -> Vec<String>;
    /// [`each_match`](Self::each_match), passing each match to `f` as it is found.
    fn each_match_with<F: FnMut(&str)>(&self, pattern: &TextPattern, f: F) -> Vec<String>;
    /// Each char, passed to `f` in order.
    fn each_char<F: FnMut(char)>(&self, f: F) -> Vec<char>;
    /// Lines of the trimmed text. Both `\n` and `\r\n` end a line.
    fn trimmed_lines(&self) -> Vec<&str>;
    /// [`trimmed_lines`](Self::trimmed_lines), passing each line to `f` in order.
    fn each_line<F: FnMut(&str)>(&self, f: F) -> Vec<&str>;
    /// Blocks separated by two or more line breaks.
    fn paragraphs(&self) -> Vec<&str>;
    /// Whitespace-separated words.
    fn words(&self) -> Vec<&str>;
    /// Whether `pattern` occurs anywhere.
    fn has(&self, pattern: &TextPattern) -> bool;
    /// Whether the text starts with `pattern`.
    fn starts_with_pattern(&self, pattern: &TextPattern, case_sensitive: bool) -> bool;
    /// Whether the text ends with `pattern`.
    fn ends_with_pattern(&self, pattern: &TextPattern, case_sensitive: bool) -> bool;
    /// Empty or whitespace only.
    fn is_blank(&self) -> bool;

    // ── Codecs ──────────────────────────────────────────────────────────────

    /// Escape `& < > " '`.
    fn escape_html(&self) -> String;
    /// Decode entities; `partial` keeps `&amp;`.
    fn unescape_html(&self, partial: bool) -> String;
    /// Escape regex metacharacters.
    fn escape_regexp(&self) -> String;
    /// Percent-encode; `param` also encodes URL delimiters.
    fn escape_url(&self, param: bool) -> String;
    /// Percent-decode; `partial` keeps encoded URL delimiters.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`](crate::Error::Decode) on malformed escapes.
    fn unescape_url(&self, partial: bool) -> Result<String>;
    /// Base64 of the UTF-8 bytes.
    fn encode_base64(&self) -> String;
    /// Decode base64 to UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`](crate::Error::Decode) on bad input.
    fn decode_base64(&self) -> Result<String>;

    // ── Scripts and widths ──────────────────────────────────────────────────

    /// Any char is in `script`.
    fn has_script(&self, script: Script) -> bool;
    /// Non-empty and every non-whitespace char is in `script`.
    fn is_script(&self, script: Script) -> bool;
    /// Katakana to hiragana; `all` includes half-width katakana.
    fn hiragana(&self, all: bool) -> String;
    /// Hiragana to katakana.
    fn katakana(&self) -> String;
    /// Full-width to half-width.
    fn hankaku(&self, modes: WidthModes) -> String;
    /// Half-width to full-width.
    fn zenkaku(&self, modes: WidthModes) -> String;
    /// Fold accented Latin to ASCII and full-width ASCII to half-width.
    fn normalize(&self) -> String;

    // ── Rewriting ───────────────────────────────────────────────────────────

    /// `padding` repeated `n` times on both sides.
    fn pad(&self, padding: &str, n: usize) -> String;
    /// `padding` repeated `n` times on the left.
    fn pad_left(&self, padding: &str, n: usize) -> String;
    /// `padding` repeated `n` times on the right.
    fn pad_right(&self, padding: &str, n: usize) -> String;
    /// Remove every match of `pattern`.
    fn remove_all(&self, pattern: &TextPattern) -> String;
    /// Remove tags and their contents. An empty list means every tag.
    fn remove_tags(&self, tags: &[&str]) -> String;
    /// Remove tag markup, keeping contents. An empty list means every tag.
    fn strip_tags(&self, tags: &[&str]) -> String;
    /// Chars in reverse order.
    fn reversed(&self) -> String;
    /// Shift every char's code point by `n`.
    fn shift_chars(&self, n: i32) -> String;
    /// Parse a leading number. Commas are ignored; a `.` means decimal.
    fn to_number(&self, base: u32) -> Option<f64>;
}

impl StrExt for str {
    fn at(&self, index: isize, wrap: bool) -> Option<char> {
        let len = self.chars().count();
        index::resolve(len, index, wrap).and_then(|i| self.chars().nth(i))
    }

    fn at_each(&self, indexes: &[isize], wrap: bool) -> Vec<Option<char>> {
        let chars: Vec<char> = self.chars().collect();
        indexes
            .iter()
            .map(|&i| index::resolve(chars.len(), i, wrap).map(|p| chars[p]))
            .collect()
    }

    fn slice_from(&self, index: isize) -> &str {
        let start = index::bound(self.chars().count(), index);
        &self[index::byte_offset(self, start)..]
    }

    fn slice_to(&self, index: isize) -> &str {
        let end = index::bound(self.chars().count(), index);
        &self[..index::byte_offset(self, end)]
    }

    fn first_n(&self, n: usize) -> &str {
        &self[..index::byte_offset(self, n)]
    }

    fn last_n(&self, n: usize) -> &str {
        let len = self.chars().count();
        &self[index::byte_offset(self, len.saturating_sub(n))..]
    }

    fn add(&self, text: &str, index: Option<isize>) -> String {
        let at = index::byte_offset(self, index::insertion(self.chars().count(), index));
        let mut out = String::with_capacity(self.len() + text.len());
        out.push_str(&self[..at]);
        out.push_str(text);
        out.push_str(&self[at..]);
        out
    }

    fn insert_at(&self, text: &str, index: isize) -> String {
        self.add(text, Some(index))
    }

    fn truncate_text(&self, length: usize, options: &Truncate) -> String {
        let chars: Vec<char> = self.chars().collect();
        if chars.len() <= length {
            return self.to_string();
        }
        let ellipsis_len = options.ellipsis.chars().count();
        if length <= ellipsis_len {
            return options.ellipsis.chars().take(length).collect();
        }
        let budget = length - ellipsis_len;
        match options.from {
            TruncateFrom::Right => head(&chars, budget, options.split) + &options.ellipsis,
            TruncateFrom::Left => options.ellipsis.clone() + &tail(&chars, budget, options.split),
            TruncateFrom::Middle => {
                let front = budget.div_ceil(2);
                let back = budget / 2;
                head(&chars, front, options.split) + &options.ellipsis + &tail(&chars, back, options.split)
            }
        }
    }

    fn assign(&self, args: &[Value]) -> String {
        format::format_tokens(self, args)
    }

    fn camelize(&self, first_upper: bool) -> String {
        case::camelize(self, first_upper, Inflections::english())
    }

    fn camelize_with(&self, first_upper: bool, inflections: &Inflections) -> String {
        case::camelize(self, first_upper, inflections)
    }

    fn underscore(&self) -> String {
        case::delimit(self, "_")
    }

    fn dasherize(&self) -> String {
        case::delimit(self, "-")
    }

    fn spacify(&self) -> String {
        case::delimit(self, " ")
    }

    fn humanize(&self) -> String {
        case::humanize(self, Inflections::english())
    }

    fn humanize_with(&self, inflections: &Inflections) -> String {
        case::humanize(self, inflections)
    }

    fn titleize(&self) -> String {
        case::titleize(self, Inflections::english())
    }

    fn titleize_with(&self, inflections: &Inflections) -> String {
        case::titleize(self, inflections)
    }

    fn parameterize(&self) -> String {
        case::parameterize(self, "-")
    }

    fn parameterize_with(&self, separator: &str) -> String {
        case::parameterize(self, separator)
    }

    fn capitalize(&self, all: bool) -> String {
        case::capitalize(self, all)
    }

    fn pluralize(&self) -> String {
        Inflections::english().pluralize(self)
    }

    fn pluralize_with(&self, inflections: &Inflections) -> String {
        inflections.pluralize(self)
    }

    fn singularize(&self) -> String {
        Inflections::english().singularize(self)
    }

    fn singularize_with(&self, inflections: &Inflections) -> String {
        inflections.singularize(self)
    }

    fn codes(&self) -> Vec<u32> {
        self.chars().map(u32::from).collect()
    }

    fn compact(&self) -> String {
        let mut out = String::with_capacity(self.len());
        let mut run: Option<char> = None;
        for c in self.trim().chars() {
            if c.is_whitespace() {
                run = Some(c);
                continue;
            }
            if let Some(last) = run.take() {
                out.push(if last == '\u{3000}' { last } else { ' ' });
            }
            out.push(c);
        }
        out
    }

    fn each_match(&self, pattern: &TextPattern) -> Vec<String> {
        match pattern {
            TextPattern::Literal(lit) if lit.is_empty() => {
                self.chars().map(String::from).collect()
            }
            TextPattern::Literal(lit) => self.matches(lit.as_str()).map(str::to_string).collect(),
            TextPattern::Regex(re) => re.find_iter(self).map(|m| m.as_str().to_string()).collect(),
        }
    }

    fn each_match_with<F: FnMut(&str)>(&self, pattern: &TextPattern, mut f: F) -> Vec<String> {
        let found = self.each_match(pattern);
        found.iter().for_each(|m| f(m.as_str()));
        found
    }

    fn each_char<F: FnMut(char)>(&self, mut f: F) -> Vec<char> {
        self.chars().inspect(|&c| f(c)).collect()
    }

    fn trimmed_lines(&self) -> Vec<&str> {
        self.trim().lines().collect()
    }

    fn each_line<F: FnMut(&str)>(&self, mut f: F) -> Vec<&str> {
        let lines = self.trimmed_lines();
        lines.iter().copied().for_each(&mut f);
        lines
    }

    fn paragraphs(&self) -> Vec<&str> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut start = 0;
        let mut breaks = 0;
        let mut run_start = 0;
        for (i, c) in trimmed.char_indices() {
            if c == '\n' || c == '\r' {
                if breaks == 0 {
                    run_start = i;
                }
                breaks += 1;
            } else {
                if breaks >= 2 {
                    out.push(&trimmed[start..run_start]);
                    start = i;
                }
                breaks = 0;
            }
        }
        out.push(&trimmed[start..]);
        out
    }

    fn words(&self) -> Vec<&str> {
        self.split_whitespace().collect()
    }

    fn has(&self, pattern: &TextPattern) -> bool {
        pattern.is_match(self)
    }

    fn starts_with_pattern(&self, pattern: &TextPattern, case_sensitive: bool) -> bool {
        match pattern {
            TextPattern::Literal(lit) if case_sensitive => self.starts_with(lit.as_str()),
            _ => pattern
                .anchored("^", "", case_sensitive)
                .is_some_and(|re| re.is_match(self)),
        }
    }

    fn ends_with_pattern(&self, pattern: &TextPattern, case_sensitive: bool) -> bool {
        match pattern {
            TextPattern::Literal(lit) if case_sensitive => self.ends_with(lit.as_str()),
            _ => pattern
                .anchored("", "$", case_sensitive)
                .is_some_and(|re| re.is_match(self)),
        }
    }

    fn is_blank(&self) -> bool {
        self.chars().all(char::is_whitespace)
    }

    fn escape_html(&self) -> String {
        codec::escape_html(self)
    }

    fn unescape_html(&self, partial: bool) -> String {
        codec::unescape_html(self, partial)
    }

    fn escape_regexp(&self) -> String {
        codec::escape_regexp(self)
    }

    fn escape_url(&self, param: bool) -> String {
        codec::escape_url(self, param)
    }

    fn unescape_url(&self, partial: bool) -> Result<String> {
        codec::unescape_url(self, partial)
    }

    fn encode_base64(&self) -> String {
        codec::encode_base64(self)
    }

    fn decode_base64(&self) -> Result<String> {
        codec::decode_base64(self)
    }

    fn has_script(&self, script: Script) -> bool {
        script::has_script(self, script)
    }

    fn is_script(&self, script: Script) -> bool {
        script::is_script(self, script)
    }

    fn hiragana(&self, all: bool) -> String {
        width::hiragana(self, all)
    }

    fn katakana(&self) -> String {
        width::katakana(self)
    }

    fn hankaku(&self, modes: WidthModes) -> String {
        width::hankaku(self, modes)
    }

    fn zenkaku(&self, modes: WidthModes) -> String {
        width::zenkaku(self, modes)
    }

    fn normalize(&self) -> String {
        codec::normalize(self)
    }

    fn pad(&self, padding: &str, n: usize) -> String {
        let side = padding.repeat(n);
        format!("{side}{self}{side}")
    }

    fn pad_left(&self, padding: &str, n: usize) -> String {
        format!("{}{self}", padding.repeat(n))
    }

    fn pad_right(&self, padding: &str, n: usize) -> String {
        format!("{self}{}", padding.repeat(n))
    }

    fn remove_all(&self, pattern: &TextPattern) -> String {
        match pattern {
            TextPattern::Literal(lit) if lit.is_empty() => self.to_string(),
            TextPattern::Literal(lit) => self.replace(lit.as_str(), ""),
            TextPattern::Regex(re) => re.replace_all(self, "").into_owned(),
        }
    }

    fn remove_tags(&self, tags: &[&str]) -> String {
        rewrite_tags(self, tags, true)
    }

    fn strip_tags(&self, tags: &[&str]) -> String {
        rewrite_tags(self, tags, false)
    }

    fn reversed(&self) -> String {
        self.chars().rev().collect()
    }

    fn shift_chars(&self, n: i32) -> String {
        self.chars()
            .map(|c| {
                u32::from(c)
                    .checked_add_signed(n)
                    .and_then(char::from_u32)
                    .unwrap_or(c)
            })
            .collect()
    }

    fn to_number(&self, base: u32) -> Option<f64> {
        let cleaned: String = self.chars().filter(|&c| c != ',').collect();
        let cleaned = cleaned.trim_start();
        if cleaned.contains('.') {
            parse_float_prefix(cleaned)
        } else {
            parse_int_prefix(cleaned, base)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// First `n` chars; without `split`, a word cut in half is dropped.
fn head(chars: &[char], n: usize, split: bool) -> String {
    let n = n.min(chars.len());
    let mut end = n;
    if !split && n < chars.len() && n > 0 && !chars[n].is_whitespace() && !chars[n - 1].is_whitespace() {
        end = chars[..n].iter().rposition(|c| c.is_whitespace()).unwrap_or(0);
    }
    let s: String = chars[..end].iter().collect();
    if split {
        s
    } else {
        s.trim_end().to_string()
    }
}

/// Last `n` chars; without `split`, a word cut in half is dropped.
fn tail(chars: &[char], n: usize, split: bool) -> String {
    let n = n.min(chars.len());
    let mut start = chars.len() - n;
    if !split && start > 0 && start < chars.len() && !chars[start].is_whitespace() && !chars[start - 1].is_whitespace() {
        start = chars[start..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(chars.len(), |p| start + p);
    }
    let s: String = chars[start..].iter().collect();
    if split {
        s
    } else {
        s.trim_start().to_string()
    }
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == ':'
}

/// One pass over the markup. `with_contents` removes an element through its
/// first matching close tag; otherwise only the tag markup goes.
fn rewrite_tags(s: &str, tags: &[&str], with_contents: bool) -> String {
    let wanted = |name: &str| tags.is_empty() || tags.iter().any(|t| t.eq_ignore_ascii_case(name));
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let after = &rest[lt + 1..];
        let closing = !with_contents && after.starts_with('/');
        let name_start = usize::from(closing);
        let name_len = after[name_start..]
            .find(|c: char| !is_tag_name_char(c))
            .unwrap_or(after.len() - name_start);
        let name = &after[name_start..name_start + name_len];
        let tag_end = after[name_start + name_len..]
            .find(['<', '>'])
            .map(|p| name_start + name_len + p)
            .filter(|&p| after[p..].starts_with('>'));

        let consumed = match tag_end {
            Some(end) if !name.is_empty() && wanted(name) => {
                let self_closing = after[..end].ends_with('/');
                if !with_contents || self_closing {
                    Some(end + 1)
                } else {
                    find_close_tag(&after[end + 1..], name).map(|close| end + 1 + close)
                }
            }
            _ => None,
        };
        match consumed {
            Some(len) => rest = &after[len..],
            None => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte length through the end of the first `</name>` in `s`.
fn find_close_tag(s: &str, name: &str) -> Option<usize> {
    let lower = s.to_ascii_lowercase();
    let needle = format!("</{}", name.to_ascii_lowercase());
    let mut from = 0;
    while let Some(pos) = lower[from..].find(&needle) {
        let start = from + pos;
        let after = start + needle.len();
        let rest = &lower[after..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with('>') {
            return Some(after + (rest.len() - trimmed.len()) + 1);
        }
        from = after;
    }
    None
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    s[..end].parse().ok()
}

fn parse_int_prefix(s: &str, base: u32) -> Option<f64> {
    if !(2..=36).contains(&base) {
        return None;
    }
    let (negative, mut digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if base == 16 {
        digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
    }
    let mut value = 0.0_f64;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(base) else { break };
        value = value * f64::from(base) + f64::from(d);
        seen = true;
    }
    seen.then_some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_wraps_and_counts_from_end() {
        assert_eq!("jumpy".at(0, true), Some('j'));
        assert_eq!("jumpy".at(5, true), Some('j'));
        assert_eq!("jumpy".at(5, false), None);
        assert_eq!("jumpy".at(-1, false), Some('y'));
        assert_eq!("jumpy".at(-8, true), Some('m'));
        assert_eq!("".at(0, true), None);
    }

    #[test]
    fn at_each_resolves_independently() {
        assert_eq!(
            "jumpy".at_each(&[0, 2, 4, 6], true),
            vec![Some('j'), Some('m'), Some('y'), Some('u')]
        );
        assert_eq!("jumpy".at_each(&[0, 6], false), vec![Some('j'), None]);
    }

    #[test]
    fn slices() {
        assert_eq!("lucky charms".slice_from(0), "lucky charms");
        assert_eq!("lucky charms".slice_from(7), "harms");
        assert_eq!("lucky charms".slice_to(7), "lucky c");
        assert_eq!("lucky charms".slice_from(-3), "rms");
        assert_eq!("lucky charms".slice_from(99), "");
        assert_eq!("lucky charms".first_n(3), "luc");
        assert_eq!("lucky charms".last_n(3), "rms");
        assert_eq!("abc".last_n(10), "abc");
        assert_eq!("añb".first_n(2), "añ");
    }

    #[test]
    fn insertion() {
        assert_eq!("schfifty".add(" five", None), "schfifty five");
        assert_eq!("dopamine".insert_at("e", 3), "dopeamine");
        assert_eq!("spelling eror".insert_at("r", -3), "spelling error");
        assert_eq!("abc".insert_at("!", 99), "abc!");
    }

    #[test]
    fn truncate_right() {
        let s = "just sittin on the dock of the bay";
        assert_eq!(s.truncate_text(20, &Truncate::default()), "just sittin on th...");
        assert_eq!(s.truncate_text(20, &Truncate::default().split(false)), "just sittin on...");
        assert_eq!(s.truncate_text(100, &Truncate::default()), s);
    }

    #[test]
    fn truncate_left_and_middle() {
        let s = "just sittin on the dock of the bay";
        let left = Truncate::default().from(TruncateFrom::Left);
        assert_eq!(s.truncate_text(20, &left), "...e dock of the bay");
        assert_eq!(s.truncate_text(20, &left.split(false)), "...dock of the bay");
        let middle = Truncate::default().from(TruncateFrom::Middle);
        assert_eq!(s.truncate_text(21, &middle), "just sitt...f the bay");
    }

    #[test]
    fn truncate_tiny_lengths() {
        assert_eq!("abcdef".truncate_text(2, &Truncate::default()), "..");
        assert_eq!("abcdef".truncate_text(4, &Truncate::default().ellipsis("…")), "abc…");
    }

    #[test]
    fn case_transforms() {
        assert_eq!("moz-border-radius".camelize(false), "mozBorderRadius");
        assert_eq!("capsLock".underscore(), "caps_lock");
        assert_eq!("capsLock".spacify(), "caps lock");
        assert_eq!("employee_salary".humanize(), "Employee salary");
        assert_eq!("raiders_of_the_lost_ark".titleize(), "Raiders of the Lost Ark");
        assert_eq!("hell, no!".parameterize(), "hell-no");
        assert_eq!("post".pluralize(), "posts");
        assert_eq!("posts".singularize(), "post");
    }

    #[test]
    fn inspection() {
        assert_eq!("jumpy".codes(), vec![106, 117, 109, 112, 121]);
        assert_eq!("too \n much \n space".compact(), "too much space");
        assert_eq!("enough \n ".compact(), "enough");
        assert_eq!("a　 b".compact(), "a b");
        assert_eq!("a 　b".compact(), "a　b");
        assert_eq!("broken wear and".words(), vec!["broken", "wear", "and"]);
        assert!("".is_blank());
        assert!("   ".is_blank());
        assert!(!"noway".is_blank());
    }

    #[test]
    fn each_match_patterns() {
        assert_eq!("jumpy".each_match(&TextPattern::from("")), ["j", "u", "m", "p", "y"]);
        assert_eq!("jumpy".each_match(&TextPattern::regex("[r-z]").unwrap()), ["u", "y"]);
        assert_eq!("a-b-c".each_match(&TextPattern::from("-")), ["-", "-"]);
    }

    #[test]
    fn callbacks_see_every_piece() {
        let mut seen = String::new();
        assert_eq!("jumpy".each_char(|c| seen.push(c)), ['j', 'u', 'm', 'p', 'y']);
        assert_eq!(seen, "jumpy");

        let mut count = 0;
        let found = "jumpy".each_match_with(&TextPattern::regex("[r-z]").unwrap(), |_| count += 1);
        assert_eq!(found, ["u", "y"]);
        assert_eq!(count, 2);

        let mut lines = Vec::new();
        let got = "broken wear\nand\njumpy jump".each_line(|l| lines.push(l.len()));
        assert_eq!(got, ["broken wear", "and", "jumpy jump"]);
        assert_eq!(lines, [11, 3, 10]);
    }

    #[test]
    fn trimmed_lines_drop_outer_blank_lines() {
        assert_eq!("\n  one\r\ntwo\n\n".trimmed_lines(), ["one", "two"]);
        assert!("   ".trimmed_lines().is_empty());
        assert_eq!("a\n\nb".trimmed_lines(), ["a", "", "b"]);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        assert_eq!(
            "Once upon a time.\n\nIn the land of oz...".paragraphs(),
            ["Once upon a time.", "In the land of oz..."]
        );
        assert_eq!("one\ntwo\r\n\r\nthree".paragraphs(), ["one\ntwo", "three"]);
        assert!("  ".paragraphs().is_empty());
    }

    #[test]
    fn pattern_predicates() {
        assert!("jumpy".has(&"py".into()));
        assert!("broken".has(&TextPattern::regex("[a-n]").unwrap()));
        assert!(!"broken".has(&TextPattern::regex("[s-z]").unwrap()));
        assert!("jumpy".ends_with_pattern(&"py".into(), true));
        assert!("jumpy".ends_with_pattern(&TextPattern::regex("[q-z]").unwrap(), true));
        assert!(!"jumpy".ends_with_pattern(&"MPY".into(), true));
        assert!("jumpy".ends_with_pattern(&"MPY".into(), false));
        assert!("hello".starts_with_pattern(&"HE".into(), false));
        assert!(!"hello".starts_with_pattern(&TextPattern::regex("[a-g]").unwrap(), true));
        assert!("a.b".starts_with_pattern(&"a.".into(), false));
        assert!(!"axb".starts_with_pattern(&"a.".into(), false));
    }

    #[test]
    fn padding() {
        assert_eq!("wasabi".pad("-", 1), "-wasabi-");
        assert_eq!("wasabi".pad("-", 2), "--wasabi--");
        assert_eq!("wasabi".pad_left("-", 2), "--wasabi");
        assert_eq!("wasabi".pad_right("-", 2), "wasabi--");
    }

    #[test]
    fn removal() {
        assert_eq!("schfifty five".remove_all(&"f".into()), "schity ive");
        assert_eq!(
            "schfifty five".remove_all(&TextPattern::regex("[a-f]").unwrap()),
            "shity iv"
        );
    }

    #[test]
    fn tags() {
        let html = "<p>just <b>some</b> text</p>";
        assert_eq!(html.remove_tags(&[]), "");
        assert_eq!(html.remove_tags(&["b"]), "<p>just  text</p>");
        assert_eq!(html.strip_tags(&[]), "just some text");
        assert_eq!(html.strip_tags(&["p"]), "just <b>some</b> text");
        assert_eq!("a<br/>b".remove_tags(&["br"]), "ab");
        assert_eq!("x < y <b>z".strip_tags(&[]), "x < y z");
        assert_eq!("<B>up</b>".remove_tags(&["b"]), "");
        assert_eq!("<br>b</b>".remove_tags(&["b"]), "<br>b</b>");
    }

    #[test]
    fn reverse_and_shift() {
        assert_eq!("jumpy".reversed(), "ypmuj");
        assert_eq!("a".shift_chars(1), "b");
        assert_eq!("ク".shift_chars(1), "グ");
        assert_eq!("b".shift_chars(-1), "a");
    }

    #[test]
    fn numbers() {
        assert_eq!("153".to_number(10), Some(153.0));
        assert_eq!("12,000".to_number(10), Some(12000.0));
        assert_eq!("10px".to_number(10), Some(10.0));
        assert_eq!("ff".to_number(16), Some(255.0));
        assert_eq!("0.5".to_number(10), Some(0.5));
        assert_eq!("-2.5e3x".to_number(10), Some(-2500.0));
        assert_eq!("px".to_number(10), None);
        assert_eq!("1".to_number(1), None);
    }

    #[test]
    fn codecs_and_scripts() {
        assert_eq!("one & two".escape_html(), "one &amp; two");
        assert_eq!("gonna get encoded!".encode_base64(), "Z29ubmEgZ2V0IGVuY29kZWQh");
        assert!("визит".is_script(Script::Cyrillic));
        assert_eq!("カタカナ".hiragana(true), "かたかな");
        assert_eq!("Ménage".normalize(), "Menage");
    }
}
