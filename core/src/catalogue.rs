//! Name-addressed operation catalogue.
//!
//! Every public operation is reachable by name with a [`Value`] input and a
//! [`Value`] object of named arguments. The CLI and the conformance fixtures
//! drive the library through this table.
//!
//! # Argument conventions
//!
//! | Argument | Meaning |
//! |----------|---------|
//! | `matcher` | Any value; objects become shape matchers ([`Matcher::from_value`]) |
//! | `regex` | Regex source; takes priority over `where`, `matcher` and `pattern` |
//! | `where` | A [`MatcherSpec`] (`{"shape": {"name": {"regex": "^F"}}}`); takes priority over `matcher` |
//! | `pattern` | Literal substring |
//! | `by` | Projector path (`"length"`, `"user.name"`); identity when absent |
//!
//! Indexing operations (`at`, `slice_from`, `first_n`, `add`, ...) accept both
//! strings and lists; the input's kind picks the behavior.
//!
//! ```
//! use sucre::catalogue;
//! use sucre::{Inflections, Value};
//!
//! let out = catalogue::invoke(
//!     "camelize",
//!     &Value::from("moz-border-radius"),
//!     &Value::object([("first_upper", false)]),
//!     Inflections::english(),
//! )
//! .unwrap();
//! assert_eq!(out, Value::from("mozBorderRadius"));
//! ```

use crate::object;
use crate::{
    Error, Inflections, Matcher, MatcherSpec, Projector, Result, Script, SliceExt, StrExt, TextPattern, Truncate,
    TruncateFrom, Value, VecExt, WidthModes,
};
use std::collections::BTreeMap;

/// A named operation.
#[derive(Clone, Copy)]
pub struct Operation {
    /// Lookup name.
    pub name: &'static str,
    /// One-line description for listings.
    pub summary: &'static str,
    run: fn(&Call<'_>) -> Result<Value>,
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// Run the operation `name`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an unknown name, an input of the
/// wrong kind, or an ill-typed argument. Pattern and decode failures from the
/// operation itself pass through.
pub fn invoke(name: &str, input: &Value, args: &Value, inflections: &Inflections) -> Result<Value> {
    let op = lookup(name)
        .ok_or_else(|| Error::invalid_argument("operation", format!("unknown operation \"{name}\"")))?;
    if !args.is_null() && !args.is_object() {
        return Err(Error::invalid_argument(
            "args",
            format!("expected an object of named arguments, got a {}", args.type_name()),
        ));
    }
    log::debug!("invoking {name} on a {}", input.type_name());
    (op.run)(&Call {
        input,
        args,
        inflections,
    })
}

/// Find an operation by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// Every operation, in listing order.
#[must_use]
pub fn operations() -> &'static [Operation] {
    OPERATIONS
}

/// Every operation name, in listing order.
pub fn names() -> impl Iterator<Item = &'static str> {
    OPERATIONS.iter().map(|op| op.name)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Call
// ═══════════════════════════════════════════════════════════════════════════════

/// Input and arguments of one invocation.
struct Call<'a> {
    input: &'a Value,
    args: &'a Value,
    inflections: &'a Inflections,
}

impl<'a> Call<'a> {
    fn text(&self) -> Result<&'a str> {
        self.input.as_str().ok_or_else(|| wrong_input("a string", self.input))
    }

    fn list(&self) -> Result<&'a [Value]> {
        self.input.as_list().ok_or_else(|| wrong_input("a list", self.input))
    }

    fn arg(&self, name: &str) -> Option<&'a Value> {
        self.args.get(name).filter(|v| !v.is_null())
    }

    fn flag(&self, name: &'static str, default: bool) -> Result<bool> {
        self.arg(name).map_or(Ok(default), |v| {
            v.as_bool().ok_or_else(|| wrong_arg(name, "a boolean", v))
        })
    }

    fn opt_index(&self, name: &'static str) -> Result<Option<isize>> {
        self.arg(name)
            .map(|v| {
                v.as_int()
                    .and_then(|i| isize::try_from(i).ok())
                    .ok_or_else(|| wrong_arg(name, "an integer", v))
            })
            .transpose()
    }

    fn index(&self, name: &'static str, default: isize) -> Result<isize> {
        Ok(self.opt_index(name)?.unwrap_or(default))
    }

    fn count(&self, name: &'static str, default: usize) -> Result<usize> {
        self.arg(name).map_or(Ok(default), |v| {
            v.as_int()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| wrong_arg(name, "a non-negative integer", v))
        })
    }

    fn string(&self, name: &'static str, default: &'a str) -> Result<&'a str> {
        self.arg(name).map_or(Ok(default), |v| {
            v.as_str().ok_or_else(|| wrong_arg(name, "a string", v))
        })
    }

    fn required_string(&self, name: &'static str) -> Result<&'a str> {
        match self.arg(name) {
            Some(v) => v.as_str().ok_or_else(|| wrong_arg(name, "a string", v)),
            None => Err(Error::invalid_argument(name, "is required")),
        }
    }

    fn other_list(&self, name: &'static str) -> Result<&'a [Value]> {
        match self.arg(name) {
            Some(v) => v.as_list().ok_or_else(|| wrong_arg(name, "a list", v)),
            None => Err(Error::invalid_argument(name, "is required")),
        }
    }

    fn strings(&self, name: &'static str) -> Result<Vec<&'a str>> {
        let Some(v) = self.arg(name) else {
            return Ok(Vec::new());
        };
        match v {
            Value::String(s) => Ok(vec![s.as_str()]),
            Value::List(items) => items
                .iter()
                .map(|item| item.as_str().ok_or_else(|| wrong_arg(name, "a list of strings", v)))
                .collect(),
            other => Err(wrong_arg(name, "a string or list of strings", other)),
        }
    }

    fn matcher<T: ?Sized>(&self) -> Result<Matcher<T>> {
        if let Some(source) = self.arg("regex") {
            let pattern = source.as_str().ok_or_else(|| wrong_arg("regex", "a string", source))?;
            return Matcher::regex(pattern);
        }
        if let Some(spec) = self.arg("where") {
            let spec: MatcherSpec = serde_json::to_value(spec)
                .and_then(serde_json::from_value)
                .map_err(|e| Error::invalid_argument("where", e.to_string()))?;
            return spec.to_matcher();
        }
        match self.arg("matcher") {
            Some(v) => Matcher::from_value(v.clone()),
            None => Err(Error::invalid_argument("matcher", "is required")),
        }
    }

    fn projector(&self) -> Result<Projector<Value>> {
        match self.arg("by") {
            Some(v) => v
                .as_str()
                .map(Projector::path)
                .ok_or_else(|| wrong_arg("by", "a property path", v)),
            None => Ok(Projector::Identity),
        }
    }

    fn pattern(&self) -> Result<TextPattern> {
        if let Some(source) = self.arg("regex") {
            let pattern = source.as_str().ok_or_else(|| wrong_arg("regex", "a string", source))?;
            return TextPattern::regex(pattern);
        }
        Ok(TextPattern::from(self.string("pattern", "")?))
    }

    fn items(&self) -> Vec<Value> {
        match self.arg("value") {
            Some(Value::List(items)) => items.clone(),
            Some(v) => vec![v.clone()],
            None => Vec::new(),
        }
    }
}

fn wrong_input(expected: &str, got: &Value) -> Error {
    Error::invalid_argument("input", format!("expected {expected}, got a {}", got.type_name()))
}

fn wrong_arg(name: &'static str, expected: &str, got: &Value) -> Error {
    Error::invalid_argument(name, format!("expected {expected}, got a {}", got.type_name()))
}

fn list_of<'v>(items: impl IntoIterator<Item = &'v Value>) -> Value {
    Value::List(items.into_iter().cloned().collect())
}

fn text<F>(c: &Call<'_>, f: F) -> Result<Value>
where
    F: FnOnce(&str) -> String,
{
    Ok(Value::from(f(c.text()?)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Indexing (strings and lists)
// ═══════════════════════════════════════════════════════════════════════════════

fn at(c: &Call<'_>) -> Result<Value> {
    let (index, wrap) = (c.index("index", 0)?, c.flag("wrap", true)?);
    match c.input {
        Value::String(s) => Ok(s.at(index, wrap).into()),
        Value::List(items) => Ok(items.at(index, wrap).cloned().into()),
        other => Err(wrong_input("a string or list", other)),
    }
}

fn at_each(c: &Call<'_>) -> Result<Value> {
    let wrap = c.flag("wrap", true)?;
    let indexes = c
        .other_list("indexes")?
        .iter()
        .map(|v| {
            v.as_int()
                .and_then(|i| isize::try_from(i).ok())
                .ok_or_else(|| wrong_arg("indexes", "a list of integers", v))
        })
        .collect::<Result<Vec<_>>>()?;
    match c.input {
        Value::String(s) => Ok(Value::from(s.at_each(&indexes, wrap))),
        Value::List(items) => Ok(Value::List(
            items
                .at_each(&indexes, wrap)
                .into_iter()
                .map(|v| v.cloned().unwrap_or_default())
                .collect(),
        )),
        other => Err(wrong_input("a string or list", other)),
    }
}

fn slice_from(c: &Call<'_>) -> Result<Value> {
    let index = c.index("index", 0)?;
    match c.input {
        Value::String(s) => Ok(s.slice_from(index).into()),
        Value::List(items) => Ok(list_of(items.slice_from(index))),
        other => Err(wrong_input("a string or list", other)),
    }
}

fn slice_to(c: &Call<'_>) -> Result<Value> {
    let index = c.index("index", 0)?;
    match c.input {
        Value::String(s) => Ok(s.slice_to(index).into()),
        Value::List(items) => Ok(list_of(items.slice_to(index))),
        other => Err(wrong_input("a string or list", other)),
    }
}

fn first_n(c: &Call<'_>) -> Result<Value> {
    let n = c.count("n", 1)?;
    match c.input {
        Value::String(s) => Ok(s.first_n(n).into()),
        Value::List(items) => Ok(list_of(items.first_n(n))),
        other => Err(wrong_input("a string or list", other)),
    }
}

fn last_n(c: &Call<'_>) -> Result<Value> {
    let n = c.count("n", 1)?;
    match c.input {
        Value::String(s) => Ok(s.last_n(n).into()),
        Value::List(items) => Ok(list_of(items.last_n(n))),
        other => Err(wrong_input("a string or list", other)),
    }
}

fn add(c: &Call<'_>) -> Result<Value> {
    let index = c.opt_index("index")?;
    match c.input {
        Value::String(s) => Ok(s.add(c.required_string("value")?, index).into()),
        Value::List(items) => {
            let mut edited = items.clone();
            edited.add(c.items(), index);
            Ok(Value::List(edited))
        }
        other => Err(wrong_input("a string or list", other)),
    }
}

fn include(c: &Call<'_>) -> Result<Value> {
    let index = c.opt_index("index")?;
    Ok(Value::List(c.list()?.include(c.items(), index)))
}

fn truncate(c: &Call<'_>) -> Result<Value> {
    let options = Truncate::default()
        .split(c.flag("split", true)?)
        .from(c.string("from", "right")?.parse::<TruncateFrom>()?)
        .ellipsis(c.string("ellipsis", "...")?);
    let length = c.count("length", 0)?;
    text(c, |s| s.truncate_text(length, &options))
}

fn assign(c: &Call<'_>) -> Result<Value> {
    let values = match c.arg("values") {
        Some(Value::List(items)) => items.clone(),
        Some(v) => vec![v.clone()],
        None => Vec::new(),
    };
    text(c, |s| s.assign(&values))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Strings
// ═══════════════════════════════════════════════════════════════════════════════

fn camelize(c: &Call<'_>) -> Result<Value> {
    let first_upper = c.flag("first_upper", true)?;
    text(c, |s| s.camelize_with(first_upper, c.inflections))
}

fn parameterize(c: &Call<'_>) -> Result<Value> {
    let separator = c.string("separator", "-")?;
    text(c, |s| s.parameterize_with(separator))
}

fn capitalize(c: &Call<'_>) -> Result<Value> {
    let all = c.flag("all", false)?;
    text(c, |s| s.capitalize(all))
}

fn each(c: &Call<'_>) -> Result<Value> {
    let pattern = c.pattern()?;
    Ok(Value::from(c.text()?.each_match(&pattern)))
}

fn has(c: &Call<'_>) -> Result<Value> {
    let pattern = c.pattern()?;
    Ok(Value::from(c.text()?.has(&pattern)))
}

fn starts_with(c: &Call<'_>) -> Result<Value> {
    let pattern = c.pattern()?;
    let case_sensitive = c.flag("case_sensitive", true)?;
    Ok(Value::from(c.text()?.starts_with_pattern(&pattern, case_sensitive)))
}

fn ends_with(c: &Call<'_>) -> Result<Value> {
    let pattern = c.pattern()?;
    let case_sensitive = c.flag("case_sensitive", true)?;
    Ok(Value::from(c.text()?.ends_with_pattern(&pattern, case_sensitive)))
}

fn script(c: &Call<'_>) -> Result<Script> {
    c.required_string("script")?.parse()
}

fn widths(c: &Call<'_>) -> Result<WidthModes> {
    WidthModes::parse(c.string("modes", "all")?)
}

fn pad(c: &Call<'_>, f: fn(&str, &str, usize) -> String) -> Result<Value> {
    let padding = c.string("padding", " ")?;
    let n = c.count("n", 1)?;
    text(c, |s| f(s, padding, n))
}

fn remove(c: &Call<'_>) -> Result<Value> {
    match c.input {
        Value::String(s) => {
            let pattern = c.pattern()?;
            Ok(s.remove_all(&pattern).into())
        }
        Value::List(items) => {
            let matcher = c.matcher()?;
            let mut edited = items.clone();
            edited.remove_where(&matcher);
            Ok(Value::List(edited))
        }
        other => Err(wrong_input("a string or list", other)),
    }
}

fn shift(c: &Call<'_>) -> Result<Value> {
    let n = c.index("n", 1)?;
    let n = i32::try_from(n).map_err(|_| Error::invalid_argument("n", "out of range"))?;
    text(c, |s| s.shift_chars(n))
}

fn to_number(c: &Call<'_>) -> Result<Value> {
    let base = c.count("base", 10)?;
    let base = u32::try_from(base).map_err(|_| Error::invalid_argument("base", "out of range"))?;
    Ok(c.text()?.to_number(base).into())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Lists
// ═══════════════════════════════════════════════════════════════════════════════

fn find(c: &Call<'_>) -> Result<Value> {
    Ok(c.list()?.find(&c.matcher()?).cloned().into())
}

fn find_from(c: &Call<'_>) -> Result<Value> {
    let (start, wrap) = (c.index("start", 0)?, c.flag("wrap", false)?);
    Ok(c.list()?.find_from(&c.matcher()?, start, wrap).cloned().into())
}

fn find_index(c: &Call<'_>) -> Result<Value> {
    Ok(c.list()?.find_index(&c.matcher()?).into())
}

fn find_index_from(c: &Call<'_>) -> Result<Value> {
    let (start, wrap) = (c.index("start", 0)?, c.flag("wrap", false)?);
    Ok(c.list()?.find_index_from(&c.matcher()?, start, wrap).into())
}

fn group_by(c: &Call<'_>) -> Result<Value> {
    let groups = c.list()?.group_by(&c.projector()?);
    Ok(Value::Object(
        groups
            .into_iter()
            .map(|(k, v)| (k, Value::List(v)))
            .collect::<BTreeMap<_, _>>(),
    ))
}

fn sort_by(c: &Call<'_>) -> Result<Value> {
    let descending = c.flag("desc", false)?;
    Ok(Value::List(c.list()?.sorted_by(&c.projector()?, descending)))
}

fn unique(c: &Call<'_>) -> Result<Value> {
    Ok(Value::List(c.list()?.unique_by(&c.projector()?)))
}

fn set_op(c: &Call<'_>, f: fn(&[Value], &[Value]) -> Vec<Value>) -> Result<Value> {
    Ok(Value::List(f(c.list()?, c.other_list("other")?)))
}

fn remove_at(c: &Call<'_>) -> Result<Value> {
    let start = c.index("start", 0)?;
    let end = c.opt_index("end")?;
    let mut edited = c.list()?.to_vec();
    edited.remove_at(start, end);
    Ok(Value::List(edited))
}

fn sample(c: &Call<'_>) -> Result<Value> {
    let items = c.list()?;
    match c.arg("n") {
        Some(_) => Ok(list_of(items.sample_n(c.count("n", 1)?))),
        None => Ok(items.sample().cloned().into()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Objects
// ═══════════════════════════════════════════════════════════════════════════════

fn merge(c: &Call<'_>) -> Result<Value> {
    object::merge(c.list()?, c.flag("deep", false)?)
}

fn path(c: &Call<'_>) -> Result<Value> {
    Ok(c.input.path(c.required_string("path")?).into())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table
// ═══════════════════════════════════════════════════════════════════════════════

const fn op(name: &'static str, summary: &'static str, run: fn(&Call<'_>) -> Result<Value>) -> Operation {
    Operation { name, summary, run }
}

static OPERATIONS: &[Operation] = &[
    // Indexing
    op("at", "element at `index` (`wrap` default true)", at),
    op("at_each", "elements at each of `indexes`", at_each),
    op("slice_from", "everything from `index` on", slice_from),
    op("slice_to", "everything before `index`", slice_to),
    op("first_n", "first `n` elements (default 1)", first_n),
    op("last_n", "last `n` elements (default 1)", last_n),
    op("add", "insert `value` at `index` (default: end)", add),
    op("include", "copy of a list with `value` inserted at `index`", include),
    op("truncate", "shorten to `length` (`split`, `from`, `ellipsis`)", truncate),
    op("assign", "fill `{name}`/`{n}` placeholders from `values`", assign),
    // Case
    op("camelize", "caps_lock -> CapsLock (`first_upper`)", camelize),
    op("underscore", "capsLock -> caps_lock", |c| text(c, str::underscore)),
    op("dasherize", "capsLock -> caps-lock", |c| text(c, str::dasherize)),
    op("spacify", "capsLock -> caps lock", |c| text(c, str::spacify)),
    op("humanize", "author_id -> Author", |c| text(c, |s| s.humanize_with(c.inflections))),
    op("titleize", "capitalize significant words", |c| text(c, |s| s.titleize_with(c.inflections))),
    op("parameterize", "URL-safe slug (`separator`)", parameterize),
    op("capitalize", "uppercase the first letter (`all` words)", capitalize),
    op("pluralize", "plural form", |c| text(c, |s| s.pluralize_with(c.inflections))),
    op("singularize", "singular form", |c| text(c, |s| s.singularize_with(c.inflections))),
    // Inspection
    op("codes", "code points", |c| Ok(Value::from(c.text()?.codes()))),
    op("compact", "trim and collapse whitespace", |c| text(c, str::compact)),
    op("each", "every match of `pattern`/`regex` (default: each char)", each),
    op("paragraphs", "blocks separated by blank lines", |c| Ok(Value::from(c.text()?.paragraphs()))),
    op("words", "whitespace-separated words", |c| Ok(Value::from(c.text()?.words()))),
    op("chars", "each char", |c| Ok(Value::from(c.text()?.chars().collect::<Vec<_>>()))),
    op("lines", "lines of the trimmed text", |c| Ok(Value::from(c.text()?.trimmed_lines()))),
    op("repeat", "the text `n` times (default 0)", |c| {
        let n = c.count("n", 0)?;
        text(c, |s| s.repeat(n))
    }),
    op("trim", "without leading or trailing whitespace", |c| text(c, |s| s.trim().to_string())),
    op("trim_left", "without leading whitespace", |c| text(c, |s| s.trim_start().to_string())),
    op("trim_right", "without trailing whitespace", |c| text(c, |s| s.trim_end().to_string())),
    op("has", "whether `pattern`/`regex` occurs", has),
    op("starts_with", "starts with `pattern`/`regex` (`case_sensitive`)", starts_with),
    op("ends_with", "ends with `pattern`/`regex` (`case_sensitive`)", ends_with),
    op("is_blank", "empty or whitespace only", |c| Ok(Value::from(c.text()?.is_blank()))),
    // Codecs
    op("escape_html", "escape & < > \" '", |c| text(c, str::escape_html)),
    op("unescape_html", "decode HTML entities (`partial` keeps &amp;)", |c| {
        let partial = c.flag("partial", false)?;
        text(c, |s| s.unescape_html(partial))
    }),
    op("escape_regexp", "escape regex metacharacters", |c| text(c, str::escape_regexp)),
    op("escape_url", "percent-encode (`param` also encodes delimiters)", |c| {
        let param = c.flag("param", false)?;
        text(c, |s| s.escape_url(param))
    }),
    op("unescape_url", "percent-decode (`partial` keeps delimiters)", |c| {
        let partial = c.flag("partial", false)?;
        Ok(Value::from(c.text()?.unescape_url(partial)?))
    }),
    op("encode_base64", "base64 of the UTF-8 bytes", |c| text(c, str::encode_base64)),
    op("decode_base64", "decode base64 to text", |c| Ok(Value::from(c.text()?.decode_base64()?))),
    // Scripts and widths
    op("has_script", "any char in `script`", |c| Ok(Value::from(c.text()?.has_script(script(c)?)))),
    op("is_script", "every char in `script`", |c| Ok(Value::from(c.text()?.is_script(script(c)?)))),
    op("hiragana", "katakana to hiragana (`all` includes half-width)", |c| {
        let all = c.flag("all", true)?;
        text(c, |s| s.hiragana(all))
    }),
    op("katakana", "hiragana to katakana", |c| text(c, str::katakana)),
    op("hankaku", "full-width to half-width (`modes`)", |c| {
        let modes = widths(c)?;
        text(c, |s| s.hankaku(modes))
    }),
    op("zenkaku", "half-width to full-width (`modes`)", |c| {
        let modes = widths(c)?;
        text(c, |s| s.zenkaku(modes))
    }),
    op("normalize", "fold accents and full-width ASCII", |c| text(c, StrExt::normalize)),
    // Rewriting
    op("pad", "`padding` repeated `n` times on both sides", |c| pad(c, StrExt::pad)),
    op("pad_left", "`padding` repeated `n` times on the left", |c| pad(c, StrExt::pad_left)),
    op("pad_right", "`padding` repeated `n` times on the right", |c| pad(c, StrExt::pad_right)),
    op("remove", "strings: drop `pattern`/`regex`; lists: drop matches in place", remove),
    op("remove_tags", "drop `tags` with their contents (default: all)", |c| {
        let tags = c.strings("tags")?;
        text(c, |s| s.remove_tags(&tags))
    }),
    op("strip_tags", "drop `tags` markup, keep contents (default: all)", |c| {
        let tags = c.strings("tags")?;
        text(c, |s| s.strip_tags(&tags))
    }),
    op("reverse", "chars in reverse order", |c| text(c, str::reversed)),
    op("shift", "shift code points by `n`", shift),
    op("to_number", "leading number in `base` (default 10)", to_number),
    // Lists
    op("find", "first element matching", find),
    op("find_from", "first match from `start` (`wrap`)", find_from),
    op("find_index", "index of first match", find_index),
    op("find_index_from", "index of first match from `start` (`wrap`)", find_index_from),
    op("find_all", "every match", |c| Ok(list_of(c.list()?.find_all(&c.matcher()?)))),
    op("filter", "copies of matching elements", |c| Ok(Value::List(c.list()?.filter_by(&c.matcher()?)))),
    op("count", "number of matches", |c| Ok(Value::from(c.list()?.count_by(&c.matcher()?)))),
    op("exclude", "copies of non-matching elements", |c| Ok(Value::List(c.list()?.exclude(&c.matcher()?)))),
    op("remove_at", "drop `start` through `end`", remove_at),
    op("every", "all elements match", |c| Ok(Value::from(c.list()?.every(&c.matcher()?)))),
    op("some", "some element matches", |c| Ok(Value::from(c.list()?.some(&c.matcher()?)))),
    op("none", "no element matches", |c| Ok(Value::from(c.list()?.none(&c.matcher()?)))),
    op("group_by", "partition by projected `by`", group_by),
    op("sort_by", "stable sort by projected `by` (`desc`)", sort_by),
    op("unique", "distinct by projected `by`", unique),
    op("min", "elements with smallest `by`", |c| Ok(list_of(c.list()?.min_of(&c.projector()?)))),
    op("max", "elements with largest `by`", |c| Ok(list_of(c.list()?.max_of(&c.projector()?)))),
    op("least", "elements with the rarest `by`", |c| Ok(list_of(c.list()?.least(&c.projector()?)))),
    op("most", "elements with the commonest `by`", |c| Ok(list_of(c.list()?.most(&c.projector()?)))),
    op("sum", "sum of numeric `by`", |c| Ok(Value::from(c.list()?.sum_of(&c.projector()?)))),
    op("average", "mean of numeric `by`", |c| Ok(c.list()?.average_of(&c.projector()?).into())),
    op("intersect", "distinct elements also in `other`", |c| set_op(c, <[Value]>::intersect)),
    op("union", "distinct elements of both", |c| set_op(c, <[Value]>::union)),
    op("subtract", "elements not in `other`", |c| set_op(c, <[Value]>::subtract)),
    op("randomize", "shuffled copy", |c| Ok(Value::List(c.list()?.randomize()))),
    op("sample", "random element, or `n` distinct ones", sample),
    // Objects
    op("merge", "merge a list of objects left to right (`deep`)", merge),
    op("select", "keep keys matching `matcher`/`regex`", |c| object::select(c.input, &c.matcher()?)),
    op("reject", "drop keys matching `matcher`/`regex`", |c| object::reject(c.input, &c.matcher()?)),
    op("path", "value at dotted `path`", path),
];
