//! Codecs: HTML entities, percent-encoding, base64, regex escaping, and Latin
//! ASCII folding.

use crate::width::{self, WidthModes};
use crate::{Error, Result};
use base64::{engine::general_purpose, Engine as _};

// ═══════════════════════════════════════════════════════════════════════════════
// HTML
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode named and numeric entities. With `partial`, `&amp;` is kept so a
/// once-escaped document can be unescaped without exposing double escapes.
pub(crate) fn unescape_html(s: &str, partial: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|end| {
            decode_entity(&tail[1..end], partial).map(|c| (c, end))
        }) {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str, partial: bool) -> Option<char> {
    match name {
        "amp" if partial => None,
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// URL
// ═══════════════════════════════════════════════════════════════════════════════

const URI_MARKS: &str = "-_.!~*'()";
const URI_RESERVED: &str = ";,/?:@&=+$#";

/// Percent-encode. Without `param`, reserved URI delimiters survive so whole
/// URLs stay usable; with it, only unreserved characters do.
pub(crate) fn escape_url(s: &str, param: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut buf = [0_u8; 4];
    for c in s.chars() {
        let keep = c.is_ascii_alphanumeric()
            || URI_MARKS.contains(c)
            || (!param && URI_RESERVED.contains(c));
        if keep {
            out.push(c);
        } else {
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

/// Decode percent escapes. With `partial`, escapes of reserved delimiters are
/// left encoded.
///
/// # Errors
///
/// [`Error::Decode`] on a truncated escape, bad hex digits, or invalid UTF-8.
pub(crate) fn unescape_url(s: &str, partial: bool) -> Result<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let hex = s.get(i + 1..i + 3).ok_or_else(|| Error::Decode {
            message: format!("truncated escape at byte {i}"),
        })?;
        let byte = u8::from_str_radix(hex, 16).map_err(|_| Error::Decode {
            message: format!("invalid escape \"%{hex}\""),
        })?;
        if partial && URI_RESERVED.as_bytes().contains(&byte) {
            out.extend_from_slice(&bytes[i..i + 3]);
        } else {
            out.push(byte);
        }
        i += 3;
    }
    String::from_utf8(out).map_err(|e| Error::Decode {
        message: e.to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Base64
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn encode_base64(s: &str) -> String {
    general_purpose::STANDARD.encode(s.as_bytes())
}

/// # Errors
///
/// [`Error::Decode`] if the input is not base64 or does not decode to UTF-8.
pub(crate) fn decode_base64(s: &str) -> Result<String> {
    let bytes = general_purpose::STANDARD
        .decode(s.trim())
        .map_err(|e| Error::Decode {
            message: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| Error::Decode {
        message: e.to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Regex and normalization
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn escape_regexp(s: &str) -> String {
    regex::escape(s)
}

fn is_foldable_latin(c: char) -> bool {
    matches!(c as u32, 0x80..=0x24F | 0x1E00..=0x1EFF)
}

/// Fold accented Latin letters to ASCII and full-width ASCII to half-width.
/// Other scripts pass through untouched.
pub(crate) fn normalize(s: &str) -> String {
    let narrowed = width::hankaku(s, WidthModes::ALPHABET | WidthModes::NUMBERS | WidthModes::PUNCTUATION);
    let mut out = String::with_capacity(narrowed.len());
    for c in narrowed.chars() {
        if is_foldable_latin(c) {
            out.push_str(unidecode::unidecode_char(c));
        } else {
            out.push(c);
        }
    }
    out
}
