//! Full-width (zenkaku) and half-width (hankaku) conversion, and kana shifting.
//!
//! Full-width ASCII sits at a fixed offset from ASCII. Half-width katakana has
//! no voiced forms of its own: a voiced full-width letter becomes the base
//! letter followed by a combining mark, and the conversion back recombines them.

use crate::{Error, Result};

bitflags::bitflags! {
    /// Character classes a width conversion applies to.
    ///
    /// ```
    /// use sucre::WidthModes;
    ///
    /// assert_eq!(WidthModes::parse("kn").unwrap(), WidthModes::KATAKANA | WidthModes::NUMBERS);
    /// assert_eq!(WidthModes::parse("all").unwrap(), WidthModes::all());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WidthModes: u8 {
        /// Latin letters.
        const ALPHABET = 1 << 0;
        /// Digits.
        const NUMBERS = 1 << 1;
        /// Katakana, the middle dot, and the prolonged sound mark.
        const KATAKANA = 1 << 2;
        /// The ideographic space.
        const SPACES = 1 << 3;
        /// ASCII symbols and Japanese brackets, comma, and full stop.
        const PUNCTUATION = 1 << 4;
    }
}

impl WidthModes {
    /// Parse a mode string.
    ///
    /// Accepts `"all"`, full names (`"alphabet"`, `"numbers"`, `"katakana"`,
    /// `"spaces"`, `"punctuation"`), or any run of the initials `a n k s p`.
    /// Several modes may be separated by commas or spaces. Empty means all.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for anything else.
    pub fn parse(s: &str) -> Result<Self> {
        let mut modes = Self::empty();
        let mut any = false;
        for word in s.split(|c: char| c == ',' || c.is_whitespace()).filter(|w| !w.is_empty()) {
            any = true;
            modes |= match word {
                "all" => Self::all(),
                "alphabet" => Self::ALPHABET,
                "numbers" => Self::NUMBERS,
                "katakana" => Self::KATAKANA,
                "spaces" => Self::SPACES,
                "punctuation" => Self::PUNCTUATION,
                initials => {
                    let mut m = Self::empty();
                    for c in initials.chars() {
                        m |= match c {
                            'a' => Self::ALPHABET,
                            'n' => Self::NUMBERS,
                            'k' => Self::KATAKANA,
                            's' => Self::SPACES,
                            'p' => Self::PUNCTUATION,
                            _ => {
                                return Err(Error::invalid_argument(
                                    "mode",
                                    format!("unknown width mode \"{word}\""),
                                ))
                            }
                        };
                    }
                    m
                }
            };
        }
        Ok(if any { modes } else { Self::all() })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════════════════════════════════════════

const FULL_WIDTH_OFFSET: u32 = 0xFEE0;
const IDEOGRAPHIC_SPACE: char = '\u{3000}';
const HALF_VOICED: char = '\u{FF9E}';
const HALF_SEMI_VOICED: char = '\u{FF9F}';
const FULL_VOICED: char = '\u{309B}';
const FULL_SEMI_VOICED: char = '\u{309C}';

/// Full-width katakana for half-width U+FF66 through U+FF9D, in order.
const KATAKANA_ROW: &str =
    "ヲァィゥェォャュョッーアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン";
const HALF_KATAKANA_START: u32 = 0xFF66;

/// Letters that take the voiced mark (their voiced form is the next code point).
const VOICEABLE: &str = "カキクケコサシスセソタチツテトハヒフヘホ";
/// Letters that take the semi-voiced mark (two code points on).
const SEMI_VOICEABLE: &str = "ハヒフヘホ";

/// Japanese punctuation with a half-width form.
const PUNCTUATION_PAIRS: [(char, char); 4] = [('。', '｡'), ('「', '｢'), ('」', '｣'), ('、', '､')];
/// Katakana marks with a half-width form (outside the main row).
const KATAKANA_MARKS: [(char, char); 3] = [('・', '･'), (FULL_VOICED, HALF_VOICED), (FULL_SEMI_VOICED, HALF_SEMI_VOICED)];

fn offset(c: char, delta: i64) -> char {
    u32::try_from(i64::from(u32::from(c)) + delta)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(c)
}

fn ascii_mode(c: char) -> Option<WidthModes> {
    match c {
        'a'..='z' | 'A'..='Z' => Some(WidthModes::ALPHABET),
        '0'..='9' => Some(WidthModes::NUMBERS),
        '!'..='~' => Some(WidthModes::PUNCTUATION),
        _ => None,
    }
}

fn half_katakana(full: char) -> Option<char> {
    KATAKANA_ROW
        .chars()
        .position(|k| k == full)
        .and_then(|i| u32::try_from(i).ok())
        .and_then(|i| char::from_u32(HALF_KATAKANA_START + i))
}

fn full_katakana(half: char) -> Option<char> {
    let i = u32::from(half).checked_sub(HALF_KATAKANA_START)?;
    KATAKANA_ROW.chars().nth(usize::try_from(i).ok()?)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════════

/// Full-width to half-width for the selected classes.
pub(crate) fn hankaku(s: &str, modes: WidthModes) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let narrow = offset(c, -i64::from(FULL_WIDTH_OFFSET));
        if ('\u{FF01}'..='\u{FF5E}').contains(&c) && ascii_mode(narrow).is_some_and(|m| modes.contains(m)) {
            out.push(narrow);
        } else if c == IDEOGRAPHIC_SPACE && modes.contains(WidthModes::SPACES) {
            out.push(' ');
        } else if let Some(&(_, half)) = PUNCTUATION_PAIRS
            .iter()
            .find(|(full, _)| *full == c)
            .filter(|_| modes.contains(WidthModes::PUNCTUATION))
        {
            out.push(half);
        } else if modes.contains(WidthModes::KATAKANA) {
            push_half_katakana(&mut out, c);
        } else {
            out.push(c);
        }
    }
    out
}

fn push_half_katakana(out: &mut String, c: char) {
    if let Some(half) = half_katakana(c) {
        out.push(half);
    } else if let Some(&(_, half)) = KATAKANA_MARKS.iter().find(|(full, _)| *full == c) {
        out.push(half);
    } else if c == 'ヴ' {
        out.push('ｳ');
        out.push(HALF_VOICED);
    } else if let Some(base) = half_katakana(offset(c, -1)).filter(|_| VOICEABLE.contains(offset(c, -1))) {
        out.push(base);
        out.push(HALF_VOICED);
    } else if let Some(base) = half_katakana(offset(c, -2)).filter(|_| SEMI_VOICEABLE.contains(offset(c, -2))) {
        out.push(base);
        out.push(HALF_SEMI_VOICED);
    } else {
        out.push(c);
    }
}

/// Half-width to full-width for the selected classes.
pub(crate) fn zenkaku(s: &str, modes: WidthModes) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if ascii_mode(c).is_some_and(|m| modes.contains(m)) {
            out.push(offset(c, i64::from(FULL_WIDTH_OFFSET)));
        } else if c == ' ' && modes.contains(WidthModes::SPACES) {
            out.push(IDEOGRAPHIC_SPACE);
        } else if let Some(&(full, _)) = PUNCTUATION_PAIRS
            .iter()
            .find(|(_, half)| *half == c)
            .filter(|_| modes.contains(WidthModes::PUNCTUATION))
        {
            out.push(full);
        } else if let Some(full) = full_katakana(c).filter(|_| modes.contains(WidthModes::KATAKANA)) {
            let combined = match chars.peek() {
                Some(&HALF_VOICED) if full == 'ウ' => Some('ヴ'),
                Some(&HALF_VOICED) if VOICEABLE.contains(full) => Some(offset(full, 1)),
                Some(&HALF_SEMI_VOICED) if SEMI_VOICEABLE.contains(full) => Some(offset(full, 2)),
                _ => None,
            };
            if let Some(voiced) = combined {
                chars.next();
                out.push(voiced);
            } else {
                out.push(full);
            }
        } else if let Some(&(full, _)) = KATAKANA_MARKS
            .iter()
            .find(|(_, half)| *half == c)
            .filter(|_| modes.contains(WidthModes::KATAKANA))
        {
            out.push(full);
        } else {
            out.push(c);
        }
    }
    out
}

/// Katakana to hiragana. With `all`, half-width katakana converts too.
pub(crate) fn hiragana(s: &str, all: bool) -> String {
    let source = if all {
        zenkaku(s, WidthModes::KATAKANA)
    } else {
        s.to_string()
    };
    source
        .chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => offset(c, -0x60),
            _ => c,
        })
        .collect()
}

/// Hiragana to katakana.
pub(crate) fn katakana(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => offset(c, 0x60),
            _ => c,
        })
        .collect()
}
