//! Unicode script classification backed by a static range table.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A writing system recognized by [`StrExt::has_script`](crate::StrExt::has_script)
/// and [`StrExt::is_script`](crate::StrExt::is_script).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Arabic,
    Cyrillic,
    Devanagari,
    Greek,
    Hangul,
    Han,
    /// Same ranges as [`Script::Han`].
    Kanji,
    Hebrew,
    Hiragana,
    /// Hiragana and katakana together.
    Kana,
    Katakana,
    Latin,
    Thai,
}

impl Script {
    /// Every script, in table order.
    pub const ALL: [Script; 13] = [
        Self::Arabic,
        Self::Cyrillic,
        Self::Devanagari,
        Self::Greek,
        Self::Hangul,
        Self::Han,
        Self::Kanji,
        Self::Hebrew,
        Self::Hiragana,
        Self::Kana,
        Self::Katakana,
        Self::Latin,
        Self::Thai,
    ];

    /// Inclusive code point ranges.
    #[must_use]
    pub fn ranges(self) -> &'static [(u32, u32)] {
        match self {
            Self::Arabic => &[(0x0600, 0x06FF)],
            Self::Cyrillic => &[(0x0400, 0x04FF)],
            Self::Devanagari => &[(0x0900, 0x097F)],
            Self::Greek => &[(0x0370, 0x03FF)],
            Self::Hangul => &[(0xAC00, 0xD7AF), (0x1100, 0x11FF)],
            Self::Han | Self::Kanji => &[(0x4E00, 0x9FFF), (0xF900, 0xFAFF)],
            Self::Hebrew => &[(0x0590, 0x05FF)],
            Self::Hiragana => &[(0x3040, 0x309F), (0x30FB, 0x30FC)],
            Self::Kana => &[(0x3040, 0x30FF), (0xFF61, 0xFF9F)],
            Self::Katakana => &[(0x30A0, 0x30FF), (0xFF61, 0xFF9F)],
            Self::Latin => &[(0x0001, 0x024F)],
            Self::Thai => &[(0x0E00, 0x0E7F)],
        }
    }

    /// Whether `c` falls in this script.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        let cp = u32::from(c);
        self.ranges().iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
    }

    /// The script's name as written in operation names (`"Hangul"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Arabic => "Arabic",
            Self::Cyrillic => "Cyrillic",
            Self::Devanagari => "Devanagari",
            Self::Greek => "Greek",
            Self::Hangul => "Hangul",
            Self::Han => "Han",
            Self::Kanji => "Kanji",
            Self::Hebrew => "Hebrew",
            Self::Hiragana => "Hiragana",
            Self::Kana => "Kana",
            Self::Katakana => "Katakana",
            Self::Latin => "Latin",
            Self::Thai => "Thai",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Script {
    type Err = Error;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|script| script.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_argument("script", format!("unknown script \"{s}\"")))
    }
}

/// Any character of `s` is in `script`.
pub(crate) fn has_script(s: &str, script: Script) -> bool {
    s.chars().any(|c| script.contains(c))
}

/// `s` is non-empty and every character is whitespace or in `script`.
pub(crate) fn is_script(s: &str, script: Script) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_whitespace() || script.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_script_examples() {
        assert!(has_script("أتكلم", Script::Arabic));
        assert!(has_script("визит", Script::Cyrillic));
        assert!(has_script("잘 먹겠습니다!", Script::Hangul));
        assert!(has_script("ミックスです", Script::Katakana));
        assert!(has_script("l'année", Script::Latin));
        assert!(!has_script("hello", Script::Greek));
    }

    #[test]
    fn is_script_ignores_whitespace() {
        assert!(is_script("ミックス ミックス", Script::Katakana));
        assert!(!is_script("ミックスです", Script::Katakana));
        assert!(is_script("ミックスです", Script::Kana));
        assert!(!is_script("", Script::Latin));
    }

    #[test]
    fn kanji_aliases_han() {
        assert!(is_script("日本語", Script::Kanji));
        assert!(is_script("日本語", Script::Han));
    }

    #[test]
    fn parses_names() {
        assert_eq!("hangul".parse::<Script>().unwrap(), Script::Hangul);
        assert_eq!("Thai".parse::<Script>().unwrap(), Script::Thai);
        assert!("klingon".parse::<Script>().is_err());
    }
}
