//! Locale-aware string ordering.
//!
//! Strings compare first on their base characters (case and diacritics
//! ignored), then on diacritics, then on case with lowercase first, and
//! finally on raw code points so the order stays total.
//!
//! At the base level whitespace sorts before punctuation and symbols, which
//! sort before digits, which sort before letters.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Character classes in primary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Space,
    Symbol,
    Digit,
    Letter,
}

impl Class {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            Self::Space
        } else if c.is_numeric() {
            Self::Digit
        } else if c.is_alphabetic() {
            Self::Letter
        } else {
            Self::Symbol
        }
    }
}

/// Precomputed sort key for one string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(Class, char)>,
    secondary: String,
    tertiary: Vec<u8>,
    raw: String,
}

impl CollationKey {
    pub fn new(value: &str) -> Self {
        let decomposed: Vec<char> = value.nfd().collect();

        let primary = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .flat_map(|c| c.to_lowercase())
            .map(|c| (Class::of(c), c))
            .collect();
        let secondary = decomposed.iter().flat_map(|c| c.to_lowercase()).collect();
        let tertiary = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .map(|c| u8::from(c.is_uppercase()))
            .collect();

        Self {
            primary,
            secondary,
            tertiary,
            raw: value.to_string(),
        }
    }
}
