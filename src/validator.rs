//! Validators for raw textual input.
//!
//! Validators sit upstream of instance construction: they check and convert
//! raw strings into typed values before those values end up in the records
//! being diffed. The diff engine itself never calls them.
//!
//! # Examples
//!
//! ```
//! use attrdiff::validator::{ByteValidator, Validator};
//!
//! let strict = ByteValidator::new();
//! assert_eq!(strict.parse("-12"), Some(-12));
//! assert!(!strict.validate(" 12"));
//! assert!(!strict.validate("128"));
//!
//! let lenient = ByteValidator::lenient();
//! assert_eq!(lenient.parse(" +1,2 "), Some(12));
//! ```

use crate::value::Locale;

/// A predicate plus converter over raw input.
pub trait Validator {
    type Output;

    /// Converts `raw`, or returns `None` when it is not valid.
    fn parse(&self, raw: &str) -> Option<Self::Output>;

    fn validate(&self, raw: &str) -> bool {
        self.parse(raw).is_some()
    }
}

/// Parses signed bytes (`-128..=127`).
///
/// Strict mode accepts only an optional `-` followed by digits. Lenient mode
/// also trims surrounding whitespace, accepts a leading `+` and ignores the
/// grouping separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteValidator {
    strict: bool,
    grouping: char,
}

impl Default for ByteValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteValidator {
    pub fn new() -> Self {
        Self {
            strict: true,
            grouping: ',',
        }
    }

    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::new()
        }
    }

    /// Uses the grouping separator customary for `locale` in lenient mode.
    pub fn with_locale(mut self, locale: &Locale) -> Self {
        self.grouping = match locale.language() {
            "de" | "es" | "it" | "nl" | "pt" | "id" => '.',
            "fr" | "ru" | "pl" | "cs" | "sv" | "fi" | "nb" => ' ',
            _ => ',',
        };
        self
    }

    pub fn with_grouping(mut self, grouping: char) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_in_range(&self, value: i8, min: i8, max: i8) -> bool {
        value >= min && value <= max
    }

    pub fn min_value(&self, value: i8, min: i8) -> bool {
        value >= min
    }

    pub fn max_value(&self, value: i8, max: i8) -> bool {
        value <= max
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        if self.strict {
            return Some(raw.to_string());
        }

        let trimmed = raw.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if unsigned.starts_with(['+', '-']) && trimmed.starts_with('+') {
            return None;
        }
        Some(unsigned.chars().filter(|c| *c != self.grouping).collect())
    }
}

impl Validator for ByteValidator {
    type Output = i8;

    fn parse(&self, raw: &str) -> Option<i8> {
        let normalized = self.normalize(raw)?;
        let digits = normalized.strip_prefix('-').unwrap_or(&normalized);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        // Parsing as i64 first separates out-of-range input from malformed input.
        let wide: i64 = normalized.parse().ok()?;
        i8::try_from(wide).ok()
    }
}
