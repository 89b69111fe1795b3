//! Dotted-decimal numbering codec.
//!
//! A numbering string is `<integer>` or `<integer>.<digits>`. The integer part
//! names the chapter; every digit after the dot is one level of depth, so the
//! decimal part is a path, not a magnitude (`"2.10"` is deeper than `"2.1"`).

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<chapter>[0-9]+)(?:\.(?P<digits>[0-9]+))?$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numbering {
    chapter: String,
    digits: String,
}

impl Numbering {
    pub fn parse(input: &str) -> Result<Self> {
        let caps = NUMBER_RE
            .captures(input)
            .ok_or_else(|| Error::MalformedNumber(input.to_string()))?;
        Ok(Self {
            chapter: caps["chapter"].to_string(),
            digits: caps
                .name("digits")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// Integer part, kept verbatim as the chapter key.
    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    /// Decimal digit sequence; empty for a bare chapter number.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn level(&self) -> usize {
        self.digits.len()
    }

    /// Structural parent: the same number with its last digit dropped.
    ///
    /// A level-1 number has the bare chapter integer as its parent. A bare
    /// chapter number has no parent.
    pub fn parent(&self) -> Option<Numbering> {
        if self.digits.is_empty() {
            return None;
        }
        let mut digits = self.digits.clone();
        digits.pop();
        Some(Self {
            chapter: self.chapter.clone(),
            digits,
        })
    }

    /// True when `candidate` is this number with exactly one digit appended.
    pub fn is_parent_of(&self, candidate: &Numbering) -> bool {
        candidate
            .parent()
            .is_some_and(|parent| &parent == self)
    }

    /// Same number with the digit at `position` replaced.
    pub(crate) fn with_digit(&self, position: usize, digit: u8) -> Option<Numbering> {
        if position >= self.digits.len() || !digit.is_ascii_digit() {
            return None;
        }
        let mut bytes = self.digits.clone().into_bytes();
        bytes[position] = digit;
        let digits = String::from_utf8(bytes).ok()?;
        Some(Self {
            chapter: self.chapter.clone(),
            digits,
        })
    }
}

impl fmt::Display for Numbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            write!(f, "{}", self.chapter)
        } else {
            write!(f, "{}.{}", self.chapter, self.digits)
        }
    }
}

pub fn level(number: &str) -> Result<usize> {
    Ok(Numbering::parse(number)?.level())
}

pub fn parent_number(number: &str) -> Result<Option<String>> {
    Ok(Numbering::parse(number)?
        .parent()
        .map(|parent| parent.to_string()))
}

/// Child predicate: `candidate` equals `number` plus exactly one trailing digit.
/// Malformed input on either side is never a child.
pub fn is_child_number(number: &str, candidate: &str) -> bool {
    match (Numbering::parse(number), Numbering::parse(candidate)) {
        (Ok(parent), Ok(child)) => parent.is_parent_of(&child),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_counts_decimal_digits() {
        assert_eq!(level("3").unwrap(), 0);
        assert_eq!(level("2.36").unwrap(), 2);
        assert_eq!(level("42.1").unwrap(), 1);
        assert_eq!(level("2.010").unwrap(), 3);
    }

    #[test]
    fn malformed_numbers_are_reported() {
        for bad in ["", "1.", ".5", "1.2.3", "a.1", "1.x", " 1.2"] {
            let err = level(bad).unwrap_err();
            assert_eq!(err, Error::MalformedNumber(bad.to_string()));
            assert!(err.to_string().contains(&format!("{bad:?}")));
        }
    }

    #[test]
    fn parent_drops_last_digit() {
        assert_eq!(parent_number("1.71").unwrap().as_deref(), Some("1.7"));
        assert_eq!(parent_number("1.7").unwrap().as_deref(), Some("1"));
        assert_eq!(parent_number("1").unwrap(), None);
        assert_eq!(parent_number("2.10").unwrap().as_deref(), Some("2.1"));
    }

    #[test]
    fn child_predicate_requires_one_extra_digit() {
        assert!(is_child_number("1.7", "1.71"));
        assert!(is_child_number("1.7", "1.70"));
        assert!(is_child_number("12", "12.4"));
        assert!(!is_child_number("1.7", "1.7"));
        assert!(!is_child_number("1.7", "1.712"));
        assert!(!is_child_number("1.7", "2.71"));
        assert!(!is_child_number("1.7", "1.7x"));
    }

    #[test]
    fn display_round_trips_literal_digits() {
        for raw in ["5", "5.01", "5.1", "42.12"] {
            assert_eq!(Numbering::parse(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn with_digit_replaces_one_position() {
        let number = Numbering::parse("2.01").unwrap();
        assert_eq!(number.with_digit(0, b'3').unwrap().to_string(), "2.31");
        assert!(number.with_digit(2, b'3').is_none());
    }
}
