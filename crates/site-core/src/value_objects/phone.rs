//! Phone numbers as entered on the contact form
//!
//! A number is accepted when it carries 10 to 15 digits once every
//! formatting character (spaces, brackets, dashes, leading `+`) is removed.

use std::fmt;

/// Minimum digit count for a callable number
pub const MIN_DIGITS: usize = 10;

/// Maximum digit count (E.164)
pub const MAX_DIGITS: usize = 15;

/// Error when validating a phone number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    #[error("phone number must contain from {MIN_DIGITS} to {MAX_DIGITS} digits, got {0}")]
    DigitCount(usize),
}

/// Validated phone number, kept as the visitor typed it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    /// Validate and wrap a raw phone string
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let raw = raw.trim();
        let count = phone_digits(raw).len();
        if (MIN_DIGITS..=MAX_DIGITS).contains(&count) {
            Ok(Self(raw.to_string()))
        } else {
            Err(PhoneError::DigitCount(count))
        }
    }

    /// Original representation
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits only
    pub fn digits(&self) -> String {
        phone_digits(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip everything except ASCII digits
pub fn phone_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Format a Russian number for display: `+7 (8142) 28-09-03`
///
/// A leading `8` is rewritten to `7` and a missing country code is added.
/// Numbers that are too short for the full mask are formatted as far as
/// they go; anything under seven digits is returned unchanged.
pub fn format_phone(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let digits = russian_digits(raw);
    let d = digits.as_str();
    if d.len() >= 11 {
        return full_mask(d);
    }
    if d.len() >= 7 {
        let mut formatted = format!("+7 ({}) {}", &d[1..5], &d[5..7]);
        if d.len() >= 9 {
            formatted.push('-');
            formatted.push_str(&d[7..9]);
        }
        return formatted;
    }

    raw.to_string()
}

/// Header and footer variant: the full mask or the value untouched
pub fn format_phone_or_raw(raw: &str) -> String {
    let digits = russian_digits(raw);
    if digits.len() >= 11 {
        full_mask(&digits)
    } else {
        raw.to_string()
    }
}

/// Digits with the country code forced to `7`
fn russian_digits(raw: &str) -> String {
    let mut digits = phone_digits(raw);
    if let Some(rest) = digits.strip_prefix('8') {
        digits = format!("7{rest}");
    }
    if !digits.starts_with('7') {
        digits.insert(0, '7');
    }
    digits
}

fn full_mask(d: &str) -> String {
    format!("+7 ({}) {}-{}-{}", &d[1..5], &d[5..7], &d[7..9], &d[9..11])
}
