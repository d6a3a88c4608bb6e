//! Pure field validators used by per-step validation gates.
//!
//! Each validator is a function over the current field value; the wizard
//! navigator never sees these; forms run them before advancing a step.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{8,15}$").expect("static regex"));

/// Non-empty after trimming.
pub fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Required with a minimum trimmed length.
pub fn min_len(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Valid email address. Empty input is accepted; pair with [`required`]
/// when the field is mandatory.
pub fn email(value: &str) -> bool {
    value.is_empty() || EMAIL_RE.is_match(value)
}

/// Phone number: optional `+` then 8-15 digits. Empty input is accepted.
pub fn phone(value: &str) -> bool {
    value.is_empty() || PHONE_RE.is_match(value)
}

/// Strictly positive decimal price.
pub fn positive_price(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|p| p.is_finite() && p > 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_whitespace() {
        assert!(required("x"));
        assert!(!required(""));
        assert!(!required("   "));
    }

    #[test]
    fn min_len_counts_chars_not_bytes() {
        assert!(min_len("abc", 3));
        assert!(!min_len("ab", 3));
        assert!(min_len("ábć", 3));
    }

    #[test]
    fn email_accepts_empty_and_valid() {
        assert!(email(""));
        assert!(email("dealer@example.com"));
        assert!(!email("not-an-email"));
        assert!(!email("a@b"));
    }

    #[test]
    fn phone_matches_original_pattern() {
        assert!(phone(""));
        assert!(phone("+35799123456"));
        assert!(phone("99123456"));
        assert!(!phone("1234567"));
        assert!(!phone("+12 34 56 78"));
        assert!(!phone("1234567890123456"));
    }

    #[test]
    fn price_must_be_positive_number() {
        assert!(positive_price("125000.00"));
        assert!(positive_price("0.01"));
        assert!(!positive_price("0"));
        assert!(!positive_price("-5"));
        assert!(!positive_price("cheap"));
        assert!(!positive_price(""));
        // f64 parses these, but they are not real prices
        assert!(!positive_price("inf"));
        assert!(!positive_price("1e999"));
        assert!(!positive_price("NaN"));
    }
}
