//! Form checks run before any draft reaches a table.

use std::sync::LazyLock;

use regex::Regex;
use shared::error::ApiError;
use thiserror::Error;

/// First failing check of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        ApiError::validation(value.0)
    }
}

pub type Checked = Result<(), ValidationError>;

pub fn required(value: &str, message: &str) -> Checked {
    if value.trim().is_empty() {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

pub fn min_chars(value: &str, min: usize, message: &str) -> Checked {
    if value.trim().chars().count() < min {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("valid phone regex"));
static PHONE_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("valid phone separator regex"));

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Optional leading `+`, a non-zero digit, then at most 15 more digits.
/// Whitespace, dashes and parentheses are ignored.
pub fn is_phone(value: &str) -> bool {
    PHONE_RE.is_match(&PHONE_NOISE_RE.replace_all(value, ""))
}

/// Rejects line breaks and other control characters.
pub fn single_line(value: &str, message: &str) -> Checked {
    if value.chars().any(char::is_control) {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

pub fn email(value: &str) -> Checked {
    if value.is_empty() {
        return Err(ValidationError::new("Email is required"));
    }
    if !is_email(value) {
        return Err(ValidationError::new("Please enter a valid email address"));
    }
    Ok(())
}

pub fn phone(value: &str) -> Checked {
    if value.is_empty() {
        return Err(ValidationError::new("Phone is required"));
    }
    if !is_phone(value) {
        return Err(ValidationError::new("Please enter a valid phone number"));
    }
    Ok(())
}

pub fn positive(value: f64, message: &str) -> Checked {
    if !(value.is_finite() && value > 0.0) {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

pub fn non_negative(value: i64, message: &str) -> Checked {
    if value < 0 {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
