//! Input validators for the free-text capture states
//!
//! Only the digit count of a code matters: every non-digit character is
//! discarded before measuring, so "Mi NIP es 98 76" is the code 9876.

pub const NIP_LENGTH: usize = 4;
pub const PHONE_LENGTH: usize = 10;
pub const IMEI_LENGTH: usize = 15;

/// Outcome of checking a fixed-length numeric code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigitCode {
    Valid(String),
    WrongLength { digits: String, actual: usize },
    NoDigits,
}

/// Keep the ASCII digits of `text` and check there are exactly `length` of them
pub fn validate_fixed_digit_code(text: &str, length: usize) -> DigitCode {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        0 => DigitCode::NoDigits,
        n if n == length => DigitCode::Valid(digits),
        actual => DigitCode::WrongLength { digits, actual },
    }
}

/// Outcome of checking a full name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameCheck {
    Valid(String),
    Empty,
    NumericOnly,
    NoLetters,
}

pub fn validate_name(text: &str) -> NameCheck {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NameCheck::Empty
    } else if trimmed.chars().all(char::is_numeric) {
        NameCheck::NumericOnly
    } else if !trimmed.chars().any(char::is_alphabetic) {
        NameCheck::NoLetters
    } else {
        NameCheck::Valid(trimmed.to_string())
    }
}

/// Email is stored as typed: trimmed, never format-checked.
pub fn accept_email(text: &str) -> String {
    text.trim().to_string()
}

/// First whitespace-separated word of a validated name
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(full_name)
}
