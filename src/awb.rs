//! Air Waybill (AWB) number validation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Exactly ten ASCII digits.
static AWB_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid AWB regex pattern"));

/// Number of digits in an AWB number.
pub const AWB_LENGTH: usize = 10;

/// Why an input is not an AWB number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwbError {
    /// Nothing but whitespace
    Empty,
    /// Digits only, but not ten of them
    InvalidLength(usize),
    /// Contains a character other than 0-9
    NonDigit,
}

impl fmt::Display for AwbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwbError::Empty => write!(f, "AWB number is required"),
            AwbError::InvalidLength(n) => {
                write!(f, "AWB number must be {} digits (got {})", AWB_LENGTH, n)
            }
            AwbError::NonDigit => write!(f, "AWB number must contain digits only"),
        }
    }
}

impl std::error::Error for AwbError {}

/// A validated AWB number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AwbNumber(String);

impl AwbNumber {
    /// Validate `input` after trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, AwbError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AwbError::Empty);
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(AwbError::NonDigit);
        }
        if !AWB_REGEX.is_match(trimmed) {
            return Err(AwbError::InvalidLength(trimmed.chars().count()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AwbNumber {
    type Err = AwbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AwbNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AwbNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
