//! Phone Number Value Object
//!
//! Optional secondary contact. Not unique; stored in a compact form
//! (`+` and digits only).

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Minimum number of digits (short national numbers)
const PHONE_MIN_DIGITS: usize = 4;

/// Maximum number of digits (ITU-T E.164)
const PHONE_MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse user input, ignoring spaces, dashes, dots and parentheses
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let raw = raw.as_ref().trim();

        let (plus, rest) = match raw.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", raw),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(AppError::bad_request("Phone number contains invalid characters")),
            }
        }

        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
            return Err(AppError::bad_request(format!(
                "Phone number must have between {} and {} digits",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            )));
        }

        Ok(Self(format!("{plus}{digits}")))
    }

    /// Blank input means "no phone number"
    pub fn parse_optional(raw: Option<String>) -> AppResult<Option<Self>> {
        match raw {
            Some(s) if !s.trim().is_empty() => Self::new(s).map(Some),
            _ => Ok(None),
        }
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        assert_eq!(PhoneNumber::new("+1234567890").unwrap().as_str(), "+1234567890");
        assert_eq!(
            PhoneNumber::new("+1 (234) 567-890").unwrap().as_str(),
            "+1234567890"
        );
        assert_eq!(PhoneNumber::new("0312345678").unwrap().to_string(), "0312345678");
    }

    #[test]
    fn test_phone_invalid() {
        assert!(PhoneNumber::new("+12").is_err());
        assert!(PhoneNumber::new("12345678901234567").is_err());
        assert!(PhoneNumber::new("+1-800-FLOWERS").is_err());
        assert!(PhoneNumber::new("++1234567").is_err());
    }

    #[test]
    fn test_phone_optional() {
        assert!(PhoneNumber::parse_optional(None).unwrap().is_none());
        assert!(PhoneNumber::parse_optional(Some("  ".into())).unwrap().is_none());
        assert!(PhoneNumber::parse_optional(Some("+1234567890".into())).unwrap().is_some());
        assert!(PhoneNumber::parse_optional(Some("nope".into())).is_err());
    }
}
