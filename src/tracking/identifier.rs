//! Validated AWB (air waybill) numbers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::error::TrackingError;
use super::utils::compile_static_regex;

static AWB_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"^[A-Z0-9-]{6,25}$"));

/// Trims and upper-cases raw user input without validating it.
#[must_use]
pub fn normalize_awb(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// An AWB number that passed the shape check.
///
/// Always upper-case, 6 to 25 characters from `A-Z`, `0-9` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AwbNumber(String);

impl AwbNumber {
    /// Normalizes and validates raw input.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::InvalidIdentifier`] when the normalized input
    /// does not match `[A-Z0-9-]{6,25}`.
    pub fn parse(raw: &str) -> Result<Self, TrackingError> {
        let cleaned = normalize_awb(raw);
        if AWB_RE.is_match(&cleaned) {
            Ok(Self(cleaned))
        } else {
            Err(TrackingError::invalid_identifier(&cleaned))
        }
    }

    /// Returns the normalized AWB string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tracking::FailureKind;

    #[test]
    fn test_parse_accepts_alphanumeric() {
        let awb = AwbNumber::parse("AB12345").unwrap();
        assert_eq!(awb.as_str(), "AB12345");
    }

    #[test]
    fn test_parse_trims_and_uppercases() {
        let awb = AwbNumber::parse("  ab-12345\n").unwrap();
        assert_eq!(awb.as_str(), "AB-12345");
        assert_eq!(awb.to_string(), "AB-12345");
    }

    #[test]
    fn test_parse_rejects_short_and_symbolic_input() {
        let err = AwbNumber::parse("ab!@").unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidIdentifier);
        assert!(err.to_string().contains("AB!@"));
    }

    #[test]
    fn test_parse_length_bounds() {
        assert!(AwbNumber::parse("12345").is_err());
        assert!(AwbNumber::parse("123456").is_ok());
        assert!(AwbNumber::parse(&"9".repeat(25)).is_ok());
        assert!(AwbNumber::parse(&"9".repeat(26)).is_err());
    }

    #[test]
    fn test_parse_rejects_inner_whitespace() {
        assert!(AwbNumber::parse("1234 5678").is_err());
        assert!(AwbNumber::parse("").is_err());
    }
}
