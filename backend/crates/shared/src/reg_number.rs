//! Registration Number Value Object
//!
//! A student's registration number (e.g. `21CS01`). It is the student's
//! identity in the identity store and the first component of every
//! attendance key, so both must normalize it identically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::app_error::{AppError, AppResult};

const REG_NUMBER_MAX_LENGTH: usize = 32;

/// Trimmed, upper-cased registration number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    /// Validate and normalize user input
    ///
    /// Allowed characters: ASCII letters, digits, `-`, `_` and `/`.
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let value = raw.as_ref().trim().to_ascii_uppercase();

        if value.is_empty() {
            return Err(AppError::bad_request("Registration number cannot be empty"));
        }

        if value.len() > REG_NUMBER_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Registration number must be at most {} characters",
                REG_NUMBER_MAX_LENGTH
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
        {
            return Err(AppError::bad_request(
                "Registration number may only contain letters, digits, '-', '_' and '/'",
            ));
        }

        Ok(Self(value))
    }

    /// Wrap a value read back from the database (already normalized)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RegistrationNumber {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for RegistrationNumber {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<RegistrationNumber> for String {
    fn from(value: RegistrationNumber) -> Self {
        value.0
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegistrationNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let reg = RegistrationNumber::new("  21cs01 ").unwrap();
        assert_eq!(reg.as_str(), "21CS01");
        assert_eq!(reg, RegistrationNumber::new("21CS01").unwrap());
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(RegistrationNumber::new("").is_err());
        assert!(RegistrationNumber::new("   ").is_err());
        assert!(RegistrationNumber::new("21 CS 01").is_err());
        assert!(RegistrationNumber::new("x".repeat(REG_NUMBER_MAX_LENGTH + 1)).is_err());
        assert!(RegistrationNumber::new("2021/CS-01_a").is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let reg: RegistrationNumber = serde_json::from_str(r#""21cs01""#).unwrap();
        assert_eq!(reg.as_str(), "21CS01");
        assert!(serde_json::from_str::<RegistrationNumber>(r#""""#).is_err());
        assert_eq!(serde_json::to_string(&reg).unwrap(), r#""21CS01""#);
    }
}
