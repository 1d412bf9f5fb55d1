//! Password Value Objects
//!
//! Domain wrappers over `platform::password` that translate policy and
//! hashing failures into user-facing `AppError`s.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

/// Password as typed by a teacher or student
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new password against the password policy (registration)
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                min, actual
            ))
            .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt; no policy is applied so old passwords keep working
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password hash (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(HashedPassword);

impl PasswordHash {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.0.hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing")
            }
        })?;

        Ok(Self(hashed))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in database"))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;
    use platform::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

    #[test]
    fn test_raw_password_policy() {
        assert!(RawPassword::new("attendance-pass".to_string()).is_ok());

        let short = RawPassword::new("a".repeat(MIN_PASSWORD_LENGTH - 1)).unwrap_err();
        assert_eq!(short.kind(), ErrorKind::BadRequest);
        assert!(short.action().is_some());

        assert!(RawPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
        assert!(RawPassword::new("        ".to_string()).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("attendance-pass".to_string()).unwrap();
        let hashed = PasswordHash::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&RawPassword::for_login("attendance-pass".into()), None));
        assert!(!hashed.verify(&RawPassword::for_login("wrong-pass".into()), None));
        assert!(!hashed.verify(&RawPassword::for_login("x".into()), None));
    }

    #[test]
    fn test_phc_round_trip_through_storage() {
        let raw = RawPassword::new("attendance-pass".to_string()).unwrap();
        let hashed = PasswordHash::from_raw(&raw, Some(b"pepper")).unwrap();
        let loaded = PasswordHash::from_phc_string(hashed.as_phc_string()).unwrap();

        assert!(loaded.verify(&raw, Some(b"pepper")));
        assert!(!loaded.verify(&raw, None));
        assert!(PasswordHash::from_phc_string("not-a-hash").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let raw = RawPassword::new("attendance-pass".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("attendance"));
    }
}
