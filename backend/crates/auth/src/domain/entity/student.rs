//! Student Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{RegistrationNumber, password::PasswordHash};

/// Student credential record; immutable through the API
#[derive(Debug, Clone)]
pub struct Student {
    pub reg_number: RegistrationNumber,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

impl Student {
    pub fn new(reg_number: RegistrationNumber, password_hash: PasswordHash) -> Self {
        Self {
            reg_number,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
