//! Teacher Entity

use chrono::{DateTime, Utc};
use kernel::id::TeacherId;

use crate::domain::value_object::{email::Email, password::PasswordHash};

/// Teacher account
///
/// Never deleted through the API. Active credentials live in
/// `TeacherSession` rows pointing back at `teacher_id`.
#[derive(Debug, Clone)]
pub struct Teacher {
    pub teacher_id: TeacherId,
    /// Lower-cased, unique
    pub email: Email,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub fn new(email: Email, password_hash: PasswordHash) -> Self {
        let now = Utc::now();

        Self {
            teacher_id: TeacherId::new(),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
