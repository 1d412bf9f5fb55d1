//! Teacher Session Entity
//!
//! One element of a teacher's set of active credentials. The bearer token
//! handed to clients is the signed `session_id`.

use chrono::{DateTime, Duration, Utc};
use kernel::id::TeacherId;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TeacherSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    pub teacher_id: TeacherId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl TeacherSession {
    /// TTL is provided by the application layer (config).
    pub fn new(teacher_id: TeacherId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            teacher_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    /// Valid up to and including `expires_at_ms`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let session = TeacherSession::new(TeacherId::new(), Duration::minutes(10));

        assert!(!session.is_expired());
        assert!(!session.is_expired_at(session.expires_at_ms));
        assert!(session.is_expired_at(session.expires_at_ms + 1));
    }

    #[test]
    fn test_sessions_are_distinct() {
        let teacher_id = TeacherId::new();
        let a = TeacherSession::new(teacher_id, Duration::days(7));
        let b = TeacherSession::new(teacher_id, Duration::days(7));
        assert_ne!(a.session_id, b.session_id);
    }
}
