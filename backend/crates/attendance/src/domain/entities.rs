//! Domain Entities
//!
//! Core business entities for the attendance domain.

use chrono::{DateTime, Utc};
use kernel::id::{SubjectId, TeacherId};

use crate::domain::value_objects::{
    AttendanceDate, AttendanceStatus, RecordKey, RegistrationNumber, SubjectName,
};

/// Subject owned by a teacher; names are unique per teacher only
#[derive(Debug, Clone)]
pub struct Subject {
    pub subject_id: SubjectId,
    pub name: SubjectName,
    pub teacher_id: TeacherId,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(name: SubjectName, teacher_id: TeacherId) -> Self {
        Self {
            subject_id: SubjectId::new(),
            name,
            teacher_id,
            created_at: Utc::now(),
        }
    }
}

/// QR session - a short-lived token a teacher displays in class
///
/// Read-only after creation and never deleted; it simply stops being
/// valid once `now > expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSession {
    pub qr_id: String,
    pub subject: SubjectName,
    pub teacher_id: TeacherId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl QrSession {
    /// Valid up to and including `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// One row of the attendance ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub reg_number: RegistrationNumber,
    pub subject: SubjectName,
    pub date: AttendanceDate,
    pub status: AttendanceStatus,
    pub score_change: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn new(key: RecordKey, status: AttendanceStatus, now: DateTime<Utc>) -> Self {
        Self {
            reg_number: key.reg_number,
            subject: key.subject,
            date: key.date,
            status,
            score_change: status.score_change(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn present(key: RecordKey, now: DateTime<Utc>) -> Self {
        Self::new(key, AttendanceStatus::Present, now)
    }

    pub fn absent(key: RecordKey, now: DateTime<Utc>) -> Self {
        Self::new(key, AttendanceStatus::Absent, now)
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.reg_number.clone(), self.subject.clone(), self.date)
    }

    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}
