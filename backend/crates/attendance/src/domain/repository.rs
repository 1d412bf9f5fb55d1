//! Repository Traits
//!
//! Persistence interfaces for the attendance domain. The store is the
//! authority on uniqueness: one subject name per teacher, one QR session
//! per `qr_id`, one attendance record per (student, subject, date).

use kernel::id::TeacherId;

use crate::domain::entities::{AttendanceRecord, QrSession, Subject};
use crate::domain::value_objects::{RecordKey, RegistrationNumber, SubjectName};
use crate::error::AttendanceResult;

/// Subject repository trait
#[trait_variant::make(SubjectRepository: Send)]
pub trait LocalSubjectRepository {
    /// Insert a subject; `AttendanceError::SubjectExists` if the teacher
    /// already has one with that name
    async fn create(&self, subject: &Subject) -> AttendanceResult<()>;

    /// A teacher's subjects, oldest first
    async fn list_by_teacher(&self, teacher_id: &TeacherId) -> AttendanceResult<Vec<Subject>>;

    async fn find_by_teacher_and_name(
        &self,
        teacher_id: &TeacherId,
        name: &SubjectName,
    ) -> AttendanceResult<Option<Subject>>;

    /// Every distinct subject name across all teachers, sorted
    async fn list_distinct_names(&self) -> AttendanceResult<Vec<SubjectName>>;
}

/// QR session repository trait
#[trait_variant::make(QrSessionRepository: Send)]
pub trait LocalQrSessionRepository {
    async fn create(&self, session: &QrSession) -> AttendanceResult<()>;

    async fn find(&self, qr_id: &str) -> AttendanceResult<Option<QrSession>>;
}

/// A present record written by `upsert_present`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentUpsert {
    pub record: AttendanceRecord,
    /// The write upgraded an existing absence instead of inserting a new row
    pub replaced_absence: bool,
}

/// Attendance ledger repository trait
#[trait_variant::make(AttendanceRecordRepository: Send)]
pub trait LocalAttendanceRecordRepository {
    async fn find(&self, key: &RecordKey) -> AttendanceResult<Option<AttendanceRecord>>;

    /// Atomically insert `record` as present, or upgrade an existing absent
    /// record for the same key to present (replacing its score, not adding).
    ///
    /// Returns `None` when the key is already present; nothing is written.
    /// Whether an absence was replaced is decided by the same write.
    async fn upsert_present(
        &self,
        record: &AttendanceRecord,
    ) -> AttendanceResult<Option<PresentUpsert>>;

    /// Insert `record` only if its key has no record yet; returns whether
    /// a row was written
    async fn insert_if_missing(&self, record: &AttendanceRecord) -> AttendanceResult<bool>;

    /// All records of a student, date descending then subject ascending
    async fn list_by_student(
        &self,
        reg_number: &RegistrationNumber,
    ) -> AttendanceResult<Vec<AttendanceRecord>>;
}

/// Read-only view of the registered students
#[trait_variant::make(StudentDirectory: Send)]
pub trait LocalStudentDirectory {
    async fn exists(&self, reg_number: &RegistrationNumber) -> AttendanceResult<bool>;

    /// Every registered student, sorted
    async fn list_registration_numbers(&self) -> AttendanceResult<Vec<RegistrationNumber>>;
}
