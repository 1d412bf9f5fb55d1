//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in `infra`.
//! Uniqueness (teacher email, student registration number) is enforced by
//! the store; `create` reports a duplicate as the matching `AuthError`.

use kernel::id::TeacherId;
use uuid::Uuid;

use crate::domain::entity::{student::Student, teacher::Teacher, teacher_session::TeacherSession};
use crate::domain::value_object::{RegistrationNumber, email::Email};
use crate::error::AuthResult;

/// Teacher repository trait
#[trait_variant::make(TeacherRepository: Send)]
pub trait LocalTeacherRepository {
    /// Insert a teacher; `AuthError::EmailTaken` on duplicate email
    async fn create(&self, teacher: &Teacher) -> AuthResult<()>;

    async fn find_by_id(&self, teacher_id: &TeacherId) -> AuthResult<Option<Teacher>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Teacher>>;
}

/// Teacher session repository trait
#[trait_variant::make(TeacherSessionRepository: Send)]
pub trait LocalTeacherSessionRepository {
    async fn create(&self, session: &TeacherSession) -> AuthResult<()>;

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<TeacherSession>>;

    /// Delete exactly one session; returns whether it existed
    async fn delete(&self, session_id: Uuid) -> AuthResult<bool>;

    /// Delete sessions that expired before `now_ms`
    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64>;
}

/// Student repository trait
#[trait_variant::make(StudentRepository: Send)]
pub trait LocalStudentRepository {
    /// Insert a student; `AuthError::RegistrationNumberTaken` on duplicate
    async fn create(&self, student: &Student) -> AuthResult<()>;

    async fn find_by_reg_number(&self, reg_number: &RegistrationNumber)
    -> AuthResult<Option<Student>>;
}
