//! Teacher Registration Use Case
//!
//! Creates a teacher account and logs it in immediately.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::login_teacher::{TeacherSessionOutput, issue_session};
use crate::domain::entity::teacher::Teacher;
use crate::domain::repository::{TeacherRepository, TeacherSessionRepository};
use crate::domain::value_object::{
    email::Email,
    password::{PasswordHash, RawPassword},
};
use crate::error::{AuthError, AuthResult};

/// Registration input
pub struct RegisterTeacherInput {
    pub email: String,
    pub password: String,
}

/// Teacher registration use case
pub struct RegisterTeacherUseCase<T, S>
where
    T: TeacherRepository,
    S: TeacherSessionRepository,
{
    teacher_repo: Arc<T>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<T, S> RegisterTeacherUseCase<T, S>
where
    T: TeacherRepository,
    S: TeacherSessionRepository,
{
    pub fn new(teacher_repo: Arc<T>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            teacher_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterTeacherInput) -> AuthResult<TeacherSessionOutput> {
        let email = Email::new(&input.email)?;

        // Fast path; the unique index on email is authoritative
        if self.teacher_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = PasswordHash::from_raw(&raw_password, self.config.pepper())?;

        let teacher = Teacher::new(email, password_hash);
        self.teacher_repo.create(&teacher).await?;

        tracing::info!(teacher_id = %teacher.teacher_id, "Teacher registered");

        issue_session(self.session_repo.as_ref(), &self.config, &teacher).await
    }
}
