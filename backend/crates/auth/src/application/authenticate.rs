//! Authenticate Use Case
//!
//! Resolves a bearer credential to the teacher it belongs to.

use std::sync::Arc;

use kernel::principal::AuthenticatedTeacher;

use crate::application::config::AuthConfig;
use crate::domain::repository::{TeacherRepository, TeacherSessionRepository};
use crate::error::{AuthError, AuthResult};

/// Bearer credential check
pub struct AuthenticateUseCase<T, S>
where
    T: TeacherRepository,
    S: TeacherSessionRepository,
{
    teacher_repo: Arc<T>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<T, S> AuthenticateUseCase<T, S>
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

    /// Valid signature, existing session, not expired, teacher still exists
    pub async fn execute(&self, token: &str) -> AuthResult<AuthenticatedTeacher> {
        let session_id = platform::token::verify_session_token(token, &self.config.session_secret)?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        let teacher = self
            .teacher_repo
            .find_by_id(&session.teacher_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        Ok(AuthenticatedTeacher {
            teacher_id: teacher.teacher_id,
            email: teacher.email.into_db(),
            session_id,
        })
    }
}
