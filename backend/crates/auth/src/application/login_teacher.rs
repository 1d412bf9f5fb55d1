//! Teacher Login Use Case
//!
//! Verifies a teacher's password and issues a fresh bearer credential.

use std::sync::Arc;

use kernel::id::TeacherId;

use crate::application::config::AuthConfig;
use crate::domain::entity::{teacher::Teacher, teacher_session::TeacherSession};
use crate::domain::repository::{TeacherRepository, TeacherSessionRepository};
use crate::domain::value_object::{email::Email, password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginTeacherInput {
    pub email: String,
    pub password: String,
}

/// Credential issued on registration or login
#[derive(Debug, Clone)]
pub struct TeacherSessionOutput {
    pub teacher_id: TeacherId,
    pub email: String,
    /// Bearer credential `"<session_id>.<signature>"`
    pub token: String,
    pub expires_at_ms: i64,
}

/// Teacher login use case
pub struct LoginTeacherUseCase<T, S>
where
    T: TeacherRepository,
    S: TeacherSessionRepository,
{
    teacher_repo: Arc<T>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<T, S> LoginTeacherUseCase<T, S>
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

    pub async fn execute(&self, input: LoginTeacherInput) -> AuthResult<TeacherSessionOutput> {
        // Malformed and unknown emails fail the same way as a wrong password
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let teacher = self
            .teacher_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = RawPassword::for_login(input.password);
        if !teacher.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let output = issue_session(self.session_repo.as_ref(), &self.config, &teacher).await?;

        tracing::info!(teacher_id = %teacher.teacher_id, "Teacher logged in");

        Ok(output)
    }
}

/// Create and persist a new session for `teacher`, returning its signed token
pub(crate) async fn issue_session<S>(
    session_repo: &S,
    config: &AuthConfig,
    teacher: &Teacher,
) -> AuthResult<TeacherSessionOutput>
where
    S: TeacherSessionRepository,
{
    let session = TeacherSession::new(teacher.teacher_id, config.session_ttl_chrono());
    session_repo.create(&session).await?;

    let token = platform::token::sign_session_token(&session.session_id, &config.session_secret);

    tracing::debug!(
        teacher_id = %teacher.teacher_id,
        session_id = %session.session_id,
        "Issued teacher credential"
    );

    Ok(TeacherSessionOutput {
        teacher_id: teacher.teacher_id,
        email: teacher.email.to_string(),
        token,
        expires_at_ms: session.expires_at_ms,
    })
}
