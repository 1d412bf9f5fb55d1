//! Teacher Logout Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repository::TeacherSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Deletes exactly the presented credential; the teacher's other
/// sessions stay valid.
pub struct LogoutTeacherUseCase<S>
where
    S: TeacherSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> LogoutTeacherUseCase<S>
where
    S: TeacherSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, session_id: Uuid) -> AuthResult<()> {
        if !self.session_repo.delete(session_id).await? {
            return Err(AuthError::SessionInvalid);
        }

        tracing::info!(session_id = %session_id, "Teacher logged out");

        Ok(())
    }
}
