//! In-Memory Repository
//!
//! Backs the use-case and router tests. Keys mirror the unique indexes of
//! the SQL schema so duplicate handling behaves the same.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use kernel::id::TeacherId;
use uuid::Uuid;

use crate::domain::entity::{student::Student, teacher::Teacher, teacher_session::TeacherSession};
use crate::domain::repository::{StudentRepository, TeacherRepository, TeacherSessionRepository};
use crate::domain::value_object::{RegistrationNumber, email::Email};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    teachers: HashMap<TeacherId, Teacher>,
    /// email -> teacher_id (unique index)
    emails: HashMap<String, TeacherId>,
    sessions: HashMap<Uuid, TeacherSession>,
    students: HashMap<String, Student>,
}

/// Shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AuthError::Internal("in-memory store poisoned".to_string()))
    }

    /// Number of live sessions (any teacher)
    pub fn session_count(&self) -> usize {
        self.state.lock().map(|s| s.sessions.len()).unwrap_or(0)
    }
}

impl TeacherRepository for InMemoryAuthRepository {
    async fn create(&self, teacher: &Teacher) -> AuthResult<()> {
        let mut state = self.lock()?;
        if state.emails.contains_key(teacher.email.as_str()) {
            return Err(AuthError::EmailTaken);
        }
        state
            .emails
            .insert(teacher.email.as_str().to_owned(), teacher.teacher_id);
        state.teachers.insert(teacher.teacher_id, teacher.clone());
        Ok(())
    }

    async fn find_by_id(&self, teacher_id: &TeacherId) -> AuthResult<Option<Teacher>> {
        Ok(self.lock()?.teachers.get(teacher_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Teacher>> {
        let state = self.lock()?;
        Ok(state
            .emails
            .get(email.as_str())
            .and_then(|id| state.teachers.get(id))
            .cloned())
    }
}

impl TeacherSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &TeacherSession) -> AuthResult<()> {
        self.lock()?
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<TeacherSession>> {
        Ok(self.lock()?.sessions.get(&session_id).cloned())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<bool> {
        Ok(self.lock()?.sessions.remove(&session_id).is_some())
    }

    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64> {
        let mut state = self.lock()?;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - state.sessions.len()) as u64)
    }
}

impl StudentRepository for InMemoryAuthRepository {
    async fn create(&self, student: &Student) -> AuthResult<()> {
        let mut state = self.lock()?;
        let key = student.reg_number.as_str().to_owned();
        if state.students.contains_key(&key) {
            return Err(AuthError::RegistrationNumberTaken);
        }
        state.students.insert(key, student.clone());
        Ok(())
    }

    async fn find_by_reg_number(
        &self,
        reg_number: &RegistrationNumber,
    ) -> AuthResult<Option<Student>> {
        Ok(self.lock()?.students.get(reg_number.as_str()).cloned())
    }
}
