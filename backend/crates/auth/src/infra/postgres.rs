//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::TeacherId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{student::Student, teacher::Teacher, teacher_session::TeacherSession};
use crate::domain::repository::{StudentRepository, TeacherRepository, TeacherSessionRepository};
use crate::domain::value_object::{RegistrationNumber, email::Email, password::PasswordHash};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Teacher Repository Implementation
// ============================================================================

impl TeacherRepository for PgAuthRepository {
    async fn create(&self, teacher: &Teacher) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO teachers (
                teacher_id,
                email,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(teacher.teacher_id.as_uuid())
        .bind(teacher.email.as_str())
        .bind(teacher.password_hash.as_phc_string())
        .bind(teacher.created_at)
        .bind(teacher.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, teacher_id: &TeacherId) -> AuthResult<Option<Teacher>> {
        let row = sqlx::query_as::<_, TeacherRow>(
            r#"
            SELECT teacher_id, email, password_hash, created_at, updated_at
            FROM teachers
            WHERE teacher_id = $1
            "#,
        )
        .bind(teacher_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_teacher()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Teacher>> {
        let row = sqlx::query_as::<_, TeacherRow>(
            r#"
            SELECT teacher_id, email, password_hash, created_at, updated_at
            FROM teachers
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_teacher()).transpose()
    }
}

// ============================================================================
// Teacher Session Repository Implementation
// ============================================================================

impl TeacherSessionRepository for PgAuthRepository {
    async fn create(&self, session: &TeacherSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO teacher_sessions (session_id, teacher_id, expires_at_ms, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.session_id)
        .bind(session.teacher_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<TeacherSession>> {
        let row = sqlx::query_as::<_, TeacherSessionRow>(
            r#"
            SELECT session_id, teacher_id, expires_at_ms, created_at
            FROM teacher_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM teacher_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM teacher_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired teacher sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Student Repository Implementation
// ============================================================================

impl StudentRepository for PgAuthRepository {
    async fn create(&self, student: &Student) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO students (reg_number, password_hash, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(student.reg_number.as_str())
        .bind(student.password_hash.as_phc_string())
        .bind(student.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::RegistrationNumberTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_reg_number(
        &self,
        reg_number: &RegistrationNumber,
    ) -> AuthResult<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT reg_number, password_hash, created_at
            FROM students
            WHERE reg_number = $1
            "#,
        )
        .bind(reg_number.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_student()).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TeacherRow {
    teacher_id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TeacherRow {
    fn into_teacher(self) -> AuthResult<Teacher> {
        Ok(Teacher {
            teacher_id: TeacherId::from_uuid(self.teacher_id),
            email: Email::from_db(self.email),
            password_hash: PasswordHash::from_phc_string(self.password_hash)
                .map_err(|e| AuthError::Internal(e.to_string()))?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TeacherSessionRow {
    session_id: Uuid,
    teacher_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl TeacherSessionRow {
    fn into_session(self) -> TeacherSession {
        TeacherSession {
            session_id: self.session_id,
            teacher_id: TeacherId::from_uuid(self.teacher_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StudentRow {
    reg_number: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl StudentRow {
    fn into_student(self) -> AuthResult<Student> {
        Ok(Student {
            reg_number: RegistrationNumber::from_db(self.reg_number),
            password_hash: PasswordHash::from_phc_string(self.password_hash)
                .map_err(|e| AuthError::Internal(e.to_string()))?,
            created_at: self.created_at,
        })
    }
}
