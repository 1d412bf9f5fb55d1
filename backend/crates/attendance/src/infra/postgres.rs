//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{SubjectId, TeacherId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{AttendanceRecord, QrSession, Subject};
use crate::domain::repository::{
    AttendanceRecordRepository, PresentUpsert, QrSessionRepository, StudentDirectory,
    SubjectRepository,
};
use crate::domain::value_objects::{
    AttendanceDate, AttendanceStatus, RecordKey, RegistrationNumber, SubjectName,
};
use crate::error::{AttendanceError, AttendanceResult};

/// PostgreSQL-backed attendance repository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Subject Repository Implementation
// ============================================================================

impl SubjectRepository for PgAttendanceRepository {
    async fn create(&self, subject: &Subject) -> AttendanceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO subjects (subject_id, teacher_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(subject.subject_id.as_uuid())
        .bind(subject.teacher_id.as_uuid())
        .bind(subject.name.as_str())
        .bind(subject.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AttendanceError::SubjectExists
            } else {
                AttendanceError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn list_by_teacher(&self, teacher_id: &TeacherId) -> AttendanceResult<Vec<Subject>> {
        let rows = sqlx::query_as::<_, SubjectRow>(
            r#"
            SELECT subject_id, teacher_id, name, created_at
            FROM subjects
            WHERE teacher_id = $1
            ORDER BY created_at ASC, name ASC
            "#,
        )
        .bind(teacher_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubjectRow::into_subject).collect())
    }

    async fn find_by_teacher_and_name(
        &self,
        teacher_id: &TeacherId,
        name: &SubjectName,
    ) -> AttendanceResult<Option<Subject>> {
        let row = sqlx::query_as::<_, SubjectRow>(
            r#"
            SELECT subject_id, teacher_id, name, created_at
            FROM subjects
            WHERE teacher_id = $1 AND name = $2
            "#,
        )
        .bind(teacher_id.as_uuid())
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SubjectRow::into_subject))
    }

    async fn list_distinct_names(&self) -> AttendanceResult<Vec<SubjectName>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT name FROM subjects ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(names.into_iter().map(SubjectName::from_db).collect())
    }
}

// ============================================================================
// QR Session Repository Implementation
// ============================================================================

impl QrSessionRepository for PgAttendanceRepository {
    async fn create(&self, session: &QrSession) -> AttendanceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO qr_sessions (qr_id, subject_name, teacher_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&session.qr_id)
        .bind(session.subject.as_str())
        .bind(session.teacher_id.as_uuid())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, qr_id: &str) -> AttendanceResult<Option<QrSession>> {
        let row = sqlx::query_as::<_, QrSessionRow>(
            r#"
            SELECT qr_id, subject_name, teacher_id, created_at, expires_at
            FROM qr_sessions
            WHERE qr_id = $1
            "#,
        )
        .bind(qr_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(QrSessionRow::into_session))
    }
}

// ============================================================================
// Attendance Record Repository Implementation
// ============================================================================

impl AttendanceRecordRepository for PgAttendanceRepository {
    async fn find(&self, key: &RecordKey) -> AttendanceResult<Option<AttendanceRecord>> {
        let row = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT reg_number, subject_name, attendance_date, status, score_change,
                   created_at, updated_at
            FROM attendance_records
            WHERE reg_number = $1 AND subject_name = $2 AND attendance_date = $3
            "#,
        )
        .bind(key.reg_number.as_str())
        .bind(key.subject.as_str())
        .bind(key.date.as_naive())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AttendanceRow::into_record).transpose()
    }

    async fn upsert_present(
        &self,
        record: &AttendanceRecord,
    ) -> AttendanceResult<Option<PresentUpsert>> {
        // Single statement: the unique key decides, an existing present row
        // is left untouched and nothing is returned. `xmax` is non-zero only
        // for a row version produced by the UPDATE arm.
        let row = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO attendance_records (
                reg_number,
                subject_name,
                attendance_date,
                status,
                score_change,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (reg_number, subject_name, attendance_date) DO UPDATE
            SET status = EXCLUDED.status,
                score_change = EXCLUDED.score_change,
                updated_at = EXCLUDED.updated_at
            WHERE attendance_records.status <> EXCLUDED.status
            RETURNING reg_number, subject_name, attendance_date, status, score_change,
                      created_at, updated_at, NOT (xmax = 0) AS replaced_absence
            "#,
        )
        .bind(record.reg_number.as_str())
        .bind(record.subject.as_str())
        .bind(record.date.as_naive())
        .bind(AttendanceStatus::Present.as_str())
        .bind(AttendanceStatus::Present.score_change())
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(PresentUpsert {
                record: row.record.into_record()?,
                replaced_absence: row.replaced_absence,
            })
        })
        .transpose()
    }

    async fn insert_if_missing(&self, record: &AttendanceRecord) -> AttendanceResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO attendance_records (
                reg_number,
                subject_name,
                attendance_date,
                status,
                score_change,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (reg_number, subject_name, attendance_date) DO NOTHING
            "#,
        )
        .bind(record.reg_number.as_str())
        .bind(record.subject.as_str())
        .bind(record.date.as_naive())
        .bind(record.status.as_str())
        .bind(record.score_change)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    async fn list_by_student(
        &self,
        reg_number: &RegistrationNumber,
    ) -> AttendanceResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT reg_number, subject_name, attendance_date, status, score_change,
                   created_at, updated_at
            FROM attendance_records
            WHERE reg_number = $1
            ORDER BY attendance_date DESC, subject_name ASC
            "#,
        )
        .bind(reg_number.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRow::into_record).collect()
    }
}

// ============================================================================
// Student Directory Implementation
// ============================================================================

impl StudentDirectory for PgAttendanceRepository {
    async fn exists(&self, reg_number: &RegistrationNumber) -> AttendanceResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE reg_number = $1)")
                .bind(reg_number.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list_registration_numbers(&self) -> AttendanceResult<Vec<RegistrationNumber>> {
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT reg_number FROM students ORDER BY reg_number")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(RegistrationNumber::from_db).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct SubjectRow {
    subject_id: Uuid,
    teacher_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl SubjectRow {
    fn into_subject(self) -> Subject {
        Subject {
            subject_id: SubjectId::from_uuid(self.subject_id),
            name: SubjectName::from_db(self.name),
            teacher_id: TeacherId::from_uuid(self.teacher_id),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QrSessionRow {
    qr_id: String,
    subject_name: String,
    teacher_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl QrSessionRow {
    fn into_session(self) -> QrSession {
        QrSession {
            qr_id: self.qr_id,
            subject: SubjectName::from_db(self.subject_name),
            teacher_id: TeacherId::from_uuid(self.teacher_id),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    reg_number: String,
    subject_name: String,
    attendance_date: NaiveDate,
    status: String,
    score_change: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    record: AttendanceRow,
    replaced_absence: bool,
}

impl AttendanceRow {
    fn into_record(self) -> AttendanceResult<AttendanceRecord> {
        let status = AttendanceStatus::from_db(&self.status).ok_or_else(|| {
            AttendanceError::Internal(format!("Invalid attendance status: {}", self.status))
        })?;

        Ok(AttendanceRecord {
            reg_number: RegistrationNumber::from_db(self.reg_number),
            subject: SubjectName::from_db(self.subject_name),
            date: AttendanceDate::new(self.attendance_date),
            status,
            score_change: self.score_change,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
