//! Record Absence
//!
//! `record_absence_if_missing` is the idempotent penalty shared by the
//! daily sweep and the teacher's manual decrement.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use kernel::id::TeacherId;

use crate::application::config::AttendanceConfig;
use crate::domain::entities::AttendanceRecord;
use crate::domain::repository::{AttendanceRecordRepository, StudentDirectory, SubjectRepository};
use crate::domain::value_objects::{RecordKey, RegistrationNumber, SubjectName};
use crate::error::{AttendanceError, AttendanceResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsenceOutcome {
    /// No record existed; absent/-3 written
    Penalized { record: AttendanceRecord },
    /// Already absent; nothing written
    AlreadyAbsent { record: AttendanceRecord },
    /// Student was present; nothing written
    NoPenalty { record: AttendanceRecord },
}

impl AbsenceOutcome {
    fn classify(record: AttendanceRecord) -> Self {
        if record.is_present() {
            AbsenceOutcome::NoPenalty { record }
        } else {
            AbsenceOutcome::AlreadyAbsent { record }
        }
    }

    pub fn record(&self) -> &AttendanceRecord {
        match self {
            AbsenceOutcome::Penalized { record }
            | AbsenceOutcome::AlreadyAbsent { record }
            | AbsenceOutcome::NoPenalty { record } => record,
        }
    }
}

/// Write an absence for `key` unless the key already has a record
pub async fn record_absence_if_missing<L>(
    ledger: &L,
    key: RecordKey,
    now: DateTime<Utc>,
) -> AttendanceResult<AbsenceOutcome>
where
    L: AttendanceRecordRepository,
{
    if let Some(existing) = ledger.find(&key).await? {
        return Ok(AbsenceOutcome::classify(existing));
    }

    let record = AttendanceRecord::absent(key.clone(), now);
    if ledger.insert_if_missing(&record).await? {
        tracing::debug!(key = %key, "Absence penalty recorded");
        return Ok(AbsenceOutcome::Penalized { record });
    }

    // Lost a race with a scan or another sweep; report what is there now
    let existing = ledger.find(&key).await?.ok_or_else(|| {
        AttendanceError::Internal(format!("record {} vanished after insert", key))
    })?;
    Ok(AbsenceOutcome::classify(existing))
}

pub struct RecordAbsenceInput {
    pub reg_number: String,
    pub subject: String,
}

/// Manual decrement by the teacher who owns the subject
pub struct RecordAbsenceUseCase<S, D, L>
where
    S: SubjectRepository,
    D: StudentDirectory,
    L: AttendanceRecordRepository,
{
    subject_repo: Arc<S>,
    students: Arc<D>,
    ledger: Arc<L>,
    config: Arc<AttendanceConfig>,
}

impl<S, D, L> RecordAbsenceUseCase<S, D, L>
where
    S: SubjectRepository,
    D: StudentDirectory,
    L: AttendanceRecordRepository,
{
    pub fn new(
        subject_repo: Arc<S>,
        students: Arc<D>,
        ledger: Arc<L>,
        config: Arc<AttendanceConfig>,
    ) -> Self {
        Self {
            subject_repo,
            students,
            ledger,
            config,
        }
    }

    pub async fn execute(
        &self,
        teacher_id: TeacherId,
        input: RecordAbsenceInput,
        now: DateTime<Utc>,
    ) -> AttendanceResult<AbsenceOutcome> {
        let reg_number = RegistrationNumber::new(&input.reg_number)?;
        let subject = SubjectName::new(&input.subject)?;

        self.subject_repo
            .find_by_teacher_and_name(&teacher_id, &subject)
            .await?
            .ok_or(AttendanceError::SubjectNotFound)?;

        if !self.students.exists(&reg_number).await? {
            return Err(AttendanceError::StudentNotFound);
        }

        let key = RecordKey::new(reg_number, subject, self.config.calendar.today(now));
        let outcome = record_absence_if_missing(self.ledger.as_ref(), key, now).await?;

        tracing::info!(
            teacher_id = %teacher_id,
            reg_number = %outcome.record().reg_number,
            subject = %outcome.record().subject,
            penalized = matches!(outcome, AbsenceOutcome::Penalized { .. }),
            "Manual absence requested"
        );

        Ok(outcome)
    }
}
