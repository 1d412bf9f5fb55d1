//! Mark Present Use Case
//!
//! A student scans a QR code. At most one record exists per
//! (student, subject, day); a scan upgrades a sweep absence to present and
//! never counts twice.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::config::AttendanceConfig;
use crate::domain::entities::AttendanceRecord;
use crate::domain::repository::{
    AttendanceRecordRepository, PresentUpsert, QrSessionRepository, StudentDirectory,
};
use crate::domain::services::validate_qr_session;
use crate::domain::value_objects::{RecordKey, RegistrationNumber, SubjectName};
use crate::error::{AttendanceError, AttendanceResult};

pub struct MarkPresentInput {
    pub reg_number: String,
    pub subject: String,
    pub qr_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// Record written as present/+1
    Marked {
        record: AttendanceRecord,
        /// An absence penalty for the day was overwritten
        replaced_absence: bool,
    },
    /// Already present today; nothing written
    AlreadyMarked { record: AttendanceRecord },
}

impl MarkOutcome {
    pub fn record(&self) -> &AttendanceRecord {
        match self {
            MarkOutcome::Marked { record, .. } | MarkOutcome::AlreadyMarked { record } => record,
        }
    }
}

pub struct MarkPresentUseCase<Q, D, L>
where
    Q: QrSessionRepository,
    D: StudentDirectory,
    L: AttendanceRecordRepository,
{
    qr_repo: Arc<Q>,
    students: Arc<D>,
    ledger: Arc<L>,
    config: Arc<AttendanceConfig>,
}

impl<Q, D, L> MarkPresentUseCase<Q, D, L>
where
    Q: QrSessionRepository,
    D: StudentDirectory,
    L: AttendanceRecordRepository,
{
    pub fn new(
        qr_repo: Arc<Q>,
        students: Arc<D>,
        ledger: Arc<L>,
        config: Arc<AttendanceConfig>,
    ) -> Self {
        Self {
            qr_repo,
            students,
            ledger,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: MarkPresentInput,
        now: DateTime<Utc>,
    ) -> AttendanceResult<MarkOutcome> {
        let reg_number = RegistrationNumber::new(&input.reg_number)?;
        let subject = SubjectName::new(&input.subject)?;
        let qr_id = input.qr_id.trim();
        if qr_id.is_empty() {
            return Err(AttendanceError::InvalidQr);
        }

        let session = self.qr_repo.find(qr_id).await?;
        validate_qr_session(session, &subject, now)?;

        if !self.students.exists(&reg_number).await? {
            return Err(AttendanceError::StudentNotFound);
        }

        let key = RecordKey::new(reg_number, subject, self.config.calendar.today(now));

        if let Some(record) = self.ledger.find(&key).await?.filter(|r| r.is_present()) {
            tracing::debug!(key = %key, "Attendance already marked");
            return Ok(MarkOutcome::AlreadyMarked { record });
        }

        let candidate = AttendanceRecord::present(key.clone(), now);

        match self.ledger.upsert_present(&candidate).await? {
            Some(PresentUpsert {
                record,
                replaced_absence,
            }) => {
                tracing::info!(
                    reg_number = %record.reg_number,
                    subject = %record.subject,
                    date = %record.date,
                    replaced_absence,
                    "Attendance marked"
                );
                Ok(MarkOutcome::Marked {
                    record,
                    replaced_absence,
                })
            }
            // A concurrent scan for the same key won
            None => {
                let record = self.ledger.find(&key).await?.ok_or_else(|| {
                    AttendanceError::Internal(format!("record {} vanished after upsert", key))
                })?;
                Ok(MarkOutcome::AlreadyMarked { record })
            }
        }
    }
}
