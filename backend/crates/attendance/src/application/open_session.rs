//! Open QR Session Use Case

use chrono::{DateTime, Utc};
use std::sync::Arc;

use kernel::id::TeacherId;

use crate::application::config::AttendanceConfig;
use crate::domain::entities::QrSession;
use crate::domain::repository::{QrSessionRepository, SubjectRepository};
use crate::domain::services::generate_qr_id;
use crate::domain::value_objects::SubjectName;
use crate::error::{AttendanceError, AttendanceResult};

/// Open a time-boxed QR session for one of the teacher's subjects
pub struct OpenQrSessionUseCase<S, Q>
where
    S: SubjectRepository,
    Q: QrSessionRepository,
{
    subject_repo: Arc<S>,
    qr_repo: Arc<Q>,
    config: Arc<AttendanceConfig>,
}

impl<S, Q> OpenQrSessionUseCase<S, Q>
where
    S: SubjectRepository,
    Q: QrSessionRepository,
{
    pub fn new(subject_repo: Arc<S>, qr_repo: Arc<Q>, config: Arc<AttendanceConfig>) -> Self {
        Self {
            subject_repo,
            qr_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        teacher_id: TeacherId,
        subject: &str,
        now: DateTime<Utc>,
    ) -> AttendanceResult<QrSession> {
        let subject = SubjectName::new(subject)?;

        // Only the owner may open sessions for a subject
        self.subject_repo
            .find_by_teacher_and_name(&teacher_id, &subject)
            .await?
            .ok_or(AttendanceError::SubjectNotFound)?;

        let expires_at = self.config.qr_expires_at(now).ok_or_else(|| {
            AttendanceError::Internal(format!(
                "QR lifetime of {}s overflows the clock",
                self.config.qr_ttl.as_secs()
            ))
        })?;

        let session = QrSession {
            qr_id: generate_qr_id(&subject, now),
            subject,
            teacher_id,
            created_at: now,
            expires_at,
        };
        self.qr_repo.create(&session).await?;

        tracing::info!(
            teacher_id = %teacher_id,
            subject = %session.subject,
            qr_id = %session.qr_id,
            expires_at = %session.expires_at,
            "QR session opened"
        );

        Ok(session)
    }
}
