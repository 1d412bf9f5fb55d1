//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{AbsenceOutcome, AttendanceHistory, MarkOutcome};
use crate::domain::entities::{AttendanceRecord, QrSession, Subject};
use crate::domain::value_objects::{AttendanceDate, AttendanceStatus};

// ============================================================================
// Subjects
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub subject_id: Uuid,
    pub name: String,
    pub created_at_ms: i64,
}

impl From<Subject> for SubjectResponse {
    fn from(subject: Subject) -> Self {
        Self {
            subject_id: subject.subject_id.into_uuid(),
            name: subject.name.into(),
            created_at_ms: subject.created_at.timestamp_millis(),
        }
    }
}

// ============================================================================
// QR Sessions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSessionResponse {
    pub qr_id: String,
    pub subject: String,
    /// RFC 3339
    pub expires_at: DateTime<Utc>,
    pub expires_at_ms: i64,
}

impl From<QrSession> for QrSessionResponse {
    fn from(session: QrSession) -> Self {
        Self {
            qr_id: session.qr_id,
            subject: session.subject.into(),
            expires_at: session.expires_at,
            expires_at_ms: session.expires_at.timestamp_millis(),
        }
    }
}

// ============================================================================
// Ledger
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPresentRequest {
    pub reg_number: String,
    pub subject: String,
    pub qr_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAbsenceRequest {
    pub reg_number: String,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordDto {
    pub reg_number: String,
    pub subject: String,
    pub date: AttendanceDate,
    pub status: AttendanceStatus,
    pub score_change: i32,
    pub updated_at_ms: i64,
}

impl From<AttendanceRecord> for AttendanceRecordDto {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            reg_number: record.reg_number.into(),
            subject: record.subject.into(),
            date: record.date,
            status: record.status,
            score_change: record.score_change,
            updated_at_ms: record.updated_at.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    Marked,
    AlreadyMarked,
    Penalized,
    AlreadyAbsent,
    NoPenalty,
}

/// Result of a mark or an absence request; no-ops are still 200s
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeResponse {
    pub outcome: OutcomeKind,
    pub record: AttendanceRecordDto,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub replaced_absence: bool,
}

impl From<MarkOutcome> for OutcomeResponse {
    fn from(outcome: MarkOutcome) -> Self {
        match outcome {
            MarkOutcome::Marked {
                record,
                replaced_absence,
            } => Self {
                outcome: OutcomeKind::Marked,
                record: record.into(),
                replaced_absence,
            },
            MarkOutcome::AlreadyMarked { record } => Self {
                outcome: OutcomeKind::AlreadyMarked,
                record: record.into(),
                replaced_absence: false,
            },
        }
    }
}

impl From<AbsenceOutcome> for OutcomeResponse {
    fn from(outcome: AbsenceOutcome) -> Self {
        let (kind, record) = match outcome {
            AbsenceOutcome::Penalized { record } => (OutcomeKind::Penalized, record),
            AbsenceOutcome::AlreadyAbsent { record } => (OutcomeKind::AlreadyAbsent, record),
            AbsenceOutcome::NoPenalty { record } => (OutcomeKind::NoPenalty, record),
        };
        Self {
            outcome: kind,
            record: record.into(),
            replaced_absence: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub reg_number: String,
    pub total_score: i64,
    pub records: Vec<AttendanceRecordDto>,
}

impl From<AttendanceHistory> for HistoryResponse {
    fn from(history: AttendanceHistory) -> Self {
        Self {
            reg_number: history.reg_number.into(),
            total_score: history.total_score,
            records: history.records.into_iter().map(Into::into).collect(),
        }
    }
}
