//! HTTP Handlers
//!
//! Teacher-only handlers read the `AuthenticatedTeacher` that the auth
//! middleware put in the request extensions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use kernel::principal::AuthenticatedTeacher;
use std::sync::Arc;

use crate::application::config::AttendanceConfig;
use crate::application::{
    CreateSubjectUseCase, HistoryUseCase, ListSubjectsUseCase, MarkPresentInput,
    MarkPresentUseCase, OpenQrSessionUseCase, RecordAbsenceInput, RecordAbsenceUseCase,
};
use crate::domain::repository::{
    AttendanceRecordRepository, QrSessionRepository, StudentDirectory, SubjectRepository,
};
use crate::error::AttendanceResult;
use crate::presentation::dto::{
    CreateSubjectRequest, HistoryResponse, MarkPresentRequest, OpenSessionRequest,
    OutcomeResponse, QrSessionResponse, RecordAbsenceRequest, SubjectResponse,
};

/// Everything the attendance handlers need from a store
pub trait AttendanceRepositories:
    SubjectRepository
    + QrSessionRepository
    + AttendanceRecordRepository
    + StudentDirectory
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<R> AttendanceRepositories for R where
    R: SubjectRepository
        + QrSessionRepository
        + AttendanceRecordRepository
        + StudentDirectory
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for attendance handlers
#[derive(Clone)]
pub struct AttendanceAppState<R>
where
    R: AttendanceRepositories,
{
    pub repo: Arc<R>,
    pub config: Arc<AttendanceConfig>,
}

impl<R> AttendanceAppState<R>
where
    R: AttendanceRepositories,
{
    pub fn new(repo: R, config: AttendanceConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Subjects (teacher)
// ============================================================================

/// GET /subjects
pub async fn list_subjects<R>(
    State(state): State<AttendanceAppState<R>>,
    Extension(teacher): Extension<AuthenticatedTeacher>,
) -> AttendanceResult<Json<Vec<SubjectResponse>>>
where
    R: AttendanceRepositories,
{
    let subjects = ListSubjectsUseCase::new(state.repo.clone())
        .execute(teacher.teacher_id)
        .await?;

    Ok(Json(subjects.into_iter().map(Into::into).collect()))
}

/// POST /subjects
pub async fn create_subject<R>(
    State(state): State<AttendanceAppState<R>>,
    Extension(teacher): Extension<AuthenticatedTeacher>,
    Json(req): Json<CreateSubjectRequest>,
) -> AttendanceResult<(StatusCode, Json<SubjectResponse>)>
where
    R: AttendanceRepositories,
{
    let subject = CreateSubjectUseCase::new(state.repo.clone())
        .execute(teacher.teacher_id, &req.name)
        .await?;

    Ok((StatusCode::CREATED, Json(subject.into())))
}

// ============================================================================
// QR Sessions (teacher)
// ============================================================================

/// POST /attendance/session
pub async fn open_session<R>(
    State(state): State<AttendanceAppState<R>>,
    Extension(teacher): Extension<AuthenticatedTeacher>,
    Json(req): Json<OpenSessionRequest>,
) -> AttendanceResult<(StatusCode, Json<QrSessionResponse>)>
where
    R: AttendanceRepositories,
{
    let session =
        OpenQrSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
            .execute(teacher.teacher_id, &req.subject, Utc::now())
            .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

// ============================================================================
// Ledger
// ============================================================================

/// POST /attendance/mark
pub async fn mark_present<R>(
    State(state): State<AttendanceAppState<R>>,
    Json(req): Json<MarkPresentRequest>,
) -> AttendanceResult<Json<OutcomeResponse>>
where
    R: AttendanceRepositories,
{
    let use_case = MarkPresentUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let outcome = use_case
        .execute(
            MarkPresentInput {
                reg_number: req.reg_number,
                subject: req.subject,
                qr_id: req.qr_id,
            },
            Utc::now(),
        )
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /attendance/decrement (teacher)
pub async fn record_absence<R>(
    State(state): State<AttendanceAppState<R>>,
    Extension(teacher): Extension<AuthenticatedTeacher>,
    Json(req): Json<RecordAbsenceRequest>,
) -> AttendanceResult<Json<OutcomeResponse>>
where
    R: AttendanceRepositories,
{
    let use_case = RecordAbsenceUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let outcome = use_case
        .execute(
            teacher.teacher_id,
            RecordAbsenceInput {
                reg_number: req.reg_number,
                subject: req.subject,
            },
            Utc::now(),
        )
        .await?;

    Ok(Json(outcome.into()))
}

/// GET /attendance/{reg_number}
pub async fn history<R>(
    State(state): State<AttendanceAppState<R>>,
    Path(reg_number): Path<String>,
) -> AttendanceResult<Json<HistoryResponse>>
where
    R: AttendanceRepositories,
{
    let history = HistoryUseCase::new(state.repo.clone())
        .execute(&reg_number)
        .await?;

    Ok(Json(history.into()))
}
