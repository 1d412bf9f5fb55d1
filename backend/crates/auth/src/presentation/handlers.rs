//! HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::principal::AuthenticatedTeacher;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginStudentUseCase, LoginTeacherInput, LoginTeacherUseCase, LogoutTeacherUseCase,
    RegisterStudentUseCase, RegisterTeacherInput, RegisterTeacherUseCase, StudentCredentialsInput,
};
use crate::domain::repository::{StudentRepository, TeacherRepository, TeacherSessionRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    StudentCredentialsRequest, StudentResponse, TeacherCredentialsRequest, TeacherSessionResponse,
};

/// Everything the auth handlers need from a store
pub trait AuthRepositories:
    TeacherRepository + TeacherSessionRepository + StudentRepository + Clone + Send + Sync + 'static
{
}

impl<R> AuthRepositories for R where
    R: TeacherRepository
        + TeacherSessionRepository
        + StudentRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for auth handlers and middleware
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthRepositories,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: AuthRepositories,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Teacher
// ============================================================================

/// POST /register
pub async fn register_teacher<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<TeacherCredentialsRequest>,
) -> AuthResult<(StatusCode, Json<TeacherSessionResponse>)>
where
    R: AuthRepositories,
{
    let use_case =
        RegisterTeacherUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterTeacherInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// POST /login
pub async fn login_teacher<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<TeacherCredentialsRequest>,
) -> AuthResult<Json<TeacherSessionResponse>>
where
    R: AuthRepositories,
{
    let use_case =
        LoginTeacherUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginTeacherInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(output.into()))
}

/// POST /logout (bearer)
pub async fn logout_teacher<R>(
    State(state): State<AuthAppState<R>>,
    Extension(teacher): Extension<AuthenticatedTeacher>,
) -> AuthResult<StatusCode>
where
    R: AuthRepositories,
{
    LogoutTeacherUseCase::new(state.repo.clone())
        .execute(teacher.session_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Student
// ============================================================================

/// POST /student/register
pub async fn register_student<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<StudentCredentialsRequest>,
) -> AuthResult<(StatusCode, Json<StudentResponse>)>
where
    R: AuthRepositories,
{
    let reg_number = RegisterStudentUseCase::new(state.repo.clone(), state.config.clone())
        .execute(StudentCredentialsInput {
            reg_number: req.reg_number,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            reg_number: reg_number.into(),
        }),
    ))
}

/// POST /student/login
pub async fn login_student<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<StudentCredentialsRequest>,
) -> AuthResult<Json<StudentResponse>>
where
    R: AuthRepositories,
{
    let reg_number = LoginStudentUseCase::new(state.repo.clone(), state.config.clone())
        .execute(StudentCredentialsInput {
            reg_number: req.reg_number,
            password: req.password,
        })
        .await?;

    Ok(Json(StudentResponse {
        reg_number: reg_number.into(),
    }))
}
