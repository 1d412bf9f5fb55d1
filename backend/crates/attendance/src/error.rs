//! Attendance Error Types
//!
//! Attendance-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Idempotent no-ops (already marked,
//! already absent, no penalty) are outcomes, not errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Attendance-specific result type alias
pub type AttendanceResult<T> = Result<T, AttendanceError>;

#[derive(Debug, Error)]
pub enum AttendanceError {
    /// No QR session with that id, or it belongs to another subject
    #[error("QR code is not valid")]
    InvalidQr,

    /// QR session found but past its expiry
    #[error("QR code has expired")]
    ExpiredQr,

    /// The calling teacher has no subject with that name
    #[error("Subject not found")]
    SubjectNotFound,

    /// The calling teacher already has a subject with that name
    #[error("Subject already exists")]
    SubjectExists,

    /// No registered student with that registration number
    #[error("Student not found")]
    StudentNotFound,

    /// Malformed input
    #[error("{}", .0.message())]
    Validation(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AttendanceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::InvalidQr
            | AttendanceError::SubjectNotFound
            | AttendanceError::StudentNotFound => StatusCode::NOT_FOUND,
            AttendanceError::ExpiredQr => StatusCode::GONE,
            AttendanceError::SubjectExists => StatusCode::CONFLICT,
            AttendanceError::Validation(_) => StatusCode::BAD_REQUEST,
            AttendanceError::Database(e) if is_unavailable(e) => StatusCode::SERVICE_UNAVAILABLE,
            AttendanceError::Database(_) | AttendanceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AttendanceError::InvalidQr
            | AttendanceError::SubjectNotFound
            | AttendanceError::StudentNotFound => ErrorKind::NotFound,
            AttendanceError::ExpiredQr => ErrorKind::Gone,
            AttendanceError::SubjectExists => ErrorKind::Conflict,
            AttendanceError::Validation(_) => ErrorKind::BadRequest,
            AttendanceError::Database(e) if is_unavailable(e) => ErrorKind::ServiceUnavailable,
            AttendanceError::Database(_) | AttendanceError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AttendanceError::Validation(err) => {
                let app = AppError::bad_request(err.message().to_owned());
                match err.action() {
                    Some(action) => app.with_action(action.to_owned()),
                    None => app,
                }
            }
            AttendanceError::ExpiredQr => AppError::gone(self.to_string())
                .with_action("Ask your teacher to show a new QR code"),
            AttendanceError::StudentNotFound => AppError::not_found(self.to_string())
                .with_action("Register before marking attendance"),
            AttendanceError::Database(_) | AttendanceError::Internal(_) => {
                AppError::new(self.kind(), "An internal error occurred")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AttendanceError::Database(e) => {
                tracing::error!(error = %e, "Attendance database error");
            }
            AttendanceError::Internal(msg) => {
                tracing::error!(message = %msg, "Attendance internal error");
            }
            AttendanceError::InvalidQr => {
                tracing::warn!("Attendance mark with unknown QR code");
            }
            _ => {
                tracing::debug!(error = %self, "Attendance error");
            }
        }
    }
}

fn is_unavailable(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
}

impl From<AttendanceError> for AppError {
    fn from(err: AttendanceError) -> Self {
        err.to_app_error()
    }
}

impl From<AppError> for AttendanceError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AttendanceError::Internal(err.to_string())
        } else {
            AttendanceError::Validation(err)
        }
    }
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
