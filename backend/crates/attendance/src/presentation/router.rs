//! Attendance Routers
//!
//! Split in two so the application can put the teacher guard on one half.

use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::handlers::{self, AttendanceAppState, AttendanceRepositories};

/// Routes open to students: mark attendance and read history
pub fn public_router<R>(state: AttendanceAppState<R>) -> Router
where
    R: AttendanceRepositories,
{
    Router::new()
        .route("/attendance/mark", post(handlers::mark_present::<R>))
        .route("/attendance/{reg_number}", get(handlers::history::<R>))
        .with_state(state)
}

/// Routes that need an `AuthenticatedTeacher` extension
pub fn teacher_router<R>(state: AttendanceAppState<R>) -> Router
where
    R: AttendanceRepositories,
{
    Router::new()
        .route(
            "/subjects",
            get(handlers::list_subjects::<R>).post(handlers::create_subject::<R>),
        )
        .route("/attendance/session", post(handlers::open_session::<R>))
        .route("/attendance/decrement", post(handlers::record_absence::<R>))
        .with_state(state)
}
