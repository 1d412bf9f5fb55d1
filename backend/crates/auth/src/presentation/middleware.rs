//! Auth Middleware
//!
//! Guards teacher-only routes. On success the resolved
//! `AuthenticatedTeacher` is inserted into the request extensions for
//! downstream handlers (including other crates' routers).

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::AuthenticateUseCase;
use crate::error::AuthError;
use crate::presentation::handlers::{AuthAppState, AuthRepositories};

/// Require `Authorization: Bearer <credential>` naming a live session
pub async fn require_teacher<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AuthRepositories,
{
    let token = platform::token::extract_bearer(req.headers())?;

    let teacher = AuthenticateUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    )
    .execute(&token)
    .await?;

    tracing::debug!(teacher_id = %teacher.teacher_id, "Teacher authenticated");

    req.extensions_mut().insert(teacher);

    Ok(next.run(req).await)
}
