//! Auth Router

use axum::{Router, middleware, routing::post};

use crate::application::config::AuthConfig;
use crate::presentation::handlers::{self, AuthAppState, AuthRepositories};
use crate::presentation::middleware::require_teacher;

/// Identity routes: teacher register/login/logout, student register/login
pub fn auth_router<R>(repo: R, config: AuthConfig) -> Router
where
    R: AuthRepositories,
{
    auth_router_with_state(AuthAppState::new(repo, config))
}

/// Same as `auth_router` but reuses a state shared with `require_teacher`
/// layers elsewhere in the application
pub fn auth_router_with_state<R>(state: AuthAppState<R>) -> Router
where
    R: AuthRepositories,
{
    let protected = Router::new()
        .route("/logout", post(handlers::logout_teacher::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_teacher::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register_teacher::<R>))
        .route("/login", post(handlers::login_teacher::<R>))
        .route("/student/register", post(handlers::register_student::<R>))
        .route("/student/login", post(handlers::login_student::<R>))
        .merge(protected)
        .with_state(state)
}
