//! Auth (Identity) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Teacher register/login/logout with email + password
//! - Opaque bearer credentials backed by server-side sessions; a teacher
//!   may hold several, logout revokes only the presented one
//! - Student register/login with registration number + password
//!   (no credential issued)
//! - `require_teacher` middleware producing `kernel::principal::AuthenticatedTeacher`
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Credential = session id + HMAC-SHA256 signature, verified before any
//!   database lookup
//! - Login failures never reveal whether the identity exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::{auth_router, auth_router_with_state};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
