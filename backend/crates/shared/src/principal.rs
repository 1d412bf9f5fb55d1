//! Authenticated principal
//!
//! The `auth` middleware resolves a bearer credential into an
//! [`AuthenticatedTeacher`] and stores it in the request extensions.
//! Handlers in other crates read it with `Extension<AuthenticatedTeacher>`
//! without depending on the `auth` crate.

use uuid::Uuid;

use crate::id::TeacherId;

/// Teacher resolved from a currently-associated session credential
#[derive(Debug, Clone)]
pub struct AuthenticatedTeacher {
    pub teacher_id: TeacherId,
    /// Canonical (lower-cased) email
    pub email: String,
    /// Session the request was authenticated with
    pub session_id: Uuid,
}
