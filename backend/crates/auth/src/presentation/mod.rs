//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AuthAppState, AuthRepositories};
pub use middleware::require_teacher;
pub use router::{auth_router, auth_router_with_state};
