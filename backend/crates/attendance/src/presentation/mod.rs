//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{AttendanceAppState, AttendanceRepositories};
pub use router::{public_router, teacher_router};
