//! Attendance Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, calendar policy, repository traits
//! - `application/` - Use cases, daily sweep and its scheduler
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Ledger Model
//! - At most one record per (registration number, subject, calendar day),
//!   enforced by the store
//! - A scan writes present/+1, upgrading (not adding to) an absence penalty;
//!   present is final for the day
//! - The daily sweep writes absent/-3 where no record exists; repeating it
//!   changes nothing
//! - QR sessions accept scans until `expires_at` inclusive and are never
//!   deleted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AttendanceConfig, MAX_QR_TTL};
pub use application::sweep::{SweepSummary, spawn_daily_sweep};
pub use domain::services::CalendarPolicy;
pub use error::{AttendanceError, AttendanceResult};
pub use infra::{memory::InMemoryAttendanceStore, postgres::PgAttendanceRepository};
pub use presentation::{AttendanceAppState, public_router, teacher_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
