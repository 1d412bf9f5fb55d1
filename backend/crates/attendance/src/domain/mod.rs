//! Domain Layer
//!
//! Contains entities, value objects, pure services and repository traits.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{AttendanceRecord, QrSession, Subject};
pub use repository::{
    AttendanceRecordRepository, QrSessionRepository, StudentDirectory, SubjectRepository,
};
pub use services::CalendarPolicy;
pub use value_objects::{AttendanceDate, AttendanceStatus, RecordKey, SubjectName};
