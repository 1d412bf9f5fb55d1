//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{student::Student, teacher::Teacher, teacher_session::TeacherSession};
pub use repository::{StudentRepository, TeacherRepository, TeacherSessionRepository};
