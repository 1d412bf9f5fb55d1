//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod login_student;
pub mod login_teacher;
pub mod logout_teacher;
pub mod register_student;
pub mod register_teacher;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use login_student::LoginStudentUseCase;
pub use login_teacher::{LoginTeacherInput, LoginTeacherUseCase, TeacherSessionOutput};
pub use logout_teacher::LogoutTeacherUseCase;
pub use register_student::{RegisterStudentUseCase, StudentCredentialsInput};
pub use register_teacher::{RegisterTeacherInput, RegisterTeacherUseCase};
