//! Application Layer
//!
//! Use cases, the daily sweep and its scheduler.

pub mod config;
pub mod history;
pub mod mark_present;
pub mod open_session;
pub mod record_absence;
pub mod subjects;
pub mod sweep;

// Re-exports
pub use config::{AttendanceConfig, MAX_QR_TTL};
pub use history::{AttendanceHistory, HistoryUseCase};
pub use mark_present::{MarkOutcome, MarkPresentInput, MarkPresentUseCase};
pub use open_session::OpenQrSessionUseCase;
pub use record_absence::{
    AbsenceOutcome, RecordAbsenceInput, RecordAbsenceUseCase, record_absence_if_missing,
};
pub use subjects::{CreateSubjectUseCase, ListSubjectsUseCase};
pub use sweep::{DailySweepUseCase, SweepSummary, run_guarded, spawn_daily_sweep};
