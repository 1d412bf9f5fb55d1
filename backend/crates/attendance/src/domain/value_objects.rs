//! Domain Value Objects
//!
//! Immutable value types for the attendance domain.

use chrono::NaiveDate;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use kernel::reg_number::RegistrationNumber;

/// Score delta for a scan
pub const PRESENT_SCORE: i32 = 1;

/// Score delta for a missed day
pub const ABSENT_SCORE: i32 = -3;

const SUBJECT_NAME_MAX_LENGTH: usize = 100;

/// Status of one (student, subject, day) record
///
/// `Present` is terminal for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn score_change(&self) -> i32 {
        match self {
            AttendanceStatus::Present => PRESENT_SCORE,
            AttendanceStatus::Absent => ABSENT_SCORE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar day in the attendance reference zone, `YYYY-MM-DD` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceDate(NaiveDate);

impl AttendanceDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for AttendanceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for AttendanceDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Subject name, trimmed; case-sensitive ("Math" and "math" differ)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectName(String);

impl SubjectName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let name = raw.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Subject name cannot be empty"));
        }

        if name.chars().count() > SUBJECT_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Subject name must be at most {} characters",
                SUBJECT_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Subject name contains invalid characters",
            ));
        }

        Ok(Self(name.to_owned()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubjectName {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<SubjectName> for String {
    fn from(value: SubjectName) -> Self {
        value.0
    }
}

impl fmt::Display for SubjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of an attendance record; at most one record per key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub reg_number: RegistrationNumber,
    pub subject: SubjectName,
    pub date: AttendanceDate,
}

impl RecordKey {
    pub fn new(reg_number: RegistrationNumber, subject: SubjectName, date: AttendanceDate) -> Self {
        Self {
            reg_number,
            subject,
            date,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.reg_number, self.subject, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_scores() {
        assert_eq!(AttendanceStatus::Present.score_change(), 1);
        assert_eq!(AttendanceStatus::Absent.score_change(), -3);
        assert_eq!(
            AttendanceStatus::from_db("absent"),
            Some(AttendanceStatus::Absent)
        );
        assert_eq!(AttendanceStatus::from_db("late"), None);
    }

    #[test]
    fn test_date_format() {
        let date = AttendanceDate::new(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
        assert_eq!(date.to_string(), "2026-03-07");
        assert_eq!(serde_json::to_string(&date).unwrap(), r#""2026-03-07""#);
    }

    #[test]
    fn test_subject_name() {
        assert_eq!(SubjectName::new("  Math ").unwrap().as_str(), "Math");
        assert_ne!(SubjectName::new("Math").unwrap(), SubjectName::new("math").unwrap());
        assert!(SubjectName::new("").is_err());
        assert!(SubjectName::new("a".repeat(SUBJECT_NAME_MAX_LENGTH + 1)).is_err());
        assert!(SubjectName::new("Math\n").is_ok());
        assert!(SubjectName::new("Ma\tth").is_err());
    }
}
