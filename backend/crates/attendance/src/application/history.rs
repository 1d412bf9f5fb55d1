//! Attendance History Use Case

use std::sync::Arc;

use crate::domain::entities::AttendanceRecord;
use crate::domain::repository::AttendanceRecordRepository;
use crate::domain::services::total_score;
use crate::domain::value_objects::RegistrationNumber;
use crate::error::AttendanceResult;

#[derive(Debug, Clone)]
pub struct AttendanceHistory {
    pub reg_number: RegistrationNumber,
    pub total_score: i64,
    /// Date descending, then subject ascending
    pub records: Vec<AttendanceRecord>,
}

pub struct HistoryUseCase<L>
where
    L: AttendanceRecordRepository,
{
    ledger: Arc<L>,
}

impl<L> HistoryUseCase<L>
where
    L: AttendanceRecordRepository,
{
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Unknown students simply have no records
    pub async fn execute(&self, reg_number: &str) -> AttendanceResult<AttendanceHistory> {
        let reg_number = RegistrationNumber::new(reg_number)?;
        let records = self.ledger.list_by_student(&reg_number).await?;

        Ok(AttendanceHistory {
            total_score: total_score(&records),
            reg_number,
            records,
        })
    }
}
