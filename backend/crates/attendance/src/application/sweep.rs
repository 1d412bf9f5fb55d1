//! Daily Penalty Sweep
//!
//! Once a day, every known student x every known subject name gets an
//! absence for today unless a record already exists. One failing pair is
//! logged and counted; the rest still run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::config::AttendanceConfig;
use crate::application::record_absence::{AbsenceOutcome, record_absence_if_missing};
use crate::domain::repository::{AttendanceRecordRepository, StudentDirectory, SubjectRepository};
use crate::domain::value_objects::{AttendanceDate, RecordKey};
use crate::error::AttendanceResult;

/// Counts from one sweep run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepSummary {
    pub date: AttendanceDate,
    pub pairs: usize,
    pub penalized: usize,
    pub already_absent: usize,
    pub no_penalty: usize,
    pub failed: usize,
}

impl SweepSummary {
    fn new(date: AttendanceDate) -> Self {
        Self {
            date,
            pairs: 0,
            penalized: 0,
            already_absent: 0,
            no_penalty: 0,
            failed: 0,
        }
    }
}

pub struct DailySweepUseCase<S, D, L>
where
    S: SubjectRepository,
    D: StudentDirectory,
    L: AttendanceRecordRepository,
{
    subject_repo: Arc<S>,
    students: Arc<D>,
    ledger: Arc<L>,
    config: Arc<AttendanceConfig>,
}

impl<S, D, L> DailySweepUseCase<S, D, L>
where
    S: SubjectRepository,
    D: StudentDirectory,
    L: AttendanceRecordRepository,
{
    pub fn new(
        subject_repo: Arc<S>,
        students: Arc<D>,
        ledger: Arc<L>,
        config: Arc<AttendanceConfig>,
    ) -> Self {
        Self {
            subject_repo,
            students,
            ledger,
            config,
        }
    }

    /// Run one sweep for the calendar day containing `now`
    ///
    /// Fails only if the student or subject lists cannot be loaded.
    pub async fn run(&self, now: DateTime<Utc>) -> AttendanceResult<SweepSummary> {
        let date = self.config.calendar.today(now);
        let students = self.students.list_registration_numbers().await?;
        let subjects = self.subject_repo.list_distinct_names().await?;

        tracing::info!(
            date = %date,
            students = students.len(),
            subjects = subjects.len(),
            "Daily penalty sweep started"
        );

        let mut summary = SweepSummary::new(date);

        for reg_number in &students {
            for subject in &subjects {
                summary.pairs += 1;
                let key = RecordKey::new(reg_number.clone(), subject.clone(), date);

                match record_absence_if_missing(self.ledger.as_ref(), key, now).await {
                    Ok(AbsenceOutcome::Penalized { .. }) => summary.penalized += 1,
                    Ok(AbsenceOutcome::AlreadyAbsent { .. }) => summary.already_absent += 1,
                    Ok(AbsenceOutcome::NoPenalty { .. }) => summary.no_penalty += 1,
                    Err(e) => {
                        summary.failed += 1;
                        tracing::warn!(
                            reg_number = %reg_number,
                            subject = %subject,
                            date = %date,
                            error = %e,
                            "Sweep failed for pair, continuing"
                        );
                    }
                }
            }
        }

        tracing::info!(
            date = %summary.date,
            pairs = summary.pairs,
            penalized = summary.penalized,
            already_absent = summary.already_absent,
            no_penalty = summary.no_penalty,
            failed = summary.failed,
            "Daily penalty sweep finished"
        );

        Ok(summary)
    }
}

/// Run one sweep in its own task and log how it ended
///
/// A panic inside the run is contained to that task, so the schedule keeps
/// going. Returns the summary only when the run completed.
pub async fn run_guarded<S, D, L>(
    sweep: Arc<DailySweepUseCase<S, D, L>>,
    now: DateTime<Utc>,
) -> Option<SweepSummary>
where
    S: SubjectRepository + Send + Sync + 'static,
    D: StudentDirectory + Send + Sync + 'static,
    L: AttendanceRecordRepository + Send + Sync + 'static,
{
    match tokio::spawn(async move { sweep.run(now).await }).await {
        Ok(Ok(summary)) => Some(summary),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Daily penalty sweep failed");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, panicked = e.is_panic(), "Daily penalty sweep aborted");
            None
        }
    }
}

/// Spawn the daily sweep on the tokio runtime
///
/// Sleeps until the next `config.sweep_at` in the calendar zone, runs once,
/// repeats. A trigger missed while the process was down is not backfilled.
pub fn spawn_daily_sweep<R>(repo: Arc<R>, config: Arc<AttendanceConfig>) -> JoinHandle<()>
where
    R: SubjectRepository + StudentDirectory + AttendanceRecordRepository + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let sweep = Arc::new(DailySweepUseCase::new(
            repo.clone(),
            repo.clone(),
            repo,
            config.clone(),
        ));

        loop {
            let now = Utc::now();
            let next = config.calendar.next_occurrence(now, config.sweep_at);
            let wait = (next - now).to_std().unwrap_or_default();

            tracing::info!(next_run = %next, "Daily penalty sweep scheduled");
            tokio::time::sleep(wait).await;

            // The run belongs to the trigger's day even if the wake-up is late
            run_guarded(sweep.clone(), next).await;
        }
    })
}
