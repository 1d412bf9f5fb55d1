//! In-Memory Repository
//!
//! Backs the use-case, sweep and router tests. Keys mirror the SQL unique
//! constraints: (teacher, subject name), qr_id, and
//! (reg_number, subject, date). Writes for chosen students can be made to
//! fail to exercise error paths.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use kernel::id::TeacherId;

use crate::domain::entities::{AttendanceRecord, QrSession, Subject};
use crate::domain::repository::{
    AttendanceRecordRepository, PresentUpsert, QrSessionRepository, StudentDirectory,
    SubjectRepository,
};
use crate::domain::value_objects::{AttendanceStatus, RecordKey, RegistrationNumber, SubjectName};
use crate::error::{AttendanceError, AttendanceResult};

#[derive(Default)]
struct State {
    subjects: HashMap<(TeacherId, SubjectName), Subject>,
    qr_sessions: HashMap<String, QrSession>,
    records: HashMap<RecordKey, AttendanceRecord>,
    students: BTreeSet<RegistrationNumber>,
    failing_writes: HashSet<RegistrationNumber>,
}

/// Shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub struct InMemoryAttendanceStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AttendanceResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AttendanceError::Internal("in-memory store poisoned".to_string()))
    }

    /// Make a student known to the directory
    pub fn register_student(&self, reg_number: RegistrationNumber) {
        if let Ok(mut state) = self.state.lock() {
            state.students.insert(reg_number);
        }
    }

    /// Every ledger write for `reg_number` fails from now on
    pub fn fail_writes_for(&self, reg_number: RegistrationNumber) {
        if let Ok(mut state) = self.state.lock() {
            state.failing_writes.insert(reg_number);
        }
    }

    /// Total number of ledger rows
    pub fn record_count(&self) -> usize {
        self.state.lock().map(|s| s.records.len()).unwrap_or(0)
    }

    fn check_writable(state: &State, reg_number: &RegistrationNumber) -> AttendanceResult<()> {
        if state.failing_writes.contains(reg_number) {
            return Err(AttendanceError::Internal(format!(
                "injected write failure for {}",
                reg_number
            )));
        }
        Ok(())
    }
}

impl SubjectRepository for InMemoryAttendanceStore {
    async fn create(&self, subject: &Subject) -> AttendanceResult<()> {
        let mut state = self.lock()?;
        let key = (subject.teacher_id, subject.name.clone());
        if state.subjects.contains_key(&key) {
            return Err(AttendanceError::SubjectExists);
        }
        state.subjects.insert(key, subject.clone());
        Ok(())
    }

    async fn list_by_teacher(&self, teacher_id: &TeacherId) -> AttendanceResult<Vec<Subject>> {
        let state = self.lock()?;
        let mut subjects: Vec<Subject> = state
            .subjects
            .values()
            .filter(|s| &s.teacher_id == teacher_id)
            .cloned()
            .collect();
        subjects.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(subjects)
    }

    async fn find_by_teacher_and_name(
        &self,
        teacher_id: &TeacherId,
        name: &SubjectName,
    ) -> AttendanceResult<Option<Subject>> {
        Ok(self
            .lock()?
            .subjects
            .get(&(*teacher_id, name.clone()))
            .cloned())
    }

    async fn list_distinct_names(&self) -> AttendanceResult<Vec<SubjectName>> {
        let state = self.lock()?;
        let names: BTreeSet<SubjectName> =
            state.subjects.keys().map(|(_, name)| name.clone()).collect();
        Ok(names.into_iter().collect())
    }
}

impl QrSessionRepository for InMemoryAttendanceStore {
    async fn create(&self, session: &QrSession) -> AttendanceResult<()> {
        let mut state = self.lock()?;
        if state.qr_sessions.contains_key(&session.qr_id) {
            return Err(AttendanceError::Internal(format!(
                "duplicate qr_id {}",
                session.qr_id
            )));
        }
        state
            .qr_sessions
            .insert(session.qr_id.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, qr_id: &str) -> AttendanceResult<Option<QrSession>> {
        Ok(self.lock()?.qr_sessions.get(qr_id).cloned())
    }
}

impl AttendanceRecordRepository for InMemoryAttendanceStore {
    async fn find(&self, key: &RecordKey) -> AttendanceResult<Option<AttendanceRecord>> {
        Ok(self.lock()?.records.get(key).cloned())
    }

    async fn upsert_present(
        &self,
        record: &AttendanceRecord,
    ) -> AttendanceResult<Option<PresentUpsert>> {
        let mut state = self.lock()?;
        Self::check_writable(&state, &record.reg_number)?;

        let key = record.key();
        match state.records.get_mut(&key) {
            Some(existing) if existing.is_present() => Ok(None),
            Some(existing) => {
                existing.status = AttendanceStatus::Present;
                existing.score_change = AttendanceStatus::Present.score_change();
                existing.updated_at = record.updated_at;
                Ok(Some(PresentUpsert {
                    record: existing.clone(),
                    replaced_absence: true,
                }))
            }
            None => {
                let fresh = AttendanceRecord::present(key.clone(), record.created_at);
                state.records.insert(key, fresh.clone());
                Ok(Some(PresentUpsert {
                    record: fresh,
                    replaced_absence: false,
                }))
            }
        }
    }

    async fn insert_if_missing(&self, record: &AttendanceRecord) -> AttendanceResult<bool> {
        let mut state = self.lock()?;
        Self::check_writable(&state, &record.reg_number)?;

        let key = record.key();
        if state.records.contains_key(&key) {
            return Ok(false);
        }
        state.records.insert(key, record.clone());
        Ok(true)
    }

    async fn list_by_student(
        &self,
        reg_number: &RegistrationNumber,
    ) -> AttendanceResult<Vec<AttendanceRecord>> {
        let state = self.lock()?;
        let mut records: Vec<AttendanceRecord> = state
            .records
            .values()
            .filter(|r| &r.reg_number == reg_number)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.subject.cmp(&b.subject)));
        Ok(records)
    }
}

impl StudentDirectory for InMemoryAttendanceStore {
    async fn exists(&self, reg_number: &RegistrationNumber) -> AttendanceResult<bool> {
        Ok(self.lock()?.students.contains(reg_number))
    }

    async fn list_registration_numbers(&self) -> AttendanceResult<Vec<RegistrationNumber>> {
        Ok(self.lock()?.students.iter().cloned().collect())
    }
}
