//! Subject Use Cases

use std::sync::Arc;

use kernel::id::TeacherId;

use crate::domain::entities::Subject;
use crate::domain::repository::SubjectRepository;
use crate::domain::value_objects::SubjectName;
use crate::error::{AttendanceError, AttendanceResult};

/// Create a subject owned by the calling teacher
pub struct CreateSubjectUseCase<R>
where
    R: SubjectRepository,
{
    repo: Arc<R>,
}

impl<R> CreateSubjectUseCase<R>
where
    R: SubjectRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, teacher_id: TeacherId, name: &str) -> AttendanceResult<Subject> {
        let name = SubjectName::new(name)?;

        if self
            .repo
            .find_by_teacher_and_name(&teacher_id, &name)
            .await?
            .is_some()
        {
            return Err(AttendanceError::SubjectExists);
        }

        let subject = Subject::new(name, teacher_id);
        self.repo.create(&subject).await?;

        tracing::info!(
            teacher_id = %teacher_id,
            subject = %subject.name,
            "Subject created"
        );

        Ok(subject)
    }
}

/// List the calling teacher's subjects
pub struct ListSubjectsUseCase<R>
where
    R: SubjectRepository,
{
    repo: Arc<R>,
}

impl<R> ListSubjectsUseCase<R>
where
    R: SubjectRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, teacher_id: TeacherId) -> AttendanceResult<Vec<Subject>> {
        self.repo.list_by_teacher(&teacher_id).await
    }
}
