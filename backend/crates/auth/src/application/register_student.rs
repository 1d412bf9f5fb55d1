//! Student Registration Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::student::Student;
use crate::domain::repository::StudentRepository;
use crate::domain::value_object::{
    RegistrationNumber,
    password::{PasswordHash, RawPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct StudentCredentialsInput {
    pub reg_number: String,
    pub password: String,
}

/// Student registration use case
pub struct RegisterStudentUseCase<R>
where
    R: StudentRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterStudentUseCase<R>
where
    R: StudentRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: StudentCredentialsInput) -> AuthResult<RegistrationNumber> {
        let reg_number = RegistrationNumber::new(&input.reg_number)?;

        if self.repo.find_by_reg_number(&reg_number).await?.is_some() {
            return Err(AuthError::RegistrationNumberTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = PasswordHash::from_raw(&raw_password, self.config.pepper())?;

        let student = Student::new(reg_number, password_hash);
        self.repo.create(&student).await?;

        tracing::info!(reg_number = %student.reg_number, "Student registered");

        Ok(student.reg_number)
    }
}
