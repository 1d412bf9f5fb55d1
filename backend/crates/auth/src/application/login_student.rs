//! Student Login Use Case
//!
//! Only checks the password. Students receive no credential; marking
//! attendance is authorized by the QR code alone.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register_student::StudentCredentialsInput;
use crate::domain::repository::StudentRepository;
use crate::domain::value_object::{RegistrationNumber, password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginStudentUseCase<R>
where
    R: StudentRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginStudentUseCase<R>
where
    R: StudentRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: StudentCredentialsInput) -> AuthResult<RegistrationNumber> {
        let reg_number =
            RegistrationNumber::new(&input.reg_number).map_err(|_| AuthError::InvalidCredentials)?;

        let student = self
            .repo
            .find_by_reg_number(&reg_number)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = RawPassword::for_login(input.password);
        if !student.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(reg_number = %student.reg_number, "Student logged in");

        Ok(student.reg_number)
    }
}
