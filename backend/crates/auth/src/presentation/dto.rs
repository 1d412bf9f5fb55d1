//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::TeacherSessionOutput;

// ============================================================================
// Teacher
// ============================================================================

/// Teacher register / login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherCredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Issued bearer credential
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSessionResponse {
    pub teacher_id: Uuid,
    pub email: String,
    /// Send as `Authorization: Bearer <token>`
    pub token: String,
    pub expires_at_ms: i64,
}

impl From<TeacherSessionOutput> for TeacherSessionResponse {
    fn from(output: TeacherSessionOutput) -> Self {
        Self {
            teacher_id: output.teacher_id.into_uuid(),
            email: output.email,
            token: output.token,
            expires_at_ms: output.expires_at_ms,
        }
    }
}

// ============================================================================
// Student
// ============================================================================

/// Student register / login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCredentialsRequest {
    pub reg_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub reg_number: String,
}
