//! Entity Module

pub mod student;
pub mod teacher;
pub mod teacher_session;
