//! Value Object Module

pub mod email;
pub mod password;

pub use kernel::reg_number::RegistrationNumber;
