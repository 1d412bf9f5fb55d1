//! Shared Kernel
//!
//! Vocabulary shared by every crate in the attendance backend:
//! - Unified error type, error kinds and result aliases
//! - Typed ID wrappers for entities that cross crate boundaries
//! - The authenticated-teacher principal handed from `auth` to `attendance`
//! - Student registration numbers, normalized the same way everywhere
//!
//! Only put things here whose meaning is identical in every crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod principal;
pub mod reg_number;
