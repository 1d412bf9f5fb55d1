//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64, random identifiers)
//! - Signed opaque session tokens and bearer header extraction
//! - Password hashing (Argon2id)

pub mod crypto;
pub mod password;
pub mod token;
