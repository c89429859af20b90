//! # Ropelog Auth Module
//!
//! Single-operator admin gate and customer password hashing.

pub mod admin;
pub mod crypto;
pub mod errors;

pub use admin::{basic_header, AdminCredentials, ADMIN_REALM};
pub use errors::{AuthError, AuthResult};
