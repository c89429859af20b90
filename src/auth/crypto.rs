//! Customer password hashing.
//!
//! A rope may carry its owner's password. Only the Argon2id PHC string is
//! ever stored.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::errors::{AuthError, AuthResult};

/// Argon2id PHC string for a customer password, freshly salted
pub fn hash_customer_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Check a candidate against a stored hash. Errors only if the hash is malformed.
pub fn customer_password_matches(candidate: &str, stored_hash: &str) -> AuthResult<bool> {
    let phc = PasswordHash::new(stored_hash).map_err(|_| AuthError::MalformedHash)?;

    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &phc)
        .is_ok())
}
