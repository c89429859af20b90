//! # Admin Credentials
//!
//! The admin panel is guarded by a single operator username/password pair
//! injected from configuration. Requests authenticate with HTTP Basic auth.
//!
//! ## Invariants
//! - Both username and password are compared on every attempt
//! - Comparisons are constant time

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};

/// Realm advertised in `WWW-Authenticate` challenges
pub const ADMIN_REALM: &str = "ropelog-admin";

/// Configured operator credentials
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a username/password pair
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }

    /// Check the value of an `Authorization` header
    pub fn authenticate_header(&self, header: Option<&str>) -> AuthResult<()> {
        let (username, password) = parse_basic_header(header)?;
        if self.verify(&username, &password) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decode `Basic base64(user:pass)`
pub fn parse_basic_header(header: Option<&str>) -> AuthResult<(String, String)> {
    let encoded = header
        .and_then(|h| h.strip_prefix("Basic "))
        .map(str::trim)
        .ok_or(AuthError::AuthenticationRequired)?;

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| AuthError::InvalidCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::InvalidCredentials)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::InvalidCredentials)?;

    Ok((username.to_string(), password.to_string()))
}

/// Build a Basic auth header value
pub fn basic_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}
