//! Admin gate and hashing errors.

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Missing header or a scheme other than Basic
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Undecodable header or a pair that does not match; never says which field
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential hashing failed")]
    HashingFailed,

    /// Stored value is not a PHC hash string
    #[error("Stored credential hash is malformed")]
    MalformedHash,
}

impl AuthError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::AuthenticationRequired | AuthError::InvalidCredentials => 401,
            AuthError::HashingFailed | AuthError::MalformedHash => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
