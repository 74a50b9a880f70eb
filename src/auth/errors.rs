//! Auth errors

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors from the actor directory
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// An actor with this name is already registered
    #[error("Actor name already registered")]
    DuplicateActor,

    /// Directory lock poisoned by a panicking writer
    #[error("Actor directory unavailable")]
    DirectoryPoisoned,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::DuplicateActor => 409,
            AuthError::DirectoryPoisoned => 500,
        }
    }
}
