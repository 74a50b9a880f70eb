//! Version errors

use thiserror::Error;

use crate::lock::LockError;

use super::state::VersionState;

/// Result type for version operations
pub type VersionResult<T> = Result<T, VersionError>;

/// Errors from the versioning collaborator
#[derive(Debug, Error)]
pub enum VersionError {
    /// The version does not exist
    #[error("Version not found")]
    NotFound,

    /// The content object already has a draft version
    #[error("Content object already has a draft version")]
    DraftExists,

    /// The requested state change is not a legal transition
    #[error("Cannot transition version from {from} to {to}")]
    InvalidTransition {
        from: VersionState,
        to: VersionState,
    },

    /// Only archived or unpublished versions can be reverted to a new draft
    #[error("Cannot revert a version in {0} state")]
    NotRevertable(VersionState),

    /// The lock lifecycle step failed
    #[error(transparent)]
    Lock(#[from] LockError),

    /// Version store failure (poisoned lock, etc.)
    #[error("Version store error: {0}")]
    Store(String),
}

impl VersionError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            VersionError::NotFound => 404,
            VersionError::DraftExists => 409,
            VersionError::InvalidTransition { .. } => 409,
            VersionError::NotRevertable(_) => 409,
            VersionError::Lock(e) => e.status_code(),
            VersionError::Store(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(VersionError::NotFound.status_code(), 404);
        assert_eq!(VersionError::DraftExists.status_code(), 409);
        assert_eq!(
            VersionError::Lock(LockError::Forbidden).status_code(),
            403
        );
    }
}
