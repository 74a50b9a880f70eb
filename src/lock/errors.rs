//! Lock errors
//!
//! The four user-facing kinds map onto HTTP statuses; integrity faults and
//! store failures are internal and surface as 500, never folded into the
//! user-facing kinds.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for lock operations
pub type LockResult<T> = Result<T, LockError>;

/// Lock lifecycle and authorization errors
#[derive(Debug, Error)]
pub enum LockError {
    /// A lock already exists for this version. Recovered locally as a no-op
    /// by the lifecycle manager; never surfaced to users.
    #[error("A lock already exists for this version")]
    Conflict,

    /// The target version does not exist, or is not in draft state and
    /// therefore carries nothing to unlock.
    #[error("Version not found")]
    NotFound,

    /// The actor does not hold the unlock capability.
    #[error("You do not have permission to remove the version lock")]
    Forbidden,

    /// Unlock was invoked via a non-mutating request style.
    #[error("This operation only supports POST requests")]
    MethodNotAllowed,

    /// Lock state disagrees with version state. This is a programming
    /// invariant violation, not a user error.
    #[error("Lock state inconsistent with version state: {0}")]
    IntegrityFault(String),

    /// Lock store failure (poisoned lock, etc.)
    #[error("Lock store error: {0}")]
    Store(String),

    /// Journal persistence failure
    #[error(transparent)]
    Journal(#[from] JournalError),
}

impl LockError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            LockError::Conflict => 409,
            LockError::NotFound => 404,
            LockError::Forbidden => 403,
            LockError::MethodNotAllowed => 405,
            LockError::IntegrityFault(_) => 500,
            LockError::Store(_) => 500,
            LockError::Journal(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Errors from the durable lock journal
#[derive(Debug, Error)]
pub enum JournalError {
    /// Journal file could not be opened or created
    #[error("Failed to open lock journal at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Append or fsync failed
    #[error("Failed to append to lock journal: {0}")]
    Write(#[source] io::Error),

    /// Replay read failed
    #[error("Failed to read lock journal: {0}")]
    Read(#[source] io::Error),

    /// Record checksum did not match its payload. Halt-on-corruption: the
    /// journal is not trusted past this point.
    #[error("Lock journal record at offset {offset} failed checksum verification")]
    ChecksumMismatch { offset: u64 },

    /// File ends mid-record
    #[error("Lock journal truncated mid-record at offset {offset}")]
    Truncated { offset: u64 },

    /// Record payload is not valid JSON
    #[error("Lock journal record at offset {offset} is malformed: {source}")]
    Decode {
        offset: u64,
        #[source]
        source: serde_json::Error,
    },

    /// Record could not be serialized for appending
    #[error("Failed to encode lock journal record: {0}")]
    Encode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(LockError::Conflict.status_code(), 409);
        assert_eq!(LockError::NotFound.status_code(), 404);
        assert_eq!(LockError::Forbidden.status_code(), 403);
        assert_eq!(LockError::MethodNotAllowed.status_code(), 405);
        assert_eq!(LockError::IntegrityFault("x".into()).status_code(), 500);
    }

    #[test]
    fn test_integrity_fault_is_not_a_client_error() {
        assert!(LockError::Forbidden.is_client_error());
        assert!(!LockError::IntegrityFault("x".into()).is_client_error());
    }
}
