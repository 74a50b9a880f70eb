//! CLI errors

use thiserror::Error;

use crate::lock::JournalError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI failures; all are fatal to the invocation
#[derive(Debug, Error)]
pub enum CliError {
    /// Lock journal could not be opened or replayed
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Lock store failure
    #[error("Lock store error: {0}")]
    Store(String),

    /// Async runtime could not be created
    #[error("Failed to create runtime: {0}")]
    Runtime(String),

    /// HTTP server failed
    #[error("Server error: {0}")]
    Server(String),
}
