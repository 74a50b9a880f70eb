//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use crate::http_server::{AppState, HttpServer, HttpServerConfig};
use crate::lock::{InMemoryLockStore, JournalLockStore, LockStore};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Dispatch a parsed command.
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            data_dir,
            host,
            port,
        } => serve(data_dir.as_deref(), &host, port),
        Command::Check { data_dir } => check(&data_dir),
    }
}

/// Start the HTTP server, with a journal-backed lock store when a data
/// directory is given.
pub fn serve(data_dir: Option<&Path>, host: &str, port: u16) -> CliResult<()> {
    let locks: Arc<dyn LockStore> = match data_dir {
        Some(dir) => Arc::new(JournalLockStore::open(dir)?),
        None => Arc::new(InMemoryLockStore::new()),
    };

    let state = Arc::new(AppState::new(locks));
    let config = HttpServerConfig::with_addr(host, port);
    let server = HttpServer::with_config(config, state);

    let rt = tokio::runtime::Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;
    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    })
}

/// Replay the journal and report how many locks are currently held.
/// Corruption fails the command.
pub fn check(data_dir: &Path) -> CliResult<()> {
    let store = JournalLockStore::open(data_dir)?;
    let held = store.len().map_err(|e| CliError::Store(e.to_string()))?;

    let path = store.path().display().to_string();
    let count = held.to_string();
    Logger::info("JOURNAL_OK", &[("held_locks", &count), ("path", &path)]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_check_accepts_fresh_journal() {
        let dir = tempfile::tempdir().unwrap();
        check(dir.path()).unwrap();
    }

    #[test]
    fn test_check_reports_replayed_locks() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JournalLockStore::open(dir.path()).unwrap();
            store.create(Uuid::new_v4(), Uuid::new_v4()).unwrap();
        }
        check(dir.path()).unwrap();
    }
}
