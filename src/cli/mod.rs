//! CLI module for draftlock
//!
//! - serve: start the HTTP server (journal-backed or in-memory locks)
//! - check: verify a lock journal replays cleanly

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, run, run_command, serve};
pub use errors::{CliError, CliResult};
