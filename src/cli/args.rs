//! CLI argument definitions using clap
//!
//! Commands:
//! - draftlock serve [--data-dir <path>] [--host <host>] [--port <port>]
//! - draftlock check --data-dir <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// draftlock - exclusive draft-version edit locking
#[derive(Parser, Debug)]
#[command(name = "draftlock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the draftlock HTTP server
    Serve {
        /// Directory for the durable lock journal; locks are kept in
        /// memory only when omitted
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Host to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = 7171)]
        port: u16,
    },

    /// Verify that a lock journal replays cleanly and report held locks
    Check {
        /// Directory holding the lock journal
        #[arg(long)]
        data_dir: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
