//! Command-line interface for beatstore.

use clap::{Parser, Subcommand};

/// Beatstore - beat marketplace backend
#[derive(Parser)]
#[command(name = "beatstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Apply migrations and run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
