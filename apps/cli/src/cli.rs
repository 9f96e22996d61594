//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Menu-driven console for renting games.
#[derive(Parser, Debug)]
#[command(name = "game-rental", author, version, about)]
pub struct Args {
    /// Path to the SQLite database file.
    #[arg(env = "RENTAL_DB_PATH")]
    pub database: Option<PathBuf>,

    /// Log debug events from the rental crates to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Open the store without applying pending migrations.
    #[arg(long)]
    pub no_migrate: bool,
}
