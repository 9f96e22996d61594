//! # Game Rental Console Library
//!
//! Core library for the Game Rental console client.
//! `main.rs` parses arguments and hands over to [`run`].
//!
//! ## Module Organization
//! ```text
//! game_rental/
//! ├── lib.rs          ◄─── You are here (startup & shutdown)
//! ├── cli.rs          ◄─── Command-line arguments
//! ├── console.rs      ◄─── Line-oriented input/output
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (database + config)
//! │   ├── config.rs   ◄─── Environment-driven settings
//! │   └── session.rs  ◄─── Logged-in user, authentication, role lookup
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports, sub-menu helper
//! │   ├── menu.rs     ◄─── Main / user menu dispatcher
//! │   └── ...         ◄─── One module per menu area
//! └── error.rs        ◄─── Console error type
//! ```

pub mod cli;
pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use directories::ProjectDirs;
use rental_db::{Database, DbConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Args;
use console::Console;
use state::{AppState, ConfigState};

const GREETING: &str = "\n\n*******************************************************\n\
                        \x20             User Interface\n\
                        *******************************************************\n";

/// Runs the console application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • RENTAL_* environment variables, invalid values are fatal          │
/// │                                                                         │
/// │  2. Determine Database Path ──────────────────────────────────────────► │
/// │     • [DATABASE] argument, else RENTAL_DB_PATH                          │
/// │     • else the platform data directory (game-rental.db)                 │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, one connection                              │
/// │     • Run pending migrations (unless --no-migrate)                      │
/// │                                                                         │
/// │  4. Run Menus ────────────────────────────────────────────────────────► │
/// │     • stdin/stdout console until exit or end of input                   │
/// │                                                                         │
/// │  5. Disconnect ───────────────────────────────────────────────────────► │
/// │     • always, also when the menus fail                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: Args) -> ExitCode {
    info!("Starting Game Rental console");

    let config = match ConfigState::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error - {}", e);
            return ExitCode::FAILURE;
        }
    };

    let db_path = match database_path(args.database) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error - Unable to determine database path: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(?db_path, "Database path determined");

    print!("Connecting to database...");
    let _ = io::stdout().flush();

    let db_config = DbConfig::new(db_path.clone()).run_migrations(!args.no_migrate);
    let db = match Database::new(db_config).await {
        Ok(db) => db,
        Err(e) => {
            println!();
            eprintln!("Error - Unable to Connect to Database: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("Done");

    let app = AppState::new(db, config);

    let outcome = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut console = Console::new(stdin.lock(), stdout.lock());
        match console.say(GREETING) {
            Ok(()) => commands::run_session(&mut console, &app).await,
            Err(e) => Err(e),
        }
    };

    print!("Disconnecting from database...");
    app.db().close().await;
    println!("Done\n\nBye !");

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Console session failed");
            eprintln!("Error - {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Events go to stderr so they never mix with the menus on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `--verbose` - Debug for the rental crates only
/// - Default: WARN level
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,game_rental=debug,rental_db=debug,rental_core=debug,sqlx=warn"
    } else {
        "warn,sqlx=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Resolution Order
/// 1. `explicit` (the `[DATABASE]` argument, which clap already fills from
///    `RENTAL_DB_PATH`)
/// 2. Platform data directory:
///    - **macOS**: `~/Library/Application Support/com.gamerental.game-rental/game-rental.db`
///    - **Windows**: `%APPDATA%\gamerental\game-rental\data\game-rental.db`
///    - **Linux**: `~/.local/share/game-rental/game-rental.db`
pub fn database_path(explicit: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let proj_dirs = ProjectDirs::from("com", "gamerental", "game-rental")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("game-rental.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_database_path_wins() {
        let path = database_path(Some(PathBuf::from("/tmp/rentals.db"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/rentals.db"));
    }
}
