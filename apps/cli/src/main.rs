//! # Game Rental Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Game Rental Console                              │
//! │                                                                         │
//! │  main.rs ────► args, logging, current-thread runtime                    │
//! │                                                                         │
//! │  lib.rs ─────► config, database, menus, disconnect                      │
//! │                                                                         │
//! │  commands/ ──► create user, log in, catalog, orders, tracking           │
//! │                                                                         │
//! │  state/ ─────► AppState, ConfigState, Session                           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  SQLite database (game-rental.db)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use game_rental::cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    game_rental::init_tracing(args.verbose);

    // One interactive user, one connection: no worker threads needed.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error - Unable to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(game_rental::run(args))
}
