//! # State Module
//!
//! What the menu commands share.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │          AppState            │   │           Session            │   │
//! │  │                              │   │                              │   │
//! │  │  Database (one connection)   │   │  login of the current user   │   │
//! │  │  ConfigState (read-only)     │   │  (only inside the user menu) │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  AppState lives for the whole process and is borrowed by every         │
//! │  command. Session is created by log in and dropped by log out.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{
    ConfigEnv, ConfigError, ConfigState, ProcessEnv, COURIER_ENV, INITIAL_LOCATION_ENV,
    RECENT_ORDERS_ENV,
};
pub use session::Session;

use rental_db::Database;

/// Store handle plus configuration.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Database,
    config: ConfigState,
}

impl AppState {
    pub fn new(db: Database, config: ConfigState) -> Self {
        AppState { db, config }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }
}
