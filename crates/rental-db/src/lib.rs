//! # rental-db: Database Layer for Game Rental
//!
//! This crate provides store access for the rental console.
//! It uses an embedded SQLite file with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Game Rental Data Flow                            │
//! │                                                                         │
//! │  Console command (place order, view catalog, ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rental-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  user.rs      │    │  (embedded)  │  │   │
//! │  │   │               │    │  catalog.rs   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  order.rs     │    │ 001_initial_ │  │   │
//! │  │   │ (1 connection)│    │  tracking.rs  │    │  schema.sql  │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │            ┌───────────────┐                      │   │
//! │  │           └───────────►│   Gateway     │ raw tabular dumps    │   │
//! │  │                        └───────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/game-rental/game-rental.db                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`gateway`] - Untyped `execute` / `query` over bound parameters
//! - [`error`] - Database error types
//! - [`repository`] - Typed repositories (user, catalog, order, tracking)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rental_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/game-rental.db")).await?;
//!
//! let puzzles = db.catalog().names_by_genre("Puzzle").await?;
//! let recent = db.orders().recent_order_ids("alice", 5).await?;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use gateway::{Gateway, Param, Table};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::order::{OrderRepository, PlacedOrder, TrackingDefaults, MAX_ID_ATTEMPTS};
pub use repository::tracking::TrackingRepository;
pub use repository::user::UserRepository;
