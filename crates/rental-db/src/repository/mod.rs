//! # Repository Module
//!
//! Typed store access for the console commands.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Console command                                                       │
//! │       │                                                                 │
//! │       │  db.catalog().names_by_genre("Puzzle")                         │
//! │       ▼                                                                 │
//! │  ┌────────────────┐ ┌────────────────┐ ┌───────────────┐ ┌──────────┐ │
//! │  │ UserRepository │ │CatalogRepository│ │OrderRepository│ │ Tracking │ │
//! │  │ create / find  │ │ filters / sort  │ │ place_order   │ │ find /   │ │
//! │  │ update         │ │ update          │ │ history       │ │ update   │ │
//! │  └────────────────┘ └────────────────┘ └───────────────┘ └──────────┘ │
//! │       │                                                                 │
//! │       │  Fixed SQL, bound parameters                                   │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Accounts, credentials and roles
//! - [`CatalogRepository`](catalog::CatalogRepository) - Game catalog queries and edits
//! - [`OrderRepository`](order::OrderRepository) - Rental order transaction and history
//! - [`TrackingRepository`](tracking::TrackingRepository) - Shipment tracking records

pub mod catalog;
pub mod order;
pub mod tracking;
pub mod user;
