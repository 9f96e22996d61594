//! # rental-core: Pure Domain Logic for Game Rental
//!
//! This crate holds every rule of the rental domain as pure code with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Game Rental Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console (apps/cli)                           │   │
//! │  │    Main menu ──► User menu ──► Editors ──► Order workflow       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │ validation│  │   │
//! │  │   │   User    │  │   Money   │  │ OrderDraft│  │  password │  │   │
//! │  │   │   Role    │  │  parsing  │  │ OrderIds  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CONSOLE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rental-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, CatalogEntry, RentalOrder, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`order`] - The order draft state machine and ID generation
//! - [`password`] - Salted argon2 password hashes
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use rental_core::money::Money;
//! use rental_core::order::OrderDraft;
//!
//! let mut draft = OrderDraft::new();
//! draft.add_item("G-1", 2, Money::from_cents(1000)).unwrap();
//! draft.answer_more(true).unwrap();
//! draft.add_item("G-2", 1, Money::from_cents(500)).unwrap();
//!
//! assert_eq!(draft.total_games(), 3);
//! assert_eq!(draft.total_price().unwrap().cents(), 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod password;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use order::{DraftState, FinalizedOrder, OrderDraft, OrderIds, OrderItem};
pub use password::PasswordHash;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of a rental, counted from the order timestamp.
pub const RENTAL_PERIOD_DAYS: i64 = 30;

/// Maximum distinct games in a single rental order.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum units of a single game in one order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest catalog price accepted from the console, in cents ($1,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Minimum password length accepted at registration and on change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Status written to every tracking record created with an order.
pub const INITIAL_TRACKING_STATUS: &str = "Order Placed";

/// Prefix of generated rental order identifiers.
pub const RENTAL_ORDER_PREFIX: &str = "gamerentalorder";

/// Prefix of generated tracking identifiers.
pub const TRACKING_PREFIX: &str = "trackingid";

/// Inclusive lower bound of the order number draw.
pub const ORDER_NUMBER_MIN: u32 = 5_000;

/// Exclusive upper bound of the order number draw.
pub const ORDER_NUMBER_MAX: u32 = 100_000;
