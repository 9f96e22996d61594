//! # Error Types
//!
//! Domain-specific error types for rental-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rental-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rental-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── CliError         - What the dispatcher reports                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → console message        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These represent rule violations in the rental domain. The console layer
/// turns them into user-facing messages and returns to the menu.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Game identifier is not in the catalog.
    #[error("Game not found: {0}")]
    GameNotFound(String),

    /// The order draft is not in a state that allows the requested step.
    ///
    /// ## When This Occurs
    /// - Adding an item while the draft waits for a yes/no answer
    /// - Finalizing a draft that is still collecting items
    #[error("Order draft is {current:?}, cannot {action}")]
    InvalidDraftState {
        current: crate::order::DraftState,
        action: &'static str,
    },

    /// An order must contain at least one game.
    #[error("Rental order has no games")]
    EmptyOrder,

    /// Order has exceeded the maximum number of distinct games.
    #[error("Rental order cannot have more than {max} games")]
    OrderTooLarge { max: usize },

    /// Price × quantity, or the order sum, does not fit in cents.
    #[error("Rental order total is too large")]
    TotalTooLarge,

    /// Password hashing failed (should not happen with valid parameters).
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when console input doesn't meet requirements.
/// Used for early validation before anything reaches the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., existing login).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
