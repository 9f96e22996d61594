//! # Validation Module
//!
//! Input validation for everything typed at the console before it is written
//! to the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console prompt                                               │
//! │  └── Trimming, numeric parsing, yes/no normalization                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (lengths, ranges, formats)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── PRIMARY KEY / UNIQUE constraints                                  │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rental_core::validation::{validate_login, validate_quantity};
//!
//! validate_login("alice").unwrap();
//! validate_quantity(2).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_LOGIN_LENGTH: usize = 50;
const MAX_TEXT_LENGTH: usize = 500;

// =============================================================================
// Account Validators
// =============================================================================

/// Validates a login name.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - No whitespace (logins are typed back at the login prompt)
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_login;
///
/// assert!(validate_login("alice").is_ok());
/// assert!(validate_login("").is_err());
/// assert!(validate_login("two words").is_err());
/// ```
pub fn validate_login(login: &str) -> ValidationResult<()> {
    if login.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if login.chars().count() > MAX_LOGIN_LENGTH {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_LOGIN_LENGTH,
        });
    }

    if login.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a new password.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LENGTH`] characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - 7 to 20 characters
/// - Digits, spaces and `+ - ( )` only
/// - At least 7 digits
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_phone;
///
/// assert!(validate_phone("+1 (951) 555-0100").is_ok());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone number".to_string(),
        });
    }

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone number".to_string(),
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone number".to_string(),
            reason: "must contain only digits, spaces and + - ( )".to_string(),
        });
    }

    if phone.chars().filter(char::is_ascii_digit).count() < 7 {
        return Err(ValidationError::TooShort {
            field: "phone number".to_string(),
            min: 7,
        });
    }

    Ok(())
}

/// Parses an overdue-games count.
///
/// ## Rules
/// - A non-negative integer
pub fn parse_overdue_count(input: &str) -> ValidationResult<i64> {
    let count: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "overdue games".to_string(),
            reason: "must be a whole number".to_string(),
        })?;

    if count < 0 {
        return Err(ValidationError::OutOfRange {
            field: "overdue games".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(count)
}

// =============================================================================
// Catalog / Tracking Validators
// =============================================================================

/// Validates a free-text field (game name, genre, status, ...).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 500 characters
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Order Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates order size (number of distinct games).
///
/// ## Rules
/// - Must not exceed MAX_ORDER_ITEMS (100)
pub fn validate_order_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "order items".to_string(),
            min: 0,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
