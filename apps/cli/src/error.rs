//! # Console Error Type
//!
//! Unified error type for menu commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  Menu choice                                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<(), CliError>                                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store failure? ─── DbError::QueryFailed("...") ───┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad value? ──── ValidationError ────────────── CliError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Dispatcher: prints `user_message()`, logs, redisplays the menu.        │
//! │  InputClosed is the only error that ends the session.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rental_core::{CoreError, ValidationError};
use rental_db::DbError;
use thiserror::Error;

use crate::state::ConfigError;

/// Error returned from console commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A store operation failed
    #[error(transparent)]
    Db(#[from] DbError),

    /// A domain rule rejected the operation
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A value typed at a prompt is invalid
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Environment settings are invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Console read or write failed
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A row the user asked for does not exist (or is not theirs)
    #[error("{0}")]
    NotFound(String),

    /// The current role may not perform this operation
    #[error("{0}")]
    Forbidden(String),

    /// Standard input reached end of file
    #[error("Input closed")]
    InputClosed,
}

impl CliError {
    /// The line printed on the console for this error.
    ///
    /// Store failures are logged here with their cause; the console only
    /// gets a short message.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Db(err) => db_message(err),
            CliError::Core(CoreError::Validation(e)) | CliError::Validation(e) => {
                format!("Invalid input: {}", e)
            }
            CliError::Core(err) => err.to_string(),
            CliError::Config(err) => err.to_string(),
            CliError::Io(err) => {
                tracing::error!("Console I/O failed: {}", err);
                "Console I/O failed".to_string()
            }
            CliError::NotFound(msg) | CliError::Forbidden(msg) => msg.clone(),
            CliError::InputClosed => "Input closed".to_string(),
        }
    }
}

fn db_message(err: &DbError) -> String {
    match err {
        DbError::NotFound { entity, id } => format!("{} not found: {}", entity, id),
        DbError::UniqueViolation { field, value } => {
            format!("{} '{}' already exists", field, value)
        }
        DbError::ConnectionFailed(e) => {
            tracing::error!("Database connection failed: {}", e);
            "Database connection failed".to_string()
        }
        DbError::MigrationFailed(e) => {
            tracing::error!("Database migration failed: {}", e);
            "Database migration failed".to_string()
        }
        DbError::QueryFailed(e) => {
            tracing::error!("Database query failed: {}", e);
            "Database operation failed".to_string()
        }
        DbError::TransactionFailed(e) => {
            tracing::error!("Transaction failed: {}", e);
            "Database transaction failed".to_string()
        }
        DbError::ForeignKeyViolation { message } => {
            tracing::error!("Foreign key violation: {}", message);
            "Invalid reference".to_string()
        }
        DbError::PoolExhausted => "Database connection busy".to_string(),
        DbError::IdSpaceExhausted { attempts } => {
            tracing::error!(attempts = *attempts, "No free rental order number");
            "Could not allocate a rental order number, please try again".to_string()
        }
        DbError::Internal(e) => {
            tracing::error!("Internal database error: {}", e);
            "Database operation failed".to_string()
        }
    }
}

/// Result type for console commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_messages_hide_causes() {
        let err = CliError::from(DbError::QueryFailed("near \"SELEC\": syntax error".into()));
        assert_eq!(err.user_message(), "Database operation failed");

        let err = CliError::from(DbError::duplicate("login", "alice"));
        assert_eq!(err.user_message(), "login 'alice' already exists");
    }

    #[test]
    fn test_validation_message() {
        let err = CliError::from(ValidationError::Required {
            field: "login".into(),
        });
        assert_eq!(err.user_message(), "Invalid input: login is required");

        let err = CliError::from(CoreError::Validation(ValidationError::Required {
            field: "phone number".into(),
        }));
        assert_eq!(err.user_message(), "Invalid input: phone number is required");
    }

    #[test]
    fn test_plain_messages_pass_through() {
        assert_eq!(
            CliError::Forbidden("Only managers can update users.".into()).user_message(),
            "Only managers can update users."
        );
        assert_eq!(
            CliError::Core(CoreError::GameNotFound("G-9".into())).user_message(),
            "Game not found: G-9"
        );
    }
}
