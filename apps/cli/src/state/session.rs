//! # Session
//!
//! The authenticated login of the console. A session exists only after a
//! successful log in; the main menu has none.
//!
//! The role is not cached: each editing menu asks the store once on entry,
//! so a role change by a manager applies on the next menu choice.

use rental_core::{PasswordHash, Role};
use rental_db::Database;
use tracing::{debug, info, warn};

use crate::error::CliResult;

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    login: String,
}

impl Session {
    pub fn new(login: impl Into<String>) -> Self {
        Session {
            login: login.into(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Follows a rename of the logged-in account.
    pub fn rename(&mut self, new_login: impl Into<String>) {
        self.login = new_login.into();
    }

    /// Checks a claimed password against the stored hash.
    ///
    /// ## Returns
    /// * `Some(Session)` - the pair matches
    /// * `None` - unknown login or wrong password (indistinguishable)
    pub async fn authenticate(
        db: &Database,
        username: &str,
        password: &str,
    ) -> CliResult<Option<Session>> {
        debug!(login = %username, "Authenticating");

        let Some(user) = db.users().find(username).await? else {
            warn!(login = %username, "Log in for unknown user");
            return Ok(None);
        };

        if !PasswordHash::from_phc(user.password_hash).verify(password) {
            warn!(login = %username, "Log in with wrong password");
            return Ok(None);
        }

        info!(login = %user.login, "Logged in");
        Ok(Some(Session::new(user.login)))
    }

    /// The role currently stored for this login.
    ///
    /// A login that vanished from the store counts as a customer.
    pub async fn current_role(&self, db: &Database) -> CliResult<Role> {
        match db.users().role_of(&self.login).await? {
            Some(role) => Ok(role),
            None => {
                warn!(login = %self.login, "Session user not found, treating as customer");
                Ok(Role::Customer)
            }
        }
    }
}
