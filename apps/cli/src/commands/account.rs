//! # Account Commands
//!
//! Registration and log in, both reachable from the main menu.

use std::io::{BufRead, Write};

use rental_core::validation::{validate_login, validate_password, validate_phone};
use rental_core::PasswordHash;
use rental_db::DbError;
use tracing::info;

use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::state::{AppState, Session};

const LOGIN_TAKEN: &str = "Username already exists. Please choose a different username.";

/// Registers a new customer account.
///
/// Every value is validated before anything is written; a taken login
/// leaves the store untouched.
pub async fn create_user<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
) -> CliResult<()> {
    let login = console.prompt("Username: ")?.trim().to_string();
    let password = console.prompt("Password: ")?;
    let phone = console.prompt("Phone Number: ")?.trim().to_string();

    validate_login(&login)?;
    validate_password(&password)?;
    validate_phone(&phone)?;

    if app.db().users().exists(&login).await? {
        return console.say(LOGIN_TAKEN);
    }

    let hash = PasswordHash::new(&password)?;
    match app.db().users().create(&login, &hash, &phone).await {
        Ok(_) => {}
        Err(DbError::UniqueViolation { .. }) => return console.say(LOGIN_TAKEN),
        Err(e) => return Err(CliError::Db(e)),
    }

    info!(login = %login, "Account registered");
    console.say("User created successfully!")
}

/// Asks for credentials and opens a session when they match.
pub async fn log_in<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
) -> CliResult<Option<Session>> {
    let username = console.prompt("Please enter your username: ")?.trim().to_string();
    let password = console.prompt("Please enter your password: ")?;

    let session = Session::authenticate(app.db(), &username, &password).await?;
    if session.is_none() {
        console.say("Login failed. Username or password is incorrect.")?;
    }
    Ok(session)
}
