//! # Profile Commands
//!
//! Viewing one's own profile, and the two user editors:
//!
//! ```text
//! Update Profile (2)   customer/employee ──► own password | phone
//!                      manager ──────────► any user: password | phone |
//!                                          username | role | overdue games
//! Update User (11)     manager only ─────► same as the manager branch
//! ```

use std::io::{BufRead, Write};

use rental_core::validation::{
    parse_overdue_count, validate_login, validate_password, validate_phone,
};
use rental_core::{PasswordHash, Role, UserField, UserUpdate};
use tracing::warn;

use super::sub_menu;
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::state::{AppState, Session};

const VIEW_ITEMS: [&str; 3] = ["Favorite Games?", "Number Overdue Games?", "Phone Number?"];

/// Shows one attribute of the logged-in user's profile.
pub async fn view_profile<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &Session,
) -> CliResult<()> {
    let Some(choice) = sub_menu(
        console,
        "Please select which you would like to view?",
        &VIEW_ITEMS,
        Some("Exit"),
    )?
    else {
        return Ok(());
    };

    let user = app
        .db()
        .users()
        .find(session.login())
        .await?
        .ok_or_else(|| CliError::NotFound(format!("No data found for user: {}", session.login())))?;

    match choice {
        0 => match user.fav_games.as_deref().map(str::trim) {
            Some(games) if !games.is_empty() => console.say(games),
            _ => console.say("No favorite games found."),
        },
        1 => console.say(format!("Number of Overdue Games: {}", user.num_overdue_games)),
        _ => console.say(format!("Phone Number: {}", user.phone_num)),
    }
}

/// Menu 2. Managers pick a target user; everyone else edits themselves.
pub async fn update_profile<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &mut Session,
) -> CliResult<()> {
    let role = session.current_role(app.db()).await?;

    if role.is_manager() {
        manage_user(console, app, session).await
    } else {
        let login = session.login().to_string();
        edit_user(console, app, session, &login, &UserField::SELF_SERVICE).await
    }
}

/// Menu 11. Managers only.
pub async fn update_user<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &mut Session,
) -> CliResult<()> {
    let role = session.current_role(app.db()).await?;
    if !role.is_manager() {
        warn!(login = %session.login(), role = %role, "User update denied");
        return Err(CliError::Forbidden("Only managers can update users.".to_string()));
    }

    manage_user(console, app, session).await
}

async fn manage_user<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &mut Session,
) -> CliResult<()> {
    let target = console
        .prompt("Please select the user you would like to change: ")?
        .trim()
        .to_string();

    if !app.db().users().exists(&target).await? {
        return Err(CliError::NotFound(format!("User not found: {}", target)));
    }

    edit_user(console, app, session, &target, &UserField::ALL).await
}

async fn edit_user<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &mut Session,
    target: &str,
    fields: &[UserField],
) -> CliResult<()> {
    let labels: Vec<String> = fields.iter().map(|f| format!("{}?", f.label())).collect();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

    let Some(choice) = sub_menu(
        console,
        "Please select which you would like to change?",
        &labels,
        Some("Exit"),
    )?
    else {
        return Ok(());
    };

    let field = fields[choice];
    let answer = console.ask(&format!(
        "What would you like to change the {} to?",
        field.label().to_lowercase()
    ))?;
    let change = read_user_update(field, &answer)?;

    app.db().users().update(target, &change).await?;

    if let UserUpdate::Login(new_login) = &change {
        if target == session.login() {
            session.rename(new_login.clone());
        }
    }

    console.say(format!("{} updated.", field.label()))
}

/// Validates a typed value for one user attribute.
fn read_user_update(field: UserField, answer: &str) -> CliResult<UserUpdate> {
    let change = match field {
        UserField::Password => {
            validate_password(answer)?;
            UserUpdate::Password(PasswordHash::new(answer)?)
        }
        UserField::PhoneNumber => {
            let phone = answer.trim();
            validate_phone(phone)?;
            UserUpdate::PhoneNumber(phone.to_string())
        }
        UserField::Login => {
            let login = answer.trim();
            validate_login(login)?;
            UserUpdate::Login(login.to_string())
        }
        UserField::Role => UserUpdate::Role(answer.parse::<Role>()?),
        UserField::OverdueGames => UserUpdate::OverdueGames(parse_overdue_count(answer)?),
    };
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_user_update() {
        assert_eq!(
            read_user_update(UserField::Role, " Employee ").unwrap(),
            UserUpdate::Role(Role::Employee)
        );
        assert_eq!(
            read_user_update(UserField::OverdueGames, "3").unwrap(),
            UserUpdate::OverdueGames(3)
        );
        assert_eq!(
            read_user_update(UserField::Login, " bob ").unwrap(),
            UserUpdate::Login("bob".to_string())
        );

        assert!(read_user_update(UserField::Role, "admin").is_err());
        assert!(read_user_update(UserField::OverdueGames, "-1").is_err());
        assert!(read_user_update(UserField::Login, "two words").is_err());
        assert!(read_user_update(UserField::Password, "short").is_err());
    }

    #[test]
    fn test_password_update_is_hashed() {
        let UserUpdate::Password(hash) =
            read_user_update(UserField::Password, "new password").unwrap()
        else {
            panic!("expected a password update");
        };
        assert_ne!(hash.as_str(), "new password");
        assert!(hash.verify("new password"));
    }
}
