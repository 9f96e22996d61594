//! # Menu Dispatcher
//!
//! ```text
//! ┌──────────────┐  2. Log in (ok)   ┌──────────────────┐
//! │  Menu::Main  │ ─────────────────► │ Menu::User(login)│ ◄─┐ 1..11
//! │  1, 2, 9     │ ◄───────────────── │  1..11, 20       │ ──┘
//! └──────┬───────┘    20. Log out     └──────────────────┘
//!        │ 9. Exit / end of input
//!        ▼
//!      return
//! ```
//!
//! A failing command never ends the session: its message is printed and the
//! current menu is shown again. Only end of input stops the loop.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use super::{account, catalog, history, order, profile, tracking};
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::state::{AppState, Session};

const MAIN_MENU: [&str; 5] = ["MAIN MENU", "---------", "1. Create user", "2. Log in", "9. < EXIT"];

const USER_MENU: [&str; 15] = [
    "MAIN MENU",
    "---------",
    "1. View Profile",
    "2. Update Profile",
    "3. View Catalog",
    "4. Place Rental Order",
    "5. View Full Rental Order History",
    "6. View Past 5 Rental Orders",
    "7. View Rental Order Information",
    "8. View Tracking Information",
    "9. Update Tracking Information",
    "10. Update Catalog",
    "11. Update User",
    ".........................",
    "20. Log out",
];

/// Where the dispatcher is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    Main,
    User(Session),
}

enum Next {
    Stay,
    Go(Menu),
    Exit,
}

/// Runs menus until the user exits or input ends.
///
/// ## Errors
/// Only console write failures escape; command errors are reported inline.
pub async fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
) -> CliResult<()> {
    let mut menu = Menu::Main;

    loop {
        let step = match &mut menu {
            Menu::Main => main_menu(console, app).await,
            Menu::User(session) => user_menu(console, app, session).await,
        };

        match step {
            Ok(Next::Stay) => {}
            Ok(Next::Go(next)) => menu = next,
            Ok(Next::Exit) => return Ok(()),
            Err(CliError::InputClosed) => {
                info!("Input closed, ending session");
                return Ok(());
            }
            Err(CliError::Io(e)) => return Err(CliError::Io(e)),
            Err(err) => {
                debug!(error = %err, "Command failed");
                console.say(err.user_message())?;
            }
        }
    }
}

async fn main_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
) -> CliResult<Next> {
    for line in MAIN_MENU {
        console.say(line)?;
    }

    match console.read_choice()? {
        1 => account::create_user(console, app).await?,
        2 => {
            if let Some(session) = account::log_in(console, app).await? {
                return Ok(Next::Go(Menu::User(session)));
            }
        }
        9 => return Ok(Next::Exit),
        _ => console.say("Unrecognized choice!")?,
    }
    Ok(Next::Stay)
}

async fn user_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &mut Session,
) -> CliResult<Next> {
    for line in USER_MENU {
        console.say(line)?;
    }

    match console.read_choice()? {
        1 => profile::view_profile(console, app, session).await?,
        2 => profile::update_profile(console, app, session).await?,
        3 => catalog::view_catalog(console, app).await?,
        4 => order::place_order(console, app, session).await?,
        5 => history::view_all_orders(console, app, session).await?,
        6 => history::view_recent_orders(console, app, session).await?,
        7 => history::view_order_info(console, app, session).await?,
        8 => tracking::view_tracking_info(console, app, session).await?,
        9 => tracking::update_tracking(console, app, session).await?,
        10 => catalog::update_catalog(console, app, session).await?,
        11 => profile::update_user(console, app, session).await?,
        20 => {
            info!(login = %session.login(), "Logged out");
            return Ok(Next::Go(Menu::Main));
        }
        _ => console.say("Unrecognized choice!")?,
    }
    Ok(Next::Stay)
}
