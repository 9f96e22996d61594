//! # Console Commands
//!
//! One function per menu entry.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports, sub-menu helper)
//! ├── menu.rs      ◄─── Main / user menu dispatcher
//! ├── account.rs   ◄─── Create user, log in
//! ├── profile.rs   ◄─── View profile, update profile, update user
//! ├── catalog.rs   ◄─── Browse catalog, update catalog
//! ├── order.rs     ◄─── Place rental order
//! ├── history.rs   ◄─── Order history and order information
//! └── tracking.rs  ◄─── View and update tracking information
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  menu::run_session                                                      │
//! │         │  read_choice() == 3                                           │
//! │         ▼                                                               │
//! │  catalog::view_catalog(                                                 │
//! │      console: &mut Console<R, W>,  ◄── prompts and output               │
//! │      app: &AppState,               ◄── Database + ConfigState           │
//! │  ) -> CliResult<()>                                                     │
//! │         │                                                               │
//! │         │ Err(e)                                                        │
//! │         ▼                                                               │
//! │  dispatcher prints e.user_message() and redisplays the menu             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that need the logged-in user also take a `Session`.

pub mod account;
pub mod catalog;
pub mod history;
pub mod menu;
pub mod order;
pub mod profile;
pub mod tracking;

pub use menu::{run_session, Menu};

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::CliResult;

/// Menu entry that leaves a sub-menu.
pub const EXIT_CHOICE: i64 = 9;

/// Shows a numbered sub-menu until a listed number is chosen.
///
/// Items are numbered from 1. When `exit` is given it is listed as `9.`
/// and choosing it returns `None`.
pub(crate) fn sub_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    title: &str,
    items: &[&str],
    exit: Option<&str>,
) -> CliResult<Option<usize>> {
    loop {
        console.say(title)?;
        for (i, item) in items.iter().enumerate() {
            console.say(format!("{}. {}", i + 1, item))?;
        }
        if let Some(exit) = exit {
            console.say(format!("{}. {}", EXIT_CHOICE, exit))?;
        }

        let choice = console.read_choice()?;
        if exit.is_some() && choice == EXIT_CHOICE {
            return Ok(None);
        }
        if let Some(index) = usize::try_from(choice)
            .ok()
            .filter(|n| (1..=items.len()).contains(n))
        {
            return Ok(Some(index - 1));
        }
        console.say("Unrecognized choice!")?;
    }
}

/// Prints each value on its own line, or `empty` when there are none.
pub(crate) fn print_lines<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    lines: &[String],
    empty: &str,
) -> CliResult<()> {
    if lines.is_empty() {
        return console.say(empty);
    }
    for line in lines {
        console.say(line)?;
    }
    Ok(())
}
