//! # Order Command
//!
//! Menu 4 walks an [`OrderDraft`] through its states:
//!
//! ```text
//! CollectingItems ──(game + units)──► ConfirmMore ──yes──► CollectingItems
//!       │                                  │
//!       │ 100 games                        no
//!       ▼                                  ▼
//!       └──────────────────────────► Finalizing ──(one transaction)──► Done
//! ```
//!
//! Nothing touches the store until the draft is finalized. A blank game ID
//! abandons the draft and returns to the menu.

use std::io::{BufRead, Write};

use chrono::Utc;
use rental_core::order::parse_yes_no;
use rental_core::validation::validate_quantity;
use rental_core::{CoreError, DraftState, OrderDraft, ValidationError};
use tracing::{debug, info};

use crate::console::Console;
use crate::error::CliResult;
use crate::state::{AppState, Session};

/// What the console asked for while collecting an item.
enum Collected {
    Item,
    Abandon,
}

/// Collects items, then writes the order, its line items and its tracking
/// record together.
pub async fn place_order<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &Session,
) -> CliResult<()> {
    let mut draft = OrderDraft::new();

    while draft.state() != DraftState::Finalizing {
        match draft.state() {
            DraftState::CollectingItems => {
                if let Collected::Abandon = collect_item(console, app, &mut draft).await? {
                    info!(login = %session.login(), items = draft.items().len(), "Order abandoned");
                    return console.say("Rental order cancelled.");
                }
            }
            _ => {
                let answer = console.ask("Do you want to buy more games? (yes/no)")?;
                match parse_yes_no(&answer) {
                    Some(more) => {
                        draft.answer_more(more)?;
                    }
                    None => console.say("Wrong command, say yes or no")?,
                }
            }
        }
    }

    let order = draft.finalize(Utc::now())?;
    let placed = app
        .db()
        .orders()
        .place_order(session.login(), &order, &app.config().tracking_defaults)
        .await?;

    console.say(format!("Rental order ID: {}", placed.ids.rental_order_id))?;
    console.say(format!("Tracking ID: {}", placed.ids.tracking_id))?;
    console.say(format!(
        "The total price of all purchases is: {}",
        order.total_price
    ))
}

/// One pass of the CollectingItems state. An unknown game or a rejected
/// quantity leaves the draft where it was, so the item is asked again.
/// A full draft skips straight to finalizing.
async fn collect_item<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    draft: &mut OrderDraft,
) -> CliResult<Collected> {
    let game_id = console
        .ask("Enter the Game ID of the game you want to purchase (blank to cancel)")?
        .trim()
        .to_string();
    if game_id.is_empty() {
        return Ok(Collected::Abandon);
    }

    let Some(price) = app.db().catalog().price_of(&game_id).await? else {
        debug!(game_id = %game_id, "Unknown game in order");
        console.say(CoreError::GameNotFound(game_id).to_string())?;
        return Ok(Collected::Item);
    };

    let units = console.ask_until("Enter units ordered:", parse_units)?;

    match draft.add_item(game_id, units, price) {
        Ok(()) => {}
        Err(CoreError::Validation(e)) => console.say(format!("Invalid input: {}", e))?,
        Err(e @ CoreError::TotalTooLarge) => console.say(e)?,
        Err(e @ CoreError::OrderTooLarge { .. }) => {
            console.say(format!("{}. Finishing with the games already chosen.", e))?;
            draft.finish_collecting()?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(Collected::Item)
}

fn parse_units(input: &str) -> Result<i64, ValidationError> {
    let units = input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "units ordered".to_string(),
            reason: "expected a whole number".to_string(),
        })?;
    validate_quantity(units)?;
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("2").unwrap(), 2);
        assert_eq!(parse_units("999").unwrap(), 999);
        assert!(parse_units("0").is_err());
        assert!(parse_units("1000").is_err());
        assert!(parse_units("two").is_err());
        assert!(parse_units("").is_err());
    }
}
