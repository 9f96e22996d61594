//! # Catalog Commands
//!
//! Browsing for everyone, editing for managers.

use std::io::{BufRead, Write};

use rental_core::validation::validate_text;
use rental_core::{CatalogField, CatalogUpdate, Money, PriceOrder};
use tracing::warn;

use super::{print_lines, sub_menu};
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::state::{AppState, Session};

const NO_GAMES: &str = "No games found.";

const BROWSE_ITEMS: [&str; 4] = [
    "Genre",
    "Price",
    "Lowest to Highest Price",
    "Highest to Lowest Price",
];

/// Menu 3: one catalog view chosen from a sub-menu.
pub async fn view_catalog<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
) -> CliResult<()> {
    let catalog = app.db().catalog();

    let Some(choice) = sub_menu(console, "How would you like to view Catalog", &BROWSE_ITEMS, None)?
    else {
        return Ok(());
    };

    match choice {
        0 => {
            let genre = console.ask("What's the name of the genre?")?;
            let names = catalog.names_by_genre(genre.trim()).await?;
            print_lines(console, &names, NO_GAMES)
        }
        1 => {
            let answer = console.ask("How much for a game?")?;
            let price = Money::parse(&answer)?;
            let names = catalog.names_by_price(price).await?;
            print_lines(console, &names, NO_GAMES)
        }
        _ => {
            let order = if choice == 2 {
                PriceOrder::LowestFirst
            } else {
                PriceOrder::HighestFirst
            };
            let lines: Vec<String> = catalog
                .list_by_price(order)
                .await?
                .iter()
                .map(|game| format!("{}\t{}", game.game_name, game.price()))
                .collect();
            print_lines(console, &lines, NO_GAMES)
        }
    }
}

/// Menu 10: change one attribute of a catalog entry. Managers only.
pub async fn update_catalog<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &Session,
) -> CliResult<()> {
    let role = session.current_role(app.db()).await?;
    if !role.is_manager() {
        warn!(login = %session.login(), role = %role, "Catalog update denied");
        return Err(CliError::Forbidden(
            "Only managers can update the catalog.".to_string(),
        ));
    }

    let game_id = console
        .ask("Please enter the game ID of the game you want to change")?
        .trim()
        .to_string();
    if !app.db().catalog().exists(&game_id).await? {
        return Err(CliError::NotFound(format!("Game not found: {}", game_id)));
    }

    let labels: Vec<String> = CatalogField::ALL
        .iter()
        .map(|f| format!("{}?", f.label()))
        .collect();
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

    let field = CatalogField::ALL[choice];
    let answer = console.ask(&format!(
        "What would you like to change the game {} to?",
        field.label().to_lowercase()
    ))?;
    let change = read_catalog_update(field, &answer)?;

    app.db().catalog().update(&game_id, &change).await?;
    console.say(format!("{} updated.", field.label()))
}

/// Validates a typed value for one catalog attribute.
fn read_catalog_update(field: CatalogField, answer: &str) -> CliResult<CatalogUpdate> {
    let text = answer.trim();
    let change = match field {
        CatalogField::Price => CatalogUpdate::Price(Money::parse(text)?),
        CatalogField::Name => {
            validate_text("game name", text)?;
            CatalogUpdate::Name(text.to_string())
        }
        CatalogField::Genre => {
            validate_text("genre", text)?;
            CatalogUpdate::Genre(text.to_string())
        }
        CatalogField::Description => {
            validate_text("description", text)?;
            CatalogUpdate::Description(text.to_string())
        }
        CatalogField::Image => {
            validate_text("image", text)?;
            CatalogUpdate::Image(text.to_string())
        }
    };
    Ok(change)
}
