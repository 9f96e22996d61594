//! # Order History Commands
//!
//! Menus 5, 6 and 7. Every lookup is scoped to the logged-in user: an order
//! that belongs to someone else reads as missing.

use std::io::{BufRead, Write};

use rental_db::Param;

use super::print_lines;
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::state::{AppState, Session};

const NO_ORDERS: &str = "No rental orders found.";

const ORDER_SUMMARY_SQL: &str = r#"
    SELECT r.order_timestamp, r.due_date,
           printf('%.2f', r.total_price_cents / 100.0) AS total_price,
           t.tracking_id
    FROM rental_orders r
    INNER JOIN tracking_info t ON t.rental_order_id = r.rental_order_id
    WHERE r.login = ?1 AND r.rental_order_id = ?2
"#;

const ORDER_GAMES_SQL: &str = r#"
    SELECT c.game_name
    FROM games_in_order g
    INNER JOIN catalog c ON c.game_id = g.game_id
    WHERE g.rental_order_id = ?1
    ORDER BY c.game_name
"#;

/// Menu 5: every rental order ID of the user.
pub async fn view_all_orders<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &Session,
) -> CliResult<()> {
    let ids = app.db().orders().order_ids_for(session.login()).await?;
    print_lines(console, &ids, NO_ORDERS)
}

/// Menu 6: the most recent rental order IDs, newest first.
pub async fn view_recent_orders<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &Session,
) -> CliResult<()> {
    let ids = app
        .db()
        .orders()
        .recent_order_ids(session.login(), app.config().recent_orders)
        .await?;
    print_lines(console, &ids, NO_ORDERS)
}

/// Menu 7: timestamp, due date, total and tracking ID of one order, then
/// the names of its games.
pub async fn view_order_info<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &Session,
) -> CliResult<()> {
    let order_id = console.ask("Enter rental order ID:")?.trim().to_string();
    let gateway = app.db().gateway();

    let summary = gateway
        .query(
            ORDER_SUMMARY_SQL,
            &[Param::from(session.login()), Param::from(order_id.as_str())],
        )
        .await?;
    if summary.is_empty() {
        return Err(CliError::NotFound("No rental order found.".to_string()));
    }

    for line in summary.tab_separated() {
        console.say(line)?;
    }

    let games = gateway
        .query(ORDER_GAMES_SQL, &[Param::from(order_id.as_str())])
        .await?;
    for line in games.tab_separated() {
        console.say(line)?;
    }
    Ok(())
}
