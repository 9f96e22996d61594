//! # Tracking Commands
//!
//! Menu 8 shows a shipment of the user's own orders. Menu 9 lets employees
//! and managers edit any shipment.

use std::io::{BufRead, Write};

use rental_core::validation::validate_text;
use rental_core::{TrackingField, TrackingUpdate};
use rental_db::Param;
use tracing::warn;

use super::sub_menu;
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::state::{AppState, Session};

const TRACKING_SQL: &str = r#"
    SELECT t.courier_name, t.rental_order_id, t.current_location, t.status,
           t.last_update_date, t.additional_comments
    FROM tracking_info t
    INNER JOIN rental_orders r ON r.rental_order_id = t.rental_order_id
    WHERE r.login = ?1 AND t.tracking_id = ?2
"#;

/// Menu 8.
pub async fn view_tracking_info<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &Session,
) -> CliResult<()> {
    let tracking_id = console.ask("Enter tracking ID:")?.trim().to_string();

    let table = app
        .db()
        .gateway()
        .query(
            TRACKING_SQL,
            &[Param::from(session.login()), Param::from(tracking_id.as_str())],
        )
        .await?;
    if table.is_empty() {
        return Err(CliError::NotFound(
            "No tracking information found.".to_string(),
        ));
    }

    for line in table.tab_separated() {
        console.say(line)?;
    }
    Ok(())
}

/// Menu 9: change one field of a tracking record. Employees and managers.
pub async fn update_tracking<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &AppState,
    session: &Session,
) -> CliResult<()> {
    let role = session.current_role(app.db()).await?;
    if !role.can_edit_tracking() {
        warn!(login = %session.login(), role = %role, "Tracking update denied");
        return Err(CliError::Forbidden(
            "Only employees and managers can update tracking information.".to_string(),
        ));
    }

    let tracking_id = console
        .ask("Please enter the tracking ID of the order you want to change")?
        .trim()
        .to_string();
    if !app.db().tracking().exists(&tracking_id).await? {
        return Err(CliError::NotFound(format!(
            "Tracking record not found: {}",
            tracking_id
        )));
    }

    let labels: Vec<String> = TrackingField::ALL
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

    let field = TrackingField::ALL[choice];
    let value = console
        .ask(&format!("What would you like to change the {} to?", field.label()))?
        .trim()
        .to_string();
    validate_text(field.label(), &value)?;

    let stamped = app
        .db()
        .tracking()
        .update(&tracking_id, &TrackingUpdate { field, value })
        .await?;

    console.say(format!(
        "{} updated at {}.",
        field.label(),
        stamped.format("%Y-%m-%d %H:%M:%S")
    ))
}
