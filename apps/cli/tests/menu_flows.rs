//! End-to-end menu sessions against an in-memory store.
//!
//! Each test scripts the console input line by line, runs the dispatcher
//! until input ends, then checks both the printed output and the store.

use std::io::Cursor;

use chrono::Utc;
use rental_core::{CatalogEntry, Money, OrderDraft, OrderIds, PasswordHash, Role, UserUpdate};
use rental_db::{Database, DbConfig, TrackingDefaults};

use game_rental::commands::run_session;
use game_rental::console::Console;
use game_rental::state::{AppState, ConfigState};

const PASSWORD: &str = "password1";

async fn setup() -> AppState {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    for (id, name, genre, cents) in [
        ("gameA", "Tetris", "Puzzle", 1000),
        ("gameB", "Braid", "Puzzle", 500),
        ("gameC", "Doom", "Shooter", 1999),
    ] {
        db.catalog()
            .insert(&CatalogEntry {
                game_id: id.to_string(),
                game_name: name.to_string(),
                genre: genre.to_string(),
                price_cents: cents,
                description: String::new(),
                image_url: String::new(),
            })
            .await
            .unwrap();
    }
    AppState::new(db, ConfigState::default())
}

async fn add_user(app: &AppState, login: &str, role: Role) {
    let hash = PasswordHash::new(PASSWORD).unwrap();
    app.db().users().create(login, &hash, "555-0100").await.unwrap();
    if role != Role::Customer {
        app.db()
            .users()
            .update(login, &UserUpdate::Role(role))
            .await
            .unwrap();
    }
}

/// Places one order of `gameA` for `login` with fixed identifiers.
async fn add_order(app: &AppState, login: &str, number: u32) -> OrderIds {
    let mut draft = OrderDraft::new();
    draft.add_item("gameA", 1, Money::from_cents(1000)).unwrap();
    draft.answer_more(false).unwrap();
    let order = draft.finalize(Utc::now()).unwrap();

    app.db()
        .orders()
        .place_order_with(login, &order, &TrackingDefaults::default(), || {
            OrderIds::from_number(number)
        })
        .await
        .unwrap()
        .ids
}

async fn run_script(app: &AppState, script: &[&str]) -> String {
    let mut input = script.join("\n");
    input.push('\n');

    let mut console = Console::new(Cursor::new(input.into_bytes()), Vec::new());
    run_session(&mut console, app).await.unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

fn log_in(login: &str) -> Vec<&str> {
    vec!["2", login, PASSWORD]
}

#[tokio::test]
async fn test_register_then_log_in() {
    let app = setup().await;

    let out = run_script(
        &app,
        &[
            "1", "alice", "secret pass", "555-0199", // create user
            "2", "alice", "wrong pass", // failed log in
            "2", "alice", "secret pass", // log in
            "1", "3", // view phone number
            "20", "9",
        ],
    )
    .await;

    assert!(out.contains("User created successfully!"));
    assert!(out.contains("Login failed. Username or password is incorrect."));
    assert!(out.contains("Phone Number: 555-0199"));
    assert!(out.contains("1. View Profile"));

    let user = app.db().users().find("alice").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "secret pass");
    assert!(user.password_hash.starts_with("$argon2"));
    assert_eq!(user.role, Role::Customer);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;

    let out = run_script(&app, &["1", "alice", "another pass", "555-0123", "9"]).await;

    assert!(out.contains("Username already exists. Please choose a different username."));
    let user = app.db().users().find("alice").await.unwrap().unwrap();
    assert_eq!(user.phone_num, "555-0100");
    assert_eq!(app.db().users().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_registration_writes_nothing() {
    let app = setup().await;

    let out = run_script(&app, &["1", "bob", "short", "555-0123", "9"]).await;

    assert!(out.contains("Invalid input: password must be at least 8 characters"));
    assert!(!app.db().users().exists("bob").await.unwrap());
}

#[tokio::test]
async fn test_menu_input_errors() {
    let app = setup().await;

    let out = run_script(&app, &["abc", "5", "9"]).await;

    assert!(out.contains("Your input is invalid!"));
    assert!(out.contains("Unrecognized choice!"));
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;

    // No log out, no exit: the script simply runs dry inside the user menu.
    let out = run_script(&app, &log_in("alice")).await;
    assert!(out.contains("20. Log out"));
}

#[tokio::test]
async fn test_place_order() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;

    let mut script = log_in("alice");
    script.extend([
        "4", "nope", // unknown game is asked again
        "gameA", "two", "2", // quantity re-prompted
        "maybe", "yes", //
        "gameB", "1", "no", //
        "20", "9",
    ]);
    let out = run_script(&app, &script).await;

    assert!(out.contains("Game not found: nope"));
    assert!(out.contains("Wrong command, say yes or no"));
    assert!(out.contains("The total price of all purchases is: $25.00"));

    let ids = app.db().orders().order_ids_for("alice").await.unwrap();
    assert_eq!(ids.len(), 1);
    assert!(out.contains(&format!("Rental order ID: {}", ids[0])));

    let order = app
        .db()
        .orders()
        .find_owned(&ids[0], "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.no_of_games, 3);
    assert_eq!(order.total_price(), Money::from_cents(2500));
    assert_eq!(order.due_date - order.order_timestamp, chrono::Duration::days(30));
    assert_eq!(app.db().orders().line_items(&ids[0]).await.unwrap().len(), 2);
}

async fn add_game(app: &AppState, id: &str, cents: i64) {
    app.db()
        .catalog()
        .insert(&CatalogEntry {
            game_id: id.to_string(),
            game_name: format!("Game {id}"),
            genre: "Arcade".to_string(),
            price_cents: cents,
            description: String::new(),
            image_url: String::new(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_blank_game_id_abandons_order() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;

    let mut script = log_in("alice");
    script.extend([
        "4", "", // nothing chosen yet
        "4", "gameA", "2", "yes", "", // one game chosen, then abandoned
        "1", "3", // the user menu is still live
        "20", "9",
    ]);
    let out = run_script(&app, &script).await;

    assert_eq!(out.matches("Rental order cancelled.").count(), 2);
    assert!(out.contains("Phone Number: 555-0100"));
    assert!(!out.contains("Rental order ID:"));
    assert!(app.db().orders().order_ids_for("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_total_is_refused() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;
    add_game(&app, "gameX", i64::MAX / 2 + 1).await;

    let mut script = log_in("alice");
    script.extend([
        "4", "gameX", "2", // overflows
        "gameA", "1", "no", //
        "20", "9",
    ]);
    let out = run_script(&app, &script).await;

    assert!(out.contains("Rental order total is too large"));
    assert!(out.contains("The total price of all purchases is: $10.00"));

    let ids = app.db().orders().order_ids_for("alice").await.unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(app.db().orders().line_items(&ids[0]).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_full_order_is_placed_with_chosen_games() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;

    let ids: Vec<String> = (0..=rental_core::MAX_ORDER_ITEMS)
        .map(|i| format!("bulk{i:03}"))
        .collect();
    for id in &ids {
        add_game(&app, id, 100).await;
    }

    let mut script = log_in("alice");
    script.push("4");
    for id in &ids[..rental_core::MAX_ORDER_ITEMS] {
        script.extend([id.as_str(), "1", "yes"]);
    }
    script.extend([ids[rental_core::MAX_ORDER_ITEMS].as_str(), "1"]);
    script.extend(["20", "9"]);
    let out = run_script(&app, &script).await;

    assert!(out.contains(
        "Rental order cannot have more than 100 games. Finishing with the games already chosen."
    ));
    assert!(out.contains("The total price of all purchases is: $100.00"));

    let orders = app.db().orders().order_ids_for("alice").await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(
        app.db().orders().line_items(&orders[0]).await.unwrap().len(),
        rental_core::MAX_ORDER_ITEMS
    );
}

#[tokio::test]
async fn test_browse_catalog() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;

    let mut script = log_in("alice");
    script.extend([
        "3", "1", "Puzzle", // by genre
        "3", "2", "5.00", // by price
        "3", "2", "0.01", // nothing at this price
        "3", "4", // highest first
        "3", "2", "cheap", // not a price
    ]);
    let out = run_script(&app, &script).await;

    assert!(out.contains("Braid\nTetris\n"));
    assert!(out.contains("How much for a game?\nBraid\n"));
    assert!(out.contains("No games found."));
    assert!(out.contains("Doom\t$19.99\nTetris\t$10.00\nBraid\t$5.00\n"));
    assert!(out.contains("Invalid input: price"));
}

#[tokio::test]
async fn test_order_history_is_per_user() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;
    add_user(&app, "bob", Role::Customer).await;
    let alice_order = add_order(&app, "alice", 5001).await;
    add_order(&app, "bob", 5002).await;

    let mut script = log_in("alice");
    script.extend(["5", "7", "gamerentalorder5002", "7", alice_order.rental_order_id.as_str()]);
    script.extend(["8", alice_order.tracking_id.as_str(), "8", "trackingid5002"]);
    let out = run_script(&app, &script).await;

    assert!(out.contains("gamerentalorder5001\n"));
    assert!(!out.contains("gamerentalorder5002\n"));
    assert!(out.contains("No rental order found."));
    assert!(out.contains("\t10.00\ttrackingid5001\nTetris\n"));
    assert!(out.contains("CourierX\tgamerentalorder5001\tWarehouse\tOrder Placed\t"));
    assert!(out.contains("No tracking information found."));
}

#[tokio::test]
async fn test_recent_orders_lists_newest_five() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;
    for n in 5001..=5007 {
        add_order(&app, "alice", n).await;
    }

    let mut script = log_in("alice");
    script.push("6");
    let out = run_script(&app, &script).await;

    assert!(out.contains(
        "gamerentalorder5007\ngamerentalorder5006\ngamerentalorder5005\n\
         gamerentalorder5004\ngamerentalorder5003\n"
    ));
    assert!(!out.contains("gamerentalorder5002\n"));
}

#[tokio::test]
async fn test_customer_cannot_edit() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;
    let ids = add_order(&app, "alice", 5001).await;

    let mut script = log_in("alice");
    script.extend(["10", "9", "11"]);
    let out = run_script(&app, &script).await;

    assert!(out.contains("Only managers can update the catalog."));
    assert!(out.contains("Only employees and managers can update tracking information."));
    assert!(out.contains("Only managers can update users."));
    assert!(!out.contains("Please enter the game ID"));

    let tracking = app.db().tracking().find(&ids.tracking_id).await.unwrap().unwrap();
    assert_eq!(tracking.status, "Order Placed");
}

#[tokio::test]
async fn test_employee_updates_tracking() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;
    add_user(&app, "erin", Role::Employee).await;
    let ids = add_order(&app, "alice", 5001).await;
    let before = app.db().tracking().find(&ids.tracking_id).await.unwrap().unwrap();

    let mut script = log_in("erin");
    script.extend(["9", "trackingid404"]);
    script.extend(["9", ids.tracking_id.as_str(), "1", "Shipped"]);
    let out = run_script(&app, &script).await;

    assert!(out.contains("Tracking record not found: trackingid404"));
    assert!(out.contains("Status updated at"));

    let after = app.db().tracking().find(&ids.tracking_id).await.unwrap().unwrap();
    assert_eq!(after.status, "Shipped");
    assert!(after.last_update_date >= before.last_update_date);
}

#[tokio::test]
async fn test_manager_edits_catalog_and_users() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;
    add_user(&app, "mia", Role::Manager).await;

    let mut script = log_in("mia");
    script.extend(["10", "gameA", "3", "12.50"]); // price
    script.extend(["10", "missing"]);
    script.extend(["11", "alice", "4", "employee"]); // role
    script.extend(["2", "alice", "5", "2"]); // overdue games via update profile
    let out = run_script(&app, &script).await;

    assert!(out.contains("Price updated."));
    assert!(out.contains("Game not found: missing"));
    assert!(out.contains("Role updated."));
    assert!(out.contains("Overdue Games updated."));

    let game = app.db().catalog().get("gameA").await.unwrap().unwrap();
    assert_eq!(game.price_cents, 1250);
    let alice = app.db().users().find("alice").await.unwrap().unwrap();
    assert_eq!(alice.role, Role::Employee);
    assert_eq!(alice.num_overdue_games, 2);
}

#[tokio::test]
async fn test_manager_rename_keeps_session() {
    let app = setup().await;
    add_user(&app, "mia", Role::Manager).await;
    add_user(&app, "alice", Role::Customer).await;
    add_order(&app, "mia", 5001).await;

    let mut script = log_in("mia");
    script.extend(["2", "mia", "3", "alice"]); // taken
    script.extend(["2", "mia", "3", "mia2"]);
    script.extend(["5", "1", "3"]);
    let out = run_script(&app, &script).await;

    assert!(out.contains("login 'alice' already exists"));
    assert!(out.contains("Username updated."));
    assert!(out.contains("gamerentalorder5001\n"));
    assert!(out.contains("Phone Number: 555-0100"));
    assert!(!app.db().users().exists("mia").await.unwrap());
    assert_eq!(
        app.db().orders().order_ids_for("mia2").await.unwrap(),
        vec!["gamerentalorder5001"]
    );
}

#[tokio::test]
async fn test_customer_changes_own_phone_only() {
    let app = setup().await;
    add_user(&app, "alice", Role::Customer).await;

    let mut script = log_in("alice");
    script.extend(["2", "3", "2", "555-0177"]);
    let out = run_script(&app, &script).await;

    // Only two fields are offered, so 3 is redisplayed.
    assert!(out.contains("Unrecognized choice!"));
    assert!(!out.contains("Username?"));
    assert!(out.contains("Phone Number updated."));

    let alice = app.db().users().find("alice").await.unwrap().unwrap();
    assert_eq!(alice.phone_num, "555-0177");
}
