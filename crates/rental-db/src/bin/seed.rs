//! # Seed Data Generator
//!
//! Populates a store with a demo catalog and one account per role.
//!
//! ## Usage
//! ```bash
//! # Seed ./game_rental_dev.db
//! cargo run -p rental-db --bin seed
//!
//! # Specify database path
//! cargo run -p rental-db --bin seed -- --db ./data/game-rental.db
//! ```
//!
//! ## Generated Data
//! - Catalog: `{GENRE}-{INDEX}` game IDs across several genres,
//!   prices between $1.99 and $19.99
//! - Accounts: `customer1`, `employee1`, `manager1`, all with the password
//!   printed at the end of the run

use std::env;

use rental_core::{CatalogEntry, PasswordHash, Role, UserUpdate};
use rental_db::{Database, DbConfig};

/// Demo catalog, grouped by genre code and genre name.
const GENRES: &[(&str, &str, &[&str])] = &[
    (
        "PUZ",
        "Puzzle",
        &["Tetris", "Portal", "Braid", "The Witness", "Baba Is You"],
    ),
    (
        "SHO",
        "Shooter",
        &["Doom", "Halo", "Quake", "Half-Life", "Titanfall"],
    ),
    (
        "RPG",
        "RPG",
        &["Chrono Trigger", "Final Fantasy VII", "Baldur's Gate", "Skyrim", "Persona 5"],
    ),
    (
        "RAC",
        "Racing",
        &["Mario Kart", "Gran Turismo", "Forza Horizon", "F-Zero", "Burnout"],
    ),
    (
        "PLT",
        "Platformer",
        &["Super Mario Bros", "Celeste", "Hollow Knight", "Sonic", "Rayman"],
    ),
];

/// Demo accounts: (login, role, phone, favorite games).
const ACCOUNTS: &[(&str, Role, &str, &str)] = &[
    ("customer1", Role::Customer, "555-0100", "Tetris, Celeste"),
    ("employee1", Role::Employee, "555-0101", "Doom"),
    ("manager1", Role::Manager, "555-0102", "Skyrim, Portal"),
];

const DEMO_PASSWORD: &str = "rental123";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./game_rental_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Game Rental Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./game_rental_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Game Rental Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.catalog().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} games", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Generating catalog...");

    let mut generated = 0;
    for (genre_idx, (code, genre, titles)) in GENRES.iter().enumerate() {
        for (title_idx, title) in titles.iter().enumerate() {
            let entry = demo_game(code, genre, title, genre_idx * 10 + title_idx);
            if let Err(e) = db.catalog().insert(&entry).await {
                eprintln!("Failed to insert {}: {}", entry.game_id, e);
                continue;
            }
            generated += 1;
        }
    }
    println!("✓ Generated {} games", generated);

    println!();
    println!("Creating accounts...");
    let hash = PasswordHash::new(DEMO_PASSWORD)?;
    for (login, role, phone, favorites) in ACCOUNTS {
        if db.users().exists(login).await? {
            println!("  {} already exists, skipping", login);
            continue;
        }
        db.users().create(login, &hash, phone).await?;
        db.users().update(login, &UserUpdate::Role(*role)).await?;
        db.users().set_favorite_games(login, Some(*favorites)).await?;
        println!("  {} ({})", login, role);
    }

    println!();
    println!("✓ Seed complete! Demo password: {}", DEMO_PASSWORD);

    db.close().await;
    Ok(())
}

/// Builds one demo catalog entry with a deterministic price.
fn demo_game(code: &str, genre: &str, title: &str, seed: usize) -> CatalogEntry {
    // $1.99 - $19.99, always ending in .99
    let price_cents = 199 + ((seed * 7) % 19) as i64 * 100;

    CatalogEntry {
        game_id: format!("{}-{:03}", code, seed),
        game_name: title.to_string(),
        genre: genre.to_string(),
        price_cents,
        description: format!("{} ({})", title, genre),
        image_url: format!(
            "https://images.example.com/{}.png",
            title.to_lowercase().replace(' ', "-")
        ),
    }
}
