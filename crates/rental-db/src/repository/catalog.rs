//! # Catalog Repository
//!
//! Read-only browsing queries plus manager edits of the game catalog.
//!
//! ## Browsing Queries
//! ```text
//! names_by_genre("Puzzle")      ── exact genre match      → game names
//! names_by_price($4.99)         ── exact price match      → game names
//! list_by_price(LowestFirst)    ── whole catalog, ASC     → entries
//! list_by_price(HighestFirst)   ── whole catalog, DESC    → entries
//! ```

use rental_core::{CatalogEntry, CatalogUpdate, Money, PriceOrder};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Gets a catalog entry by game ID.
    pub async fn get(&self, game_id: &str) -> DbResult<Option<CatalogEntry>> {
        let entry = sqlx::query_as::<_, CatalogEntry>(
            r#"
            SELECT game_id, game_name, genre, price_cents, description, image_url
            FROM catalog
            WHERE game_id = ?1
            "#,
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// True when the game ID is in the catalog.
    pub async fn exists(&self, game_id: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM catalog WHERE game_id = ?1)")
                .bind(game_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Current rental price of a game, `None` when the ID is unknown.
    pub async fn price_of(&self, game_id: &str) -> DbResult<Option<Money>> {
        let cents: Option<i64> =
            sqlx::query_scalar("SELECT price_cents FROM catalog WHERE game_id = ?1")
                .bind(game_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(cents.map(Money::from_cents))
    }

    /// Names of the games in exactly this genre.
    pub async fn names_by_genre(&self, genre: &str) -> DbResult<Vec<String>> {
        debug!(genre = %genre, "Filtering catalog by genre");

        let names = sqlx::query_scalar(
            "SELECT game_name FROM catalog WHERE genre = ?1 ORDER BY game_name",
        )
        .bind(genre)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    /// Names of the games at exactly this price.
    pub async fn names_by_price(&self, price: Money) -> DbResult<Vec<String>> {
        debug!(price = %price, "Filtering catalog by price");

        let names = sqlx::query_scalar(
            "SELECT game_name FROM catalog WHERE price_cents = ?1 ORDER BY game_name",
        )
        .bind(price.cents())
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    /// The whole catalog sorted by price. Ties are broken by name.
    pub async fn list_by_price(&self, order: PriceOrder) -> DbResult<Vec<CatalogEntry>> {
        let sql = match order {
            PriceOrder::LowestFirst => {
                r#"
                SELECT game_id, game_name, genre, price_cents, description, image_url
                FROM catalog
                ORDER BY price_cents ASC, game_name ASC
                "#
            }
            PriceOrder::HighestFirst => {
                r#"
                SELECT game_id, game_name, genre, price_cents, description, image_url
                FROM catalog
                ORDER BY price_cents DESC, game_name ASC
                "#
            }
        };

        let entries = sqlx::query_as::<_, CatalogEntry>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// Inserts a new catalog entry.
    pub async fn insert(&self, entry: &CatalogEntry) -> DbResult<()> {
        debug!(game_id = %entry.game_id, name = %entry.game_name, "Inserting catalog entry");

        sqlx::query(
            r#"
            INSERT INTO catalog (game_id, game_name, genre, price_cents, description, image_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&entry.game_id)
        .bind(&entry.game_name)
        .bind(&entry.genre)
        .bind(entry.price_cents)
        .bind(&entry.description)
        .bind(&entry.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("game ID", &entry.game_id),
            other => other,
        })?;

        Ok(())
    }

    /// Applies one attribute change to a catalog entry.
    ///
    /// ## Errors
    /// * `NotFound` - no game has this ID
    /// * `QueryFailed` - the new price violates `price_cents >= 0`
    pub async fn update(&self, game_id: &str, change: &CatalogUpdate) -> DbResult<()> {
        debug!(game_id = %game_id, field = ?change.field(), "Updating catalog entry");

        let query = match change {
            CatalogUpdate::Name(name) => {
                sqlx::query("UPDATE catalog SET game_name = ?2 WHERE game_id = ?1")
                    .bind(game_id)
                    .bind(name.as_str())
            }
            CatalogUpdate::Genre(genre) => {
                sqlx::query("UPDATE catalog SET genre = ?2 WHERE game_id = ?1")
                    .bind(game_id)
                    .bind(genre.as_str())
            }
            CatalogUpdate::Price(price) => {
                sqlx::query("UPDATE catalog SET price_cents = ?2 WHERE game_id = ?1")
                    .bind(game_id)
                    .bind(price.cents())
            }
            CatalogUpdate::Description(text) => {
                sqlx::query("UPDATE catalog SET description = ?2 WHERE game_id = ?1")
                    .bind(game_id)
                    .bind(text.as_str())
            }
            CatalogUpdate::Image(url) => {
                sqlx::query("UPDATE catalog SET image_url = ?2 WHERE game_id = ?1")
                    .bind(game_id)
                    .bind(url.as_str())
            }
        };

        let result = query.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Game", game_id));
        }

        info!(game_id = %game_id, field = ?change.field(), "Catalog entry updated");
        Ok(())
    }

    /// Counts catalog entries (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
