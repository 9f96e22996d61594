//! # Order Repository
//!
//! Writes finalized rental orders and reads order history.
//!
//! ## Order Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     place_order (one transaction)                       │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    │                                                                    │
//! │    ├── draw N ──► gamerentalorder<N> / trackingid<N>                   │
//! │    │     └── taken? draw again (at most 16 draws)                      │
//! │    │                                                                    │
//! │    ├── INSERT rental_orders    (games, total, ordered_at, due)         │
//! │    ├── INSERT games_in_order   (one row per distinct game)             │
//! │    └── INSERT tracking_info    (Order Placed, location, courier)       │
//! │    │                                                                    │
//! │  COMMIT ─── any failure ──► ROLLBACK, nothing is left behind           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rental_core::{FinalizedOrder, OrderIds, OrderLineItem, RentalOrder, INITIAL_TRACKING_STATUS};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, error, info};

use crate::error::{DbError, DbResult};

/// Draws allowed before giving up on finding a free order number.
pub const MAX_ID_ATTEMPTS: u32 = 16;

/// Values written into every new tracking record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingDefaults {
    pub current_location: String,
    pub courier_name: String,
}

impl Default for TrackingDefaults {
    fn default() -> Self {
        TrackingDefaults {
            current_location: "Warehouse".to_string(),
            courier_name: "CourierX".to_string(),
        }
    }
}

/// What the console prints after a successful order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub ids: OrderIds,
    pub order: RentalOrder,
}

/// Repository for rental order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Records a finalized order with random identifiers.
    pub async fn place_order(
        &self,
        login: &str,
        order: &FinalizedOrder,
        defaults: &TrackingDefaults,
    ) -> DbResult<PlacedOrder> {
        self.place_order_with(login, order, defaults, || {
            OrderIds::generate(&mut rand::thread_rng())
        })
        .await
    }

    /// Records a finalized order, drawing identifiers from `next_ids`.
    ///
    /// ## Returns
    /// * `Ok(PlacedOrder)` - everything committed
    /// * `Err(IdSpaceExhausted)` - `MAX_ID_ATTEMPTS` draws were all taken
    /// * `Err(ForeignKeyViolation)` - a game or the login does not exist
    ///
    /// On any error the transaction is rolled back.
    pub async fn place_order_with<F>(
        &self,
        login: &str,
        order: &FinalizedOrder,
        defaults: &TrackingDefaults,
        next_ids: F,
    ) -> DbResult<PlacedOrder>
    where
        F: FnMut() -> OrderIds,
    {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        match insert_order(&mut tx, login, order, defaults, next_ids).await {
            Ok(placed) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                info!(
                    rental_order_id = %placed.ids.rental_order_id,
                    tracking_id = %placed.ids.tracking_id,
                    login = %login,
                    games = order.no_of_games,
                    total = %order.total_price,
                    "Rental order placed"
                );
                Ok(placed)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Order rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Every order ID owned by `login`, oldest first.
    pub async fn order_ids_for(&self, login: &str) -> DbResult<Vec<String>> {
        let ids = sqlx::query_scalar(
            r#"
            SELECT rental_order_id
            FROM rental_orders
            WHERE login = ?1
            ORDER BY order_timestamp ASC, rental_order_id ASC
            "#,
        )
        .bind(login)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// The `limit` most recent order IDs owned by `login`, newest first.
    pub async fn recent_order_ids(&self, login: &str, limit: u32) -> DbResult<Vec<String>> {
        let ids = sqlx::query_scalar(
            r#"
            SELECT rental_order_id
            FROM rental_orders
            WHERE login = ?1
            ORDER BY order_timestamp DESC, rental_order_id DESC
            LIMIT ?2
            "#,
        )
        .bind(login)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Gets an order, only if `login` owns it.
    pub async fn find_owned(
        &self,
        rental_order_id: &str,
        login: &str,
    ) -> DbResult<Option<RentalOrder>> {
        let order = sqlx::query_as::<_, RentalOrder>(
            r#"
            SELECT rental_order_id, login, no_of_games, total_price_cents,
                   order_timestamp, due_date
            FROM rental_orders
            WHERE rental_order_id = ?1 AND login = ?2
            "#,
        )
        .bind(rental_order_id)
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Line items of an order.
    pub async fn line_items(&self, rental_order_id: &str) -> DbResult<Vec<OrderLineItem>> {
        let items = sqlx::query_as::<_, OrderLineItem>(
            r#"
            SELECT rental_order_id, game_id, units_ordered
            FROM games_in_order
            WHERE rental_order_id = ?1
            ORDER BY game_id
            "#,
        )
        .bind(rental_order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

async fn ids_taken(tx: &mut Transaction<'_, Sqlite>, ids: &OrderIds) -> DbResult<bool> {
    let taken: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(SELECT 1 FROM rental_orders WHERE rental_order_id = ?1)
            OR EXISTS(SELECT 1 FROM tracking_info WHERE tracking_id = ?2)
        "#,
    )
    .bind(&ids.rental_order_id)
    .bind(&ids.tracking_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(taken)
}

async fn draw_free_ids<F>(tx: &mut Transaction<'_, Sqlite>, mut next_ids: F) -> DbResult<OrderIds>
where
    F: FnMut() -> OrderIds,
{
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let ids = next_ids();
        if !ids_taken(tx, &ids).await? {
            return Ok(ids);
        }
        debug!(attempt, rental_order_id = %ids.rental_order_id, "Order number taken, drawing again");
    }

    Err(DbError::IdSpaceExhausted {
        attempts: MAX_ID_ATTEMPTS,
    })
}

async fn insert_order<F>(
    tx: &mut Transaction<'_, Sqlite>,
    login: &str,
    order: &FinalizedOrder,
    defaults: &TrackingDefaults,
    next_ids: F,
) -> DbResult<PlacedOrder>
where
    F: FnMut() -> OrderIds,
{
    let ids = draw_free_ids(tx, next_ids).await?;

    debug!(rental_order_id = %ids.rental_order_id, items = order.items.len(), "Inserting rental order");

    sqlx::query(
        r#"
        INSERT INTO rental_orders (
            rental_order_id, login, no_of_games, total_price_cents,
            order_timestamp, due_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&ids.rental_order_id)
    .bind(login)
    .bind(order.no_of_games)
    .bind(order.total_price.cents())
    .bind(order.ordered_at)
    .bind(order.due_date)
    .execute(&mut **tx)
    .await?;

    for item in &order.items {
        sqlx::query(
            r#"
            INSERT INTO games_in_order (rental_order_id, game_id, units_ordered)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&ids.rental_order_id)
        .bind(&item.game_id)
        .bind(item.quantity)
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO tracking_info (
            tracking_id, rental_order_id, status, current_location,
            courier_name, last_update_date, additional_comments
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL)
        "#,
    )
    .bind(&ids.tracking_id)
    .bind(&ids.rental_order_id)
    .bind(INITIAL_TRACKING_STATUS)
    .bind(&defaults.current_location)
    .bind(&defaults.courier_name)
    .bind(order.ordered_at)
    .execute(&mut **tx)
    .await?;

    Ok(PlacedOrder {
        order: RentalOrder {
            rental_order_id: ids.rental_order_id.clone(),
            login: login.to_string(),
            no_of_games: order.no_of_games,
            total_price_cents: order.total_price.cents(),
            order_timestamp: order.ordered_at,
            due_date: order.due_date,
        },
        ids,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
