//! # Tracking Repository
//!
//! Shipment records, one per rental order.
//!
//! Every edit runs two statements in one transaction: the field change and
//! the `last_update_date` stamp.

use chrono::{DateTime, Utc};
use rental_core::{TrackingField, TrackingRecord, TrackingUpdate};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, error, info};

use crate::error::{DbError, DbResult};

/// Repository for tracking database operations.
#[derive(Debug, Clone)]
pub struct TrackingRepository {
    pool: SqlitePool,
}

impl TrackingRepository {
    /// Creates a new TrackingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TrackingRepository { pool }
    }

    /// Gets a tracking record by ID.
    pub async fn find(&self, tracking_id: &str) -> DbResult<Option<TrackingRecord>> {
        let record = sqlx::query_as::<_, TrackingRecord>(
            r#"
            SELECT tracking_id, rental_order_id, status, current_location,
                   courier_name, last_update_date, additional_comments
            FROM tracking_info
            WHERE tracking_id = ?1
            "#,
        )
        .bind(tracking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// True when the tracking ID exists.
    pub async fn exists(&self, tracking_id: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tracking_info WHERE tracking_id = ?1)")
                .bind(tracking_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Changes one field and stamps the record with the current time.
    ///
    /// ## Returns
    /// The stamped `last_update_date`.
    pub async fn update(&self, tracking_id: &str, change: &TrackingUpdate) -> DbResult<DateTime<Utc>> {
        self.update_at(tracking_id, change, Utc::now()).await
    }

    /// Changes one field and stamps the record with `now`.
    ///
    /// ## Errors
    /// * `NotFound` - no record has this tracking ID; nothing is written
    pub async fn update_at(
        &self,
        tracking_id: &str,
        change: &TrackingUpdate,
        now: DateTime<Utc>,
    ) -> DbResult<DateTime<Utc>> {
        debug!(tracking_id = %tracking_id, field = ?change.field, "Updating tracking record");

        let sql = match change.field {
            TrackingField::Status => "UPDATE tracking_info SET status = ?2 WHERE tracking_id = ?1",
            TrackingField::CurrentLocation => {
                "UPDATE tracking_info SET current_location = ?2 WHERE tracking_id = ?1"
            }
            TrackingField::CourierName => {
                "UPDATE tracking_info SET courier_name = ?2 WHERE tracking_id = ?1"
            }
            TrackingField::AdditionalComments => {
                "UPDATE tracking_info SET additional_comments = ?2 WHERE tracking_id = ?1"
            }
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let outcome = apply_change(&mut tx, sql, tracking_id, &change.value, now).await;

        match outcome {
            Ok(()) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
                info!(tracking_id = %tracking_id, field = ?change.field, "Tracking record updated");
                Ok(now)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Tracking rollback failed");
                }
                Err(err)
            }
        }
    }
}

async fn apply_change(
    tx: &mut Transaction<'_, Sqlite>,
    sql: &'static str,
    tracking_id: &str,
    value: &str,
    now: DateTime<Utc>,
) -> DbResult<()> {
    let result = sqlx::query(sql)
        .bind(tracking_id)
        .bind(value)
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Tracking record", tracking_id));
    }

    sqlx::query("UPDATE tracking_info SET last_update_date = ?2 WHERE tracking_id = ?1")
        .bind(tracking_id)
        .bind(now)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::order::TrackingDefaults;
    use crate::{Database, DbConfig};
    use chrono::Duration;
    use rental_core::{CatalogEntry, Money, OrderDraft, PasswordHash};

    async fn setup_with_order() -> (Database, String, DateTime<Utc>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hash = PasswordHash::new("password1").unwrap();
        db.users().create("alice", &hash, "5550100100").await.unwrap();
        db.catalog()
            .insert(&CatalogEntry {
                game_id: "gameA".to_string(),
                game_name: "Tetris".to_string(),
                genre: "Puzzle".to_string(),
                price_cents: 1000,
                description: String::new(),
                image_url: String::new(),
            })
            .await
            .unwrap();

        let ordered_at = Utc::now() - Duration::hours(1);
        let mut draft = OrderDraft::new();
        draft.add_item("gameA", 1, Money::from_cents(1000)).unwrap();
        draft.answer_more(false).unwrap();
        let order = draft.finalize(ordered_at).unwrap();

        let placed = db
            .orders()
            .place_order("alice", &order, &TrackingDefaults::default())
            .await
            .unwrap();
        (db, placed.ids.tracking_id, ordered_at)
    }

    fn change(field: TrackingField, value: &str) -> TrackingUpdate {
        TrackingUpdate {
            field,
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_status_update_stamps_time() {
        let (db, tracking_id, ordered_at) = setup_with_order().await;

        let before = Utc::now();
        let stamped = db
            .tracking()
            .update(&tracking_id, &change(TrackingField::Status, "Shipped"))
            .await
            .unwrap();
        let after = Utc::now();

        let record = db.tracking().find(&tracking_id).await.unwrap().unwrap();
        assert_eq!(record.status, "Shipped");
        assert_eq!(record.last_update_date, stamped);
        assert!(before <= stamped && stamped <= after);
        assert!(record.last_update_date > ordered_at);
    }

    #[tokio::test]
    async fn test_each_field() {
        let (db, tracking_id, _) = setup_with_order().await;
        let tracking = db.tracking();

        tracking
            .update(&tracking_id, &change(TrackingField::CurrentLocation, "Riverside"))
            .await
            .unwrap();
        tracking
            .update(&tracking_id, &change(TrackingField::CourierName, "UPS"))
            .await
            .unwrap();
        tracking
            .update(&tracking_id, &change(TrackingField::AdditionalComments, "Leave at door"))
            .await
            .unwrap();

        let record = tracking.find(&tracking_id).await.unwrap().unwrap();
        assert_eq!(record.current_location, "Riverside");
        assert_eq!(record.courier_name, "UPS");
        assert_eq!(record.additional_comments.as_deref(), Some("Leave at door"));
        assert_eq!(record.status, "Order Placed");
    }

    #[tokio::test]
    async fn test_unknown_tracking_id() {
        let (db, _, _) = setup_with_order().await;

        assert!(!db.tracking().exists("trackingid1").await.unwrap());
        let err = db
            .tracking()
            .update("trackingid1", &change(TrackingField::Status, "Lost"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // The pool is usable again after the rollback.
        assert!(db.health_check().await);
    }
}
