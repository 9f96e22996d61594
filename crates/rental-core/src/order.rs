//! # Order Draft
//!
//! The interactive rental order, modelled as an explicit state machine.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────────────┐  add_item   ┌─────────────────┐                  │
//! │   │ CollectingItems │ ──────────► │   ConfirmMore   │                  │
//! │   └─────────────────┘             └────────┬────────┘                  │
//! │            ▲        answer_more(true)      │                           │
//! │            └───────────────────────────────┤                           │
//! │                                            │ answer_more(false)        │
//! │                                            ▼                           │
//! │                                   ┌─────────────────┐   finalize       │
//! │                                   │   Finalizing    │ ──────────► Done │
//! │                                   └─────────────────┘                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft never touches the store. `finalize` freezes it into a
//! [`FinalizedOrder`] that the database layer writes in one transaction.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_order_size, validate_quantity};
use crate::{
    MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS, ORDER_NUMBER_MAX, ORDER_NUMBER_MIN, RENTAL_ORDER_PREFIX,
    RENTAL_PERIOD_DAYS, TRACKING_PREFIX,
};

// =============================================================================
// Draft State
// =============================================================================

/// Where the order workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftState {
    /// Waiting for a game identifier and quantity.
    #[default]
    CollectingItems,
    /// Waiting for the yes/no answer to "buy more games?".
    ConfirmMore,
    /// The customer is done; the draft can be finalized.
    Finalizing,
    /// Frozen into a [`FinalizedOrder`].
    Done,
}

/// Parses the answer to "Do you want to buy more games?".
///
/// Input is trimmed and compared case-insensitively. Anything other than
/// `yes` or `no` yields `None` so the caller can re-prompt.
///
/// ## Example
/// ```rust
/// use rental_core::order::parse_yes_no;
///
/// assert_eq!(parse_yes_no(" YES "), Some(true));
/// assert_eq!(parse_yes_no("no"), Some(false));
/// assert_eq!(parse_yes_no("maybe"), None);
/// ```
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// One distinct game in a draft, with the catalog price frozen when added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub game_id: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl OrderItem {
    /// Unit price × quantity, `None` on overflow.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

fn total_of(items: &[OrderItem]) -> CoreResult<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |acc, item| {
            item.line_total().and_then(|line| acc.checked_add(line))
        })
        .ok_or(CoreError::TotalTooLarge)
}

// =============================================================================
// Order Draft
// =============================================================================

/// An order being assembled at the console.
///
/// ## Invariants
/// - Items are unique by `game_id` (adding the same game merges quantities)
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_ORDER_ITEMS` distinct games
/// - The total price fits in `i64` cents
/// - Items keep insertion order
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    items: Vec<OrderItem>,
    state: DraftState,
}

impl OrderDraft {
    /// Creates an empty draft waiting for its first item.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a game to the draft, or increases its quantity if already present.
    ///
    /// On success the draft moves to [`DraftState::ConfirmMore`].
    ///
    /// ## Errors
    /// - `InvalidDraftState` unless the draft is collecting items
    /// - `Validation` for a quantity outside `1..=999`, including after merging
    /// - `OrderTooLarge` when a new game would exceed `MAX_ORDER_ITEMS`
    /// - `TotalTooLarge` when the order total would overflow
    ///
    /// A rejected item leaves the draft unchanged.
    pub fn add_item(
        &mut self,
        game_id: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> CoreResult<()> {
        self.expect_state(DraftState::CollectingItems, "add an item")?;
        validate_quantity(quantity)?;

        let game_id = game_id.into();
        let mut items = self.items.clone();
        if let Some(item) = items.iter_mut().find(|i| i.game_id == game_id) {
            let merged = item.quantity + quantity;
            if merged > MAX_ITEM_QUANTITY {
                validate_quantity(merged)?;
            }
            item.quantity = merged;
        } else {
            validate_order_size(items.len())
                .map_err(|_| CoreError::OrderTooLarge { max: MAX_ORDER_ITEMS })?;
            items.push(OrderItem {
                game_id,
                quantity,
                unit_price,
            });
        }
        total_of(&items)?;

        self.items = items;
        self.state = DraftState::ConfirmMore;
        Ok(())
    }

    /// Stops collecting and moves straight to [`DraftState::Finalizing`]
    /// with the items gathered so far.
    ///
    /// ## Errors
    /// - `InvalidDraftState` unless the draft is collecting items
    /// - `EmptyOrder` when no item was collected
    pub fn finish_collecting(&mut self) -> CoreResult<DraftState> {
        self.expect_state(DraftState::CollectingItems, "finish collecting")?;
        if self.items.is_empty() {
            return Err(CoreError::EmptyOrder);
        }
        self.state = DraftState::Finalizing;
        Ok(self.state)
    }

    /// Records the answer to "buy more games?".
    ///
    /// ## Returns
    /// The new state: `CollectingItems` for yes, `Finalizing` for no.
    pub fn answer_more(&mut self, more: bool) -> CoreResult<DraftState> {
        self.expect_state(DraftState::ConfirmMore, "answer the buy-more prompt")?;
        self.state = if more {
            DraftState::CollectingItems
        } else {
            DraftState::Finalizing
        };
        Ok(self.state)
    }

    /// Total units across all items (`no_of_games`).
    pub fn total_games(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ unit price × quantity.
    pub fn total_price(&self) -> CoreResult<Money> {
        total_of(&self.items)
    }

    /// Freezes the draft into an order stamped at `ordered_at`.
    ///
    /// ## Errors
    /// - `InvalidDraftState` unless the draft is finalizing
    /// - `EmptyOrder` when no item was collected
    pub fn finalize(&mut self, ordered_at: DateTime<Utc>) -> CoreResult<FinalizedOrder> {
        self.expect_state(DraftState::Finalizing, "finalize")?;
        if self.items.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let order = FinalizedOrder {
            no_of_games: self.total_games(),
            total_price: self.total_price()?,
            ordered_at,
            due_date: due_date(ordered_at),
            items: std::mem::take(&mut self.items),
        };
        self.state = DraftState::Done;
        Ok(order)
    }

    fn expect_state(&self, wanted: DraftState, action: &'static str) -> CoreResult<()> {
        if self.state != wanted {
            return Err(CoreError::InvalidDraftState {
                current: self.state,
                action,
            });
        }
        Ok(())
    }
}

/// `ordered_at + RENTAL_PERIOD_DAYS`, exactly.
pub fn due_date(ordered_at: DateTime<Utc>) -> DateTime<Utc> {
    ordered_at + Duration::days(RENTAL_PERIOD_DAYS)
}

// =============================================================================
// Finalized Order
// =============================================================================

/// A completed draft, ready to be written by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedOrder {
    pub items: Vec<OrderItem>,
    pub no_of_games: i64,
    pub total_price: Money,
    pub ordered_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

// =============================================================================
// Order Identifiers
// =============================================================================

/// The identifier pair written with every order.
///
/// Both share one random number N in `[ORDER_NUMBER_MIN, ORDER_NUMBER_MAX)`:
/// `gamerentalorder<N>` and `trackingid<N>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIds {
    pub rental_order_id: String,
    pub tracking_id: String,
}

impl OrderIds {
    /// Builds the pair for a given order number.
    pub fn from_number(n: u32) -> Self {
        OrderIds {
            rental_order_id: format!("{RENTAL_ORDER_PREFIX}{n}"),
            tracking_id: format!("{TRACKING_PREFIX}{n}"),
        }
    }

    /// Draws a fresh pair. Uniqueness is checked by the caller.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_number(rng.gen_range(ORDER_NUMBER_MIN..ORDER_NUMBER_MAX))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn collect(draft: &mut OrderDraft, game_id: &str, qty: i64, cents: i64) {
        draft
            .add_item(game_id, qty, Money::from_cents(cents))
            .unwrap();
        draft.answer_more(true).unwrap();
    }

    #[test]
    fn test_totals_for_two_games() {
        let mut draft = OrderDraft::new();
        collect(&mut draft, "gameA", 2, 1000);
        draft.add_item("gameB", 1, Money::from_cents(500)).unwrap();
        assert_eq!(draft.answer_more(false).unwrap(), DraftState::Finalizing);

        let ordered_at = Utc::now();
        let order = draft.finalize(ordered_at).unwrap();

        assert_eq!(order.no_of_games, 3);
        assert_eq!(order.total_price.cents(), 2500);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.due_date - order.ordered_at, Duration::days(30));
        assert_eq!(draft.state(), DraftState::Done);
    }

    #[test]
    fn test_duplicate_game_merges_quantity() {
        let mut draft = OrderDraft::new();
        collect(&mut draft, "gameA", 2, 1000);
        collect(&mut draft, "gameA", 3, 1000);

        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.items()[0].quantity, 5);
        assert_eq!(draft.total_price().unwrap().cents(), 5000);
    }

    #[test]
    fn test_merge_cannot_exceed_max_quantity() {
        let mut draft = OrderDraft::new();
        collect(&mut draft, "gameA", 999, 100);

        let result = draft.add_item("gameA", 1, Money::from_cents(100));
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(draft.items()[0].quantity, 999);
        assert_eq!(draft.state(), DraftState::CollectingItems);
    }

    #[test]
    fn test_rejects_bad_quantity() {
        let mut draft = OrderDraft::new();
        assert!(draft.add_item("gameA", 0, Money::from_cents(100)).is_err());
        assert!(draft.add_item("gameA", 1000, Money::from_cents(100)).is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_state_guards() {
        let mut draft = OrderDraft::new();
        assert!(matches!(
            draft.answer_more(false),
            Err(CoreError::InvalidDraftState { .. })
        ));

        draft.add_item("gameA", 1, Money::from_cents(100)).unwrap();
        assert!(matches!(
            draft.add_item("gameB", 1, Money::from_cents(100)),
            Err(CoreError::InvalidDraftState { .. })
        ));
        assert!(matches!(
            draft.finalize(Utc::now()),
            Err(CoreError::InvalidDraftState { .. })
        ));
    }

    #[test]
    fn test_too_many_distinct_games() {
        let mut draft = OrderDraft::new();
        for i in 0..MAX_ORDER_ITEMS {
            collect(&mut draft, &format!("G-{i}"), 1, 100);
        }

        let result = draft.add_item("one-more", 1, Money::from_cents(100));
        assert!(matches!(result, Err(CoreError::OrderTooLarge { max: 100 })));
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let mut draft = OrderDraft::new();
        let price = Money::from_cents(i64::MAX / 2 + 1);

        let result = draft.add_item("gameA", 2, price);
        assert!(matches!(result, Err(CoreError::TotalTooLarge)));
        assert!(draft.is_empty());
        assert_eq!(draft.state(), DraftState::CollectingItems);

        draft.add_item("gameA", 1, price).unwrap();
        draft.answer_more(true).unwrap();
        let result = draft.add_item("gameB", 1, price);
        assert!(matches!(result, Err(CoreError::TotalTooLarge)));
        assert_eq!(draft.items().len(), 1);

        draft.finish_collecting().unwrap();
        let order = draft.finalize(Utc::now()).unwrap();
        assert_eq!(order.total_price, price);
    }

    #[test]
    fn test_finish_collecting_keeps_items() {
        let mut draft = OrderDraft::new();
        assert!(matches!(
            draft.finish_collecting(),
            Err(CoreError::EmptyOrder)
        ));

        for i in 0..MAX_ORDER_ITEMS {
            collect(&mut draft, &format!("G-{i}"), 1, 100);
        }
        assert!(draft.add_item("one-more", 1, Money::from_cents(100)).is_err());

        assert_eq!(draft.finish_collecting().unwrap(), DraftState::Finalizing);
        let order = draft.finalize(Utc::now()).unwrap();
        assert_eq!(order.items.len(), MAX_ORDER_ITEMS);
        assert_eq!(order.total_price.cents(), 10_000);
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("yes"), Some(true));
        assert_eq!(parse_yes_no("Yes\n"), Some(true));
        assert_eq!(parse_yes_no("NO"), Some(false));
        assert_eq!(parse_yes_no("y"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn test_order_ids_share_number_and_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let ids = OrderIds::generate(&mut rng);
            let n: u32 = ids
                .rental_order_id
                .strip_prefix("gamerentalorder")
                .unwrap()
                .parse()
                .unwrap();
            assert!((5_000..100_000).contains(&n));
            assert_eq!(ids.tracking_id, format!("trackingid{n}"));
        }
    }
}
