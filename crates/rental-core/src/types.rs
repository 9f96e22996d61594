//! # Domain Types
//!
//! Core domain types used throughout Game Rental.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  CatalogEntry   │   │  RentalOrder    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  login (PK)     │   │  game_id (PK)   │   │  rental_order_id│       │
//! │  │  password_hash  │   │  genre          │   │  login (FK)     │       │
//! │  │  role           │   │  price_cents    │   │  due_date       │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ 1:N    1:1    │
//! │                        ┌─────────────────┐   ┌────────┴────────┐       │
//! │                        │ OrderLineItem   │   │ TrackingRecord  │       │
//! │                        │  game_id (FK)   │   │  status         │       │
//! │                        │  units_ordered  │   │  last_update    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::password::PasswordHash;

// =============================================================================
// Role
// =============================================================================

/// Privilege level of an account.
///
/// ## Gates
/// ```text
/// Customer  ── own profile, catalog, own orders
/// Employee  ── + tracking updates
/// Manager   ── + tracking, catalog and user updates
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Employee,
    Manager,
}

impl Role {
    /// All roles, in privilege order.
    pub const ALL: [Role; 3] = [Role::Customer, Role::Employee, Role::Manager];

    /// The lowercase spelling stored in the `users.role` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    /// Managers may edit the catalog and other users.
    #[inline]
    pub const fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }

    /// Employees and managers may edit tracking records.
    #[inline]
    pub const fn can_edit_tracking(&self) -> bool {
        matches!(self, Role::Employee | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, whitespace-tolerant parse (`" Manager "` is a manager).
impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            })
    }
}

impl TryFrom<String> for Role {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// Loaded through a raw row in rental-db so that an unrecognized stored role
/// degrades to [`Role::Customer`] instead of failing the read.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique login name.
    pub login: String,

    /// argon2 PHC string, never the plaintext password.
    pub password_hash: String,

    pub role: Role,

    /// Free-text list of favorite games.
    pub fav_games: Option<String>,

    pub phone_num: String,

    pub num_overdue_games: i64,
}

// Keep the hash out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("login", &self.login)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .field("fav_games", &self.fav_games)
            .field("phone_num", &self.phone_num)
            .field("num_overdue_games", &self.num_overdue_games)
            .finish()
    }
}

/// Profile attributes a manager (or the owner) can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Password,
    PhoneNumber,
    Login,
    Role,
    OverdueGames,
}

impl UserField {
    /// The fields an account owner may change on their own profile.
    pub const SELF_SERVICE: [UserField; 2] = [UserField::Password, UserField::PhoneNumber];

    /// Every field, as offered to managers.
    pub const ALL: [UserField; 5] = [
        UserField::Password,
        UserField::PhoneNumber,
        UserField::Login,
        UserField::Role,
        UserField::OverdueGames,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            UserField::Password => "Password",
            UserField::PhoneNumber => "Phone Number",
            UserField::Login => "Username",
            UserField::Role => "Role",
            UserField::OverdueGames => "Overdue Games",
        }
    }
}

/// A single-attribute change to a user, with its already-validated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserUpdate {
    Password(PasswordHash),
    PhoneNumber(String),
    Login(String),
    Role(Role),
    OverdueGames(i64),
}

impl UserUpdate {
    pub fn field(&self) -> UserField {
        match self {
            UserUpdate::Password(_) => UserField::Password,
            UserUpdate::PhoneNumber(_) => UserField::PhoneNumber,
            UserUpdate::Login(_) => UserField::Login,
            UserUpdate::Role(_) => UserField::Role,
            UserUpdate::OverdueGames(_) => UserField::OverdueGames,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A game available for rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CatalogEntry {
    pub game_id: String,
    pub game_name: String,
    pub genre: String,
    /// Rental price in cents (non-negative).
    pub price_cents: i64,
    pub description: String,
    pub image_url: String,
}

impl CatalogEntry {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Catalog attributes a manager can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    Name,
    Genre,
    Price,
    Description,
    Image,
}

impl CatalogField {
    pub const ALL: [CatalogField; 5] = [
        CatalogField::Name,
        CatalogField::Genre,
        CatalogField::Price,
        CatalogField::Description,
        CatalogField::Image,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            CatalogField::Name => "Game Name",
            CatalogField::Genre => "Genre",
            CatalogField::Price => "Price",
            CatalogField::Description => "Description",
            CatalogField::Image => "Image",
        }
    }
}

/// A single-attribute change to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogUpdate {
    Name(String),
    Genre(String),
    Price(Money),
    Description(String),
    Image(String),
}

impl CatalogUpdate {
    pub fn field(&self) -> CatalogField {
        match self {
            CatalogUpdate::Name(_) => CatalogField::Name,
            CatalogUpdate::Genre(_) => CatalogField::Genre,
            CatalogUpdate::Price(_) => CatalogField::Price,
            CatalogUpdate::Description(_) => CatalogField::Description,
            CatalogUpdate::Image(_) => CatalogField::Image,
        }
    }
}

/// Sort direction for full catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrder {
    LowestFirst,
    HighestFirst,
}

// =============================================================================
// Rental Order
// =============================================================================

/// One completed rental purchase. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RentalOrder {
    pub rental_order_id: String,
    pub login: String,
    /// Sum of `units_ordered` over the line items.
    pub no_of_games: i64,
    /// Sum of unit price × quantity, in cents.
    pub total_price_cents: i64,
    pub order_timestamp: DateTime<Utc>,
    /// Always `order_timestamp + RENTAL_PERIOD_DAYS`.
    pub due_date: DateTime<Utc>,
}

impl RentalOrder {
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// A game inside a rental order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLineItem {
    pub rental_order_id: String,
    pub game_id: String,
    pub units_ordered: i64,
}

// =============================================================================
// Tracking
// =============================================================================

/// Shipment status of a rental order (one-to-one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TrackingRecord {
    pub tracking_id: String,
    pub rental_order_id: String,
    pub status: String,
    pub current_location: String,
    pub courier_name: String,
    pub last_update_date: DateTime<Utc>,
    pub additional_comments: Option<String>,
}

/// Tracking attributes an employee or manager can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingField {
    Status,
    CurrentLocation,
    CourierName,
    AdditionalComments,
}

impl TrackingField {
    pub const ALL: [TrackingField; 4] = [
        TrackingField::Status,
        TrackingField::CurrentLocation,
        TrackingField::CourierName,
        TrackingField::AdditionalComments,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            TrackingField::Status => "Status",
            TrackingField::CurrentLocation => "Current Location",
            TrackingField::CourierName => "Courier Name",
            TrackingField::AdditionalComments => "Additional Comments",
        }
    }
}

/// A single-attribute change to a tracking record. Every variant is text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingUpdate {
    pub field: TrackingField,
    pub value: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
