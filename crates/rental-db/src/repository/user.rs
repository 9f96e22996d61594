//! # User Repository
//!
//! Accounts, credentials and roles.
//!
//! ## Account Lifecycle
//! ```text
//! create(login, hash, phone) ──► role = customer, overdue = 0
//!          │
//!          ▼
//! update(login, UserUpdate) ──► password / phone   (owner or manager)
//!                               login / role / overdue (manager)
//! ```
//!
//! Accounts are never deleted. Renaming a login cascades to the owner
//! column of `rental_orders`.

use rental_core::{PasswordHash, Role, User, UserUpdate};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};

/// Raw `users` row; the role stays text until [`parse_role`] looks at it.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    login: String,
    password_hash: String,
    role: String,
    fav_games: Option<String>,
    phone_num: String,
    num_overdue_games: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let role = parse_role(&row.login, &row.role);
        User {
            login: row.login,
            password_hash: row.password_hash,
            role,
            fav_games: row.fav_games,
            phone_num: row.phone_num,
            num_overdue_games: row.num_overdue_games,
        }
    }
}

/// Parses a stored role. Unknown values degrade to customer.
pub fn parse_role(login: &str, stored: &str) -> Role {
    stored.parse().unwrap_or_else(|_| {
        warn!(login = %login, role = %stored, "Unrecognized stored role, treating as customer");
        Role::Customer
    })
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a customer account.
    ///
    /// ## Returns
    /// * `Ok(User)` - the stored account
    /// * `Err(DbError::UniqueViolation)` - the login is taken; nothing is written
    pub async fn create(
        &self,
        login: &str,
        password: &PasswordHash,
        phone_num: &str,
    ) -> DbResult<User> {
        debug!(login = %login, "Creating user");

        sqlx::query(
            r#"
            INSERT INTO users (login, password_hash, role, fav_games, phone_num, num_overdue_games)
            VALUES (?1, ?2, ?3, NULL, ?4, 0)
            "#,
        )
        .bind(login)
        .bind(password.as_str())
        .bind(Role::Customer.as_str())
        .bind(phone_num)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("login", login),
            other => other,
        })?;

        info!(login = %login, "User created");

        Ok(User {
            login: login.to_string(),
            password_hash: password.as_str().to_string(),
            role: Role::Customer,
            fav_games: None,
            phone_num: phone_num.to_string(),
            num_overdue_games: 0,
        })
    }

    /// Gets a user by login.
    pub async fn find(&self, login: &str) -> DbResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT login, password_hash, role, fav_games, phone_num, num_overdue_games
            FROM users
            WHERE login = ?1
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// True when the login is registered.
    pub async fn exists(&self, login: &str) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE login = ?1)")
            .bind(login)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// The role of a login, or `None` for an unknown login.
    pub async fn role_of(&self, login: &str) -> DbResult<Option<Role>> {
        let stored: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE login = ?1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;

        Ok(stored.map(|role| parse_role(login, &role)))
    }

    /// Applies one attribute change to a user.
    ///
    /// ## Errors
    /// * `NotFound` - no user has this login
    /// * `UniqueViolation` - a rename targets a login that is taken
    pub async fn update(&self, login: &str, change: &UserUpdate) -> DbResult<()> {
        debug!(login = %login, field = ?change.field(), "Updating user");

        let query = match change {
            UserUpdate::Password(hash) => {
                sqlx::query("UPDATE users SET password_hash = ?2 WHERE login = ?1")
                    .bind(login)
                    .bind(hash.as_str())
            }
            UserUpdate::PhoneNumber(phone) => {
                sqlx::query("UPDATE users SET phone_num = ?2 WHERE login = ?1")
                    .bind(login)
                    .bind(phone.as_str())
            }
            UserUpdate::Login(new_login) => {
                sqlx::query("UPDATE users SET login = ?2 WHERE login = ?1")
                    .bind(login)
                    .bind(new_login.as_str())
            }
            UserUpdate::Role(role) => sqlx::query("UPDATE users SET role = ?2 WHERE login = ?1")
                .bind(login)
                .bind(role.as_str()),
            UserUpdate::OverdueGames(count) => {
                sqlx::query("UPDATE users SET num_overdue_games = ?2 WHERE login = ?1")
                    .bind(login)
                    .bind(*count)
            }
        };

        let result = query.execute(&self.pool).await.map_err(|e| {
            match (DbError::from(e), change) {
                (DbError::UniqueViolation { .. }, UserUpdate::Login(new_login)) => {
                    DbError::duplicate("login", new_login.as_str())
                }
                (other, _) => other,
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", login));
        }

        info!(login = %login, field = ?change.field(), "User updated");
        Ok(())
    }

    /// Replaces the free-text favorite games list.
    pub async fn set_favorite_games(&self, login: &str, fav_games: Option<&str>) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET fav_games = ?2 WHERE login = ?1")
            .bind(login)
            .bind(fav_games)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", login));
        }

        Ok(())
    }

    /// Counts registered users (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn setup() -> (Database, PasswordHash) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hash = PasswordHash::new("password1").unwrap();
        (db, hash)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (db, hash) = setup().await;

        let created = db.users().create("alice", &hash, "5550100100").await.unwrap();
        assert_eq!(created.role, Role::Customer);
        assert_eq!(created.num_overdue_games, 0);

        let found = db.users().find("alice").await.unwrap().unwrap();
        assert_eq!(found.login, "alice");
        assert_eq!(found.phone_num, "5550100100");
        assert!(found.fav_games.is_none());
        assert_ne!(found.password_hash, "password1");
        assert!(PasswordHash::from_phc(found.password_hash).verify("password1"));

        assert!(db.users().find("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_login_is_rejected() {
        let (db, hash) = setup().await;
        db.users().create("alice", &hash, "5550100100").await.unwrap();

        let other = PasswordHash::new("different1").unwrap();
        let err = db
            .users()
            .create("alice", &other, "5550199999")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "alice"));

        let kept = db.users().find("alice").await.unwrap().unwrap();
        assert_eq!(kept.phone_num, "5550100100");
        assert_eq!(db.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_role_parsing_degrades_to_customer() {
        let (db, hash) = setup().await;
        db.users().create("alice", &hash, "5550100100").await.unwrap();

        sqlx::query("UPDATE users SET role = ' Manager ' WHERE login = 'alice'")
            .execute(db.pool())
            .await
            .unwrap();
        assert_eq!(db.users().role_of("alice").await.unwrap(), Some(Role::Manager));

        sqlx::query("UPDATE users SET role = 'overlord' WHERE login = 'alice'")
            .execute(db.pool())
            .await
            .unwrap();
        assert_eq!(db.users().role_of("alice").await.unwrap(), Some(Role::Customer));
        assert_eq!(
            db.users().find("alice").await.unwrap().unwrap().role,
            Role::Customer
        );

        assert_eq!(db.users().role_of("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_updates() {
        let (db, hash) = setup().await;
        let users = db.users();
        users.create("alice", &hash, "5550100100").await.unwrap();

        users
            .update("alice", &UserUpdate::PhoneNumber("5550111111".into()))
            .await
            .unwrap();
        users
            .update("alice", &UserUpdate::Role(Role::Employee))
            .await
            .unwrap();
        users
            .update("alice", &UserUpdate::OverdueGames(3))
            .await
            .unwrap();
        let new_hash = PasswordHash::new("password2").unwrap();
        users
            .update("alice", &UserUpdate::Password(new_hash))
            .await
            .unwrap();

        let user = users.find("alice").await.unwrap().unwrap();
        assert_eq!(user.phone_num, "5550111111");
        assert_eq!(user.role, Role::Employee);
        assert_eq!(user.num_overdue_games, 3);
        assert!(PasswordHash::from_phc(user.password_hash).verify("password2"));

        let err = users
            .update("ghost", &UserUpdate::OverdueGames(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_rename() {
        let (db, hash) = setup().await;
        let users = db.users();
        users.create("alice", &hash, "5550100100").await.unwrap();
        users.create("bob", &hash, "5550100200").await.unwrap();

        let err = users
            .update("alice", &UserUpdate::Login("bob".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "bob"));

        users
            .update("alice", &UserUpdate::Login("alicia".into()))
            .await
            .unwrap();
        assert!(!users.exists("alice").await.unwrap());
        assert!(users.exists("alicia").await.unwrap());
    }

    #[tokio::test]
    async fn test_favorite_games() {
        let (db, hash) = setup().await;
        db.users().create("alice", &hash, "5550100100").await.unwrap();

        db.users()
            .set_favorite_games("alice", Some("Tetris, Doom"))
            .await
            .unwrap();
        let user = db.users().find("alice").await.unwrap().unwrap();
        assert_eq!(user.fav_games.as_deref(), Some("Tetris, Doom"));
    }
}
