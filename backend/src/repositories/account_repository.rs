//! Database repository for player accounts.
//!
//! SQLite-backed [`UserDirectory`]. The `accounts.username` primary key is what
//! makes registration safe under concurrency.

use crate::database::models::{Account, NewAccount};
use crate::errors::DirectoryError;
use crate::repositories::{DirectoryResult, UserDirectory};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const ACCOUNT_COLUMNS: &str = "username, password_hash, role, balance, created_at, updated_at";

/// Repository for account database operations.
#[derive(Clone)]
pub struct AccountRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (cloned handles share the same pool)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for AccountRepository {
    /// Retrieves an account by its username.
    ///
    /// # Returns
    /// `Some(Account)` if found, `None` otherwise
    async fn find_by_username(&self, username: &str) -> DirectoryResult<Option<Account>> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = ?");
        let account = sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(account)
    }

    /// Inserts a new account row.
    ///
    /// # Errors
    /// `DirectoryError::Duplicate` when the primary key rejects the username.
    async fn create(&self, account: NewAccount) -> DirectoryResult<Account> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO accounts ({ACCOUNT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?) RETURNING {ACCOUNT_COLUMNS}"
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(&account.username)
            .bind(&account.password_hash)
            .bind(account.role)
            .bind(account.balance)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DirectoryError::Duplicate {
                        username: account.username.clone(),
                    }
                } else {
                    storage_error(e)
                }
            })
    }

    /// Inserts the account or overwrites digest, role and balance of the
    /// existing row with the same username. `created_at` of an existing row is kept.
    async fn save(&self, account: Account) -> DirectoryResult<Account> {
        let query = format!(
            r#"
            INSERT INTO accounts ({ACCOUNT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(username) DO UPDATE SET
                password_hash = excluded.password_hash,
                role = excluded.role,
                balance = excluded.balance,
                updated_at = excluded.updated_at
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let saved = sqlx::query_as::<_, Account>(&query)
            .bind(&account.username)
            .bind(&account.password_hash)
            .bind(account.role)
            .bind(account.balance)
            .bind(account.created_at)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(saved)
    }
}

fn storage_error(error: sqlx::Error) -> DirectoryError {
    DirectoryError::Storage {
        source: error.into(),
    }
}

/// SQLite reports both UNIQUE (2067) and PRIMARY KEY (1555) constraint hits.
fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => {
            db_error.is_unique_violation()
                || matches!(db_error.code().as_deref(), Some("1555") | Some("2067"))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::database::models::{Role, STARTING_BALANCE};

    async fn repository() -> AccountRepository {
        AccountRepository::new(Database::in_memory().await.pool().clone())
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = repository().await;
        let created = repo
            .create(NewAccount::player("alice", "$2b$04$digest"))
            .await
            .unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.role, Role::User);
        assert_eq!(created.balance, STARTING_BALANCE);

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "$2b$04$digest");
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let repo = repository().await;
        repo.create(NewAccount::player("Alice", "digest")).await.unwrap();

        assert!(repo.find_by_username("alice").await.unwrap().is_none());
        assert!(repo.find_by_username("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let repo = repository().await;
        repo.create(NewAccount::player("alice", "first")).await.unwrap();

        let error = repo
            .create(NewAccount::player("alice", "second"))
            .await
            .unwrap_err();
        assert!(matches!(error, DirectoryError::Duplicate { ref username } if username == "alice"));

        let stored = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "first");
    }

    #[tokio::test]
    async fn test_save_updates_existing_account() {
        let repo = repository().await;
        let mut account = repo.create(NewAccount::player("carol", "digest")).await.unwrap();

        account.balance = 250;
        account.role = Role::Admin;
        let saved = repo.save(account.clone()).await.unwrap();

        assert_eq!(saved.balance, 250);
        assert_eq!(saved.role, Role::Admin);
        assert_eq!(saved.created_at, account.created_at);
        assert!(saved.updated_at >= account.updated_at);

        let stored = repo.find_by_username("carol").await.unwrap().unwrap();
        assert_eq!(stored.balance, 250);
        assert_eq!(stored.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_save_inserts_new_account() {
        let repo = repository().await;
        let now = Utc::now();
        let account = Account {
            username: "dave".to_string(),
            password_hash: "digest".to_string(),
            role: Role::User,
            balance: 42,
            created_at: now,
            updated_at: now,
        };

        repo.save(account).await.unwrap();

        let stored = repo.find_by_username("dave").await.unwrap().unwrap();
        assert_eq!(stored.balance, 42);
    }

    #[tokio::test]
    async fn test_negative_balance_rejected_by_storage() {
        let repo = repository().await;
        let mut account = repo.create(NewAccount::player("erin", "digest")).await.unwrap();
        account.balance = -1;

        let error = repo.save(account).await.unwrap_err();
        assert!(matches!(error, DirectoryError::Storage { .. }));
    }
}
