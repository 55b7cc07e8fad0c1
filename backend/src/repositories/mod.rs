//! Storage boundary for player accounts.
//!
//! The authentication core only ever talks to a [`UserDirectory`]; the SQLite
//! implementation lives in [`account_repository`].

use crate::database::models::{Account, NewAccount};
use crate::errors::DirectoryError;
use async_trait::async_trait;

pub mod account_repository;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Durable store of accounts keyed by unique username.
///
/// Implementations must enforce username uniqueness themselves (for example with
/// a unique index). Callers may check for an existing account first, but two
/// concurrent registrations can both pass that check, so [`create`] is the only
/// place the guarantee actually holds.
///
/// [`create`]: UserDirectory::create
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up an account by exact (case-sensitive) username.
    async fn find_by_username(&self, username: &str) -> DirectoryResult<Option<Account>>;

    /// Inserts a new account, failing with [`DirectoryError::Duplicate`] if the
    /// username is already taken.
    async fn create(&self, account: NewAccount) -> DirectoryResult<Account>;

    /// Inserts or updates an account keyed by username.
    async fn save(&self, account: Account) -> DirectoryResult<Account>;
}
