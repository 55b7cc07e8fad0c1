//! Account registration business logic.
//!
//! Creates new player accounts with a hashed password, the default role and the
//! starting balance.

use crate::database::models::{Account, NewAccount};
use crate::errors::{AuthError, AuthResult};
use crate::repositories::UserDirectory;
use crate::utils::password::PasswordHasher;
use std::sync::Arc;
use tracing::{info, warn};

pub struct RegistrationService {
    directory: Arc<dyn UserDirectory>,
    hasher: PasswordHasher,
}

impl RegistrationService {
    /// Creates a new RegistrationService instance.
    ///
    /// # Arguments
    /// * `directory` - Account store; must enforce username uniqueness itself
    /// * `hasher` - Password hasher used for the stored digest
    pub fn new(directory: Arc<dyn UserDirectory>, hasher: PasswordHasher) -> Self {
        Self { directory, hasher }
    }

    /// Registers a new player account.
    ///
    /// # Returns
    /// The persisted Account with role `USER` and the starting balance
    ///
    /// # Errors
    /// Returns `AuthError::DuplicateAccount` if the username is taken, either at
    /// the lookup or when the directory rejects the insert. Nothing is written
    /// in that case.
    pub async fn register(&self, username: &str, password: &str) -> AuthResult<Account> {
        info!("Creating new account: {}", username);

        // Fast path only; the directory's unique key settles concurrent registrations
        if self.directory.find_by_username(username).await?.is_some() {
            warn!("Account already exists: {}", username);
            return Err(AuthError::duplicate_account(username));
        }

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;

        let account = self
            .directory
            .create(NewAccount::player(username, password_hash))
            .await
            .map_err(|e| {
                let error = AuthError::from(e);
                if matches!(error, AuthError::DuplicateAccount { .. }) {
                    warn!("Account already exists (lost registration race): {}", username);
                }
                error
            })?;

        info!("Account created successfully: {}", username);
        Ok(account)
    }
}
