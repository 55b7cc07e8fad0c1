//! Username/password verification.

use crate::auth::models::AuthenticatedIdentity;
use crate::errors::{AuthError, AuthResult};
use crate::repositories::UserDirectory;
use crate::utils::password::PasswordHasher;
use std::sync::Arc;
use tracing::debug;

/// Plaintext behind the digest checked when no account matches.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Checks presented credentials against the account directory.
pub struct CredentialVerifier {
    directory: Arc<dyn UserDirectory>,
    hasher: PasswordHasher,
    /// Digest at the configured cost, so an unknown username costs as much as a wrong password
    decoy_digest: String,
}

impl CredentialVerifier {
    /// # Errors
    /// Returns `AuthError::Internal` if the hasher cannot produce the decoy digest.
    pub fn new(directory: Arc<dyn UserDirectory>, hasher: PasswordHasher) -> AuthResult<Self> {
        let decoy_digest = hasher.hash(DECOY_PASSWORD)?;
        Ok(Self {
            directory,
            hasher,
            decoy_digest,
        })
    }

    /// Verifies a username/password pair.
    ///
    /// # Errors
    /// `AuthError::InvalidCredentials` for an unknown username and for a wrong
    /// password alike, so callers cannot tell which one was wrong.
    pub async fn verify(&self, username: &str, password: &str) -> AuthResult<AuthenticatedIdentity> {
        let Some(account) = self.directory.find_by_username(username).await? else {
            self.hasher
                .verify_blocking(password.to_string(), self.decoy_digest.clone())
                .await?;
            debug!("Credential check failed: unknown account {}", username);
            return Err(AuthError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify_blocking(password.to_string(), account.password_hash.clone())
            .await?;
        if !matches {
            debug!("Credential check failed: password mismatch for {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthenticatedIdentity::from(&account))
    }
}
