//! Password hashing with bcrypt.
//!
//! Every digest embeds its own random salt and cost, so verification needs
//! nothing but the stored digest. Passwords longer than bcrypt's 72-byte input
//! are refused rather than truncated.
//!
//! ## Usage
//!
//! ```ignore
//! let hasher = PasswordHasher::new(bcrypt::DEFAULT_COST);
//! let digest = hasher.hash("secret1")?;
//! assert!(hasher.verify("secret1", &digest));
//! ```

use crate::errors::{AuthError, AuthResult};
use bcrypt::{non_truncating_hash, non_truncating_verify};
use tracing::debug;

/// Longest password, in bytes, bcrypt can hash without truncating it.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Salted, adaptive-cost password hasher.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if bcrypt rejects the input (an invalid
    /// cost, or a password over [`MAX_PASSWORD_BYTES`]).
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        non_truncating_hash(password, self.cost)
            .map_err(|e| AuthError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Checks a plaintext password against a stored digest.
    ///
    /// A malformed digest never matches, and neither does an over-long password.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match non_truncating_verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                debug!("Rejecting unreadable password digest: {}", e);
                false
            }
        }
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, password: String) -> AuthResult<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::internal(format!("Password hashing task failed: {}", e)))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    pub async fn verify_blocking(&self, password: String, digest: String) -> AuthResult<bool> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::internal(format!("Password verification task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_verifies_against_plaintext() {
        let digest = hasher().hash("secret1").unwrap();
        assert_ne!(digest, "secret1");
        assert!(hasher().verify("secret1", &digest));
        assert!(!hasher().verify("secret2", &digest));
    }

    #[test]
    fn test_salts_are_unique() {
        let first = hasher().hash("same password").unwrap();
        let second = hasher().hash("same password").unwrap();

        // Same password should produce different digests
        assert_ne!(first, second);

        // But both should verify
        assert!(hasher().verify("same password", &first));
        assert!(hasher().verify("same password", &second));
    }

    #[test]
    fn test_malformed_digests_never_verify() {
        for digest in [
            "",
            "not-a-digest",
            "$2b$04$",
            "$2b$99$abcdefghijklmnopqrstuuvwxyz0123456789ABCDEFGHIJKLMNOPQ",
            "secret1",
        ] {
            assert!(!hasher().verify("secret1", digest), "digest {:?}", digest);
            assert!(!hasher().verify("", digest), "digest {:?}", digest);
        }
    }

    #[test]
    fn test_empty_password_round_trips() {
        let digest = hasher().hash("").unwrap();
        assert!(hasher().verify("", &digest));
        assert!(!hasher().verify(" ", &digest));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(matches!(
            PasswordHasher::new(2).hash("secret1"),
            Err(AuthError::Internal { .. })
        ));
    }

    #[test]
    fn test_passwords_past_72_bytes_are_not_truncated() {
        let base = "a".repeat(MAX_PASSWORD_BYTES);
        let digest = hasher().hash(&base).unwrap();
        assert!(hasher().verify(&base, &digest));
        assert!(!hasher().verify(&format!("{}b", base), &digest));

        assert!(matches!(
            hasher().hash(&format!("{}b", base)),
            Err(AuthError::Internal { .. })
        ));
    }

    #[tokio::test]
    async fn test_blocking_variants_agree() {
        let digest = hasher().hash_blocking("secret1".to_string()).await.unwrap();
        assert!(hasher()
            .verify_blocking("secret1".to_string(), digest.clone())
            .await
            .unwrap());
        assert!(!hasher()
            .verify_blocking("wrong".to_string(), digest)
            .await
            .unwrap());
    }
}
