//! Data structures for authentication-related entities.
//!
//! Request and response payloads for registration, login and the current-user
//! endpoint, plus the in-memory identity produced by a successful login.

use crate::database::models::{Account, Role};
use crate::utils::password::MAX_PASSWORD_BYTES;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Result of a successful credential check or token validation.
///
/// Owned by the request that produced it and passed explicitly to whatever
/// needs to know who the caller is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub username: String,
    pub role: Role,
    /// Snapshot; re-read the account when a fresh value matters
    pub balance: i64,
}

impl From<&Account> for AuthenticatedIdentity {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            role: account.role,
            balance: account.balance,
        }
    }
}

/// Registration request payload
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1-255 characters"
    ))]
    pub username: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        custom(
            function = "validate_password_bytes",
            message = "Password must be at most 72 bytes"
        )
    )]
    pub password: String,
}

/// bcrypt reads at most [`MAX_PASSWORD_BYTES`] of its input.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}

/// Login request payload
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// Passwords must never reach the logs.
impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login response containing the bearer token and player info
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub balance: i64,
    pub expires_in: u64, // Token expiration in seconds
}

/// Player information returned by registration and the current-user endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub username: String,
    pub role: Role,
    pub balance: i64,
}

impl From<Account> for UserInfo {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            role: account.role,
            balance: account.balance,
        }
    }
}
