//! Global application error types.
//!
//! This module defines the closed set of outcomes the authentication core can
//! return to its callers, along with the storage-boundary error reported by
//! user directories.

use thiserror::Error;

/// Errors reported by a [`UserDirectory`](crate::repositories::UserDirectory).
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The storage layer rejected a row because the username is already taken.
    #[error("Account already exists: {username}")]
    Duplicate { username: String },
    /// Any other failure talking to the underlying store.
    #[error("Storage error: {source}")]
    Storage {
        #[from]
        source: anyhow::Error,
    },
}

/// Outcome of every failing operation in the authentication core.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Registration attempted for a username that is already taken.
    #[error("Account already exists: {username}")]
    DuplicateAccount { username: String },

    /// Unknown username or wrong password. Deliberately carries no detail.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Malformed, forged or mis-signed token.
    #[error("Token is invalid")]
    TokenInvalid,

    /// Well-formed token whose validity window has elapsed.
    #[error("Token has expired")]
    TokenExpired,

    #[error("Directory error: {source}")]
    Directory { source: anyhow::Error },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn duplicate_account(username: impl Into<String>) -> Self {
        Self::DuplicateAccount {
            username: username.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<DirectoryError> for AuthError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::Duplicate { username } => Self::DuplicateAccount { username },
            DirectoryError::Storage { source } => Self::Directory { source },
        }
    }
}
