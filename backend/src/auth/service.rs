//! Core business logic for the authentication system.
//!
//! `AuthService` ties registration, credential verification and token handling
//! together into the flows exposed over HTTP.

use crate::auth::models::*;
use crate::errors::{AuthError, AuthResult};
use crate::repositories::UserDirectory;
use crate::services::credential_service::CredentialVerifier;
use crate::services::registration_service::RegistrationService;
use crate::utils::jwt::TokenIssuer;
use crate::utils::password::PasswordHasher;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Authentication service for handling registration, login and token checks
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    registration: RegistrationService,
    credentials: CredentialVerifier,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: PasswordHasher,
        tokens: TokenIssuer,
    ) -> AuthResult<Self> {
        Ok(AuthService {
            registration: RegistrationService::new(directory.clone(), hasher),
            credentials: CredentialVerifier::new(directory.clone(), hasher)?,
            directory,
            tokens,
        })
    }

    /// Register a new player account
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<UserInfo> {
        validate_request(&request)?;

        let account = self
            .registration
            .register(&request.username, &request.password)
            .await?;

        Ok(UserInfo::from(account))
    }

    /// Authenticate a player and issue a bearer token
    pub async fn login(&self, request: LoginRequest) -> AuthResult<LoginResponse> {
        validate_request(&request)?;

        let identity = match self
            .credentials
            .verify(&request.username, &request.password)
            .await
        {
            Ok(identity) => identity,
            Err(error) => {
                warn!("Login failed for username {}: {}", request.username, error);
                return Err(error);
            }
        };

        let token = self.tokens.issue(&identity)?;
        info!("User logged in successfully: {}", identity.username);

        Ok(LoginResponse {
            token,
            username: identity.username,
            balance: identity.balance,
            expires_in: self.tokens.expires_in_seconds(),
        })
    }

    /// Validate a bearer token and return the identity it carries
    pub fn authenticate(&self, token: &str) -> AuthResult<AuthenticatedIdentity> {
        self.tokens.validate(token)
    }

    /// Current account information for an authenticated caller.
    ///
    /// The balance in a token is a snapshot, so the account is re-read here.
    /// An identity whose account no longer exists is not authenticated.
    pub async fn current_user(&self, identity: &AuthenticatedIdentity) -> AuthResult<UserInfo> {
        let account = self
            .directory
            .find_by_username(&identity.username)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        Ok(UserInfo::from(account))
    }
}

/// Runs DTO validation and flattens the field errors into one message.
fn validate_request<T: Validate>(request: &T) -> AuthResult<()> {
    if let Err(validation_errors) = request.validate() {
        let mut error_messages: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        error_messages.sort();
        return Err(AuthError::validation(error_messages.join(", ")));
    }
    Ok(())
}
