//! Error handling utilities for API responses.
//!
//! Provides the standard response envelope and the conversion from
//! authentication-layer errors to HTTP responses.
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//!
//! # Error Handling Flow
//! 1. Service layer returns an `AuthError`
//! 2. `auth_error_to_http` converts it to the appropriate status and body
//! 3. Credential and token failures collapse into uniform messages so the
//!    response never reveals which check failed

use crate::errors::AuthError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Message for every failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
/// Message for every request without a usable token.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Response timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>, error_type: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Converts AuthError to appropriate HTTP response with standard format
pub fn auth_error_to_http(error: AuthError) -> (StatusCode, String) {
    let (status, error_type, message) = match error {
        AuthError::Validation { message } => {
            (StatusCode::BAD_REQUEST, "validation_error", message)
        }
        AuthError::DuplicateAccount { username } => (
            StatusCode::CONFLICT,
            "already_exists",
            format!("Account '{}' already exists", username),
        ),
        AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            INVALID_CREDENTIALS_MESSAGE.to_string(),
        ),
        AuthError::TokenInvalid | AuthError::TokenExpired => (
            StatusCode::UNAUTHORIZED,
            "not_authenticated",
            NOT_AUTHENTICATED_MESSAGE.to_string(),
        ),
        AuthError::Directory { source } => {
            tracing::error!("Directory error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error".to_string(),
            )
        }
        AuthError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    };

    let error_response = ApiResponse::<()>::error(message, error_type);
    let body = serde_json::to_string(&error_response).unwrap_or_else(|_| {
        format!(r#"{{"success":false,"message":"{}"}}"#, error_type)
    });
    (status, body)
}
