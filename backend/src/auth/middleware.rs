//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer token on the request and hands the resulting
//! `AuthenticatedIdentity` to the handler through the request extensions.

use crate::api::common::auth_error_to_http;
use crate::auth::service::AuthService;
use crate::errors::AuthError;
use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(auth_service): Extension<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let token = bearer_token(&request).ok_or_else(|| {
        debug!("Request to {} without bearer token", request.uri().path());
        auth_error_to_http(AuthError::TokenInvalid)
    })?;

    match auth_service.authenticate(token) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err(error) => {
            debug!("Rejected token on {}: {}", request.uri().path(), error);
            Err(auth_error_to_http(error))
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
