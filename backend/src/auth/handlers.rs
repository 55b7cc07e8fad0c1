//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request data and hand it to `auth::service`, turning
//! its outcome into a JSON response.

use crate::api::common::{ApiResponse, auth_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use std::sync::Arc;

/// Public liveness check under `/api`
pub async fn hello() -> &'static str {
    "Hello, World!"
}

/// Handle player registration request
#[axum::debug_handler]
pub async fn register(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, (StatusCode, String)> {
    match auth_service.register(payload).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::success(
            user,
            "User registered successfully",
        ))),
        Err(error) => Err(auth_error_to_http(error)),
    }
}

/// Handle player login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<LoginResponse>>, (StatusCode, String)> {
    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(ApiResponse::success(
            response,
            "Login successful",
        ))),
        Err(error) => Err(auth_error_to_http(error)),
    }
}

/// Get current player information; requires `jwt_auth`
#[axum::debug_handler]
pub async fn me(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, (StatusCode, String)> {
    match auth_service.current_user(&identity).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::success(
            user,
            "Request successful",
        ))),
        Err(error) => Err(auth_error_to_http(error)),
    }
}
