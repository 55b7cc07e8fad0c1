//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle registration, login and the current-user lookup, and are
//! designed to be nested into the main Axum router. The router expects an
//! `Extension<Arc<AuthService>>` layer to be applied by the caller.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/user", get(me).layer(middleware::from_fn(jwt_auth)))
}
