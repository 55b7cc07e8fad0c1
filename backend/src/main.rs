//! Main entry point for the Mendel backend.
//!
//! This file initializes the Axum web server, sets up the database connection,
//! builds the authentication service once for the whole process, and registers
//! all API routes and middleware.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use crate::auth::service::AuthService;
use crate::repositories::UserDirectory;
use crate::repositories::account_repository::AccountRepository;
use crate::utils::jwt::TokenIssuer;
use crate::utils::password::PasswordHasher;
use anyhow::Context;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;

    let directory: Arc<dyn UserDirectory> = Arc::new(AccountRepository::new(db.pool().clone()));
    let auth_service = Arc::new(AuthService::new(
        directory,
        PasswordHasher::new(config.password_hash_cost),
        TokenIssuer::new(&config.jwt_secret, config.jwt_expires_in_seconds),
    )?);

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api", auth::routes::auth_router())
        .layer(Extension(auth_service));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting Mendel server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Mendel Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to Mendel API",
    ))
}
