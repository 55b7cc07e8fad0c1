//! Authentication module for player accounts and bearer tokens.
//!
//! This module provides the public interface for registration, login, the
//! current-user lookup and the middleware that guards authenticated routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
