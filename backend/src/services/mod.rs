//! Module for core business logic services.
//!
//! Registration and credential verification are composed by
//! `auth::service::AuthService` into the flows exposed over HTTP.

pub mod credential_service;
pub mod registration_service;
