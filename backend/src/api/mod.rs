//! Central module for shared API plumbing.
//!
//! Holds the response envelope and error-to-HTTP mapping used by every
//! endpoint. Authentication routes themselves live in `auth`.

pub mod common;
