//! Cryptographic helpers used by the authentication core.

pub mod jwt;
pub mod password;
