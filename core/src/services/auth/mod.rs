//! Authentication service module
//!
//! Orchestrates the four account flows:
//! - Register: validate, hash, assign an id, persist account + counter
//! - Login: check credentials, issue a token, bump the login counter
//! - GetProfile: verify the bearer token and read the account
//! - UpdateProfile: verify the bearer token and overwrite name and phone

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthenticationService, BEARER_PREFIX};
