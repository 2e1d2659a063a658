//! Token service module for JWT management
//!
//! Tokens are RS256-signed JWTs whose claims are `{dat, iat, nbf, exp}`.
//! The key pair is injected through [`Rs256KeyManager`].

mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use key_manager::Rs256KeyManager;
pub use service::TokenService;
