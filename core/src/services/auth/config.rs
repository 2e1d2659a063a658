//! Configuration for the authentication service

use bcrypt::DEFAULT_COST;
use chrono::Duration;
use us_shared::config::JwtConfig;

use crate::domain::entities::token::DEFAULT_TOKEN_TTL_HOURS;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lifetime of the token issued at login
    pub token_ttl: Duration,
    /// bcrypt cost used when hashing new passwords
    pub password_hash_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            password_hash_cost: DEFAULT_COST,
        }
    }
}

impl AuthServiceConfig {
    /// Take the token lifetime from the JWT configuration
    pub fn from_jwt_config(jwt: &JwtConfig) -> Self {
        Self {
            token_ttl: Duration::seconds(jwt.token_ttl_seconds),
            ..Default::default()
        }
    }

    pub fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }
}
