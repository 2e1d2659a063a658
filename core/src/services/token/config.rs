//! Configuration for the token service

use us_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone, Default)]
pub struct TokenServiceConfig {
    /// Allowed clock skew in seconds when checking `exp` and `nbf`
    pub leeway_seconds: u64,
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            leeway_seconds: config.leeway_seconds,
        }
    }
}
