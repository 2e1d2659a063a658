//! Token signing configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::env_or;

/// Default login token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;

const DEFAULT_PRIVATE_KEY_PATH: &str = "keys/jwt_private_key.pem";
const DEFAULT_PUBLIC_KEY_PATH: &str = "keys/jwt_public_key.pem";

/// Where PEM key material comes from
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum KeySource {
    /// Inline PEM text
    Pem(String),
    /// Path to a PEM file
    File(PathBuf),
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Pem(_) => f.write_str("Pem(<redacted>)"),
            KeySource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

impl KeySource {
    /// Inline PEM from `pem_var` wins over the file path in `path_var`
    fn from_env(pem_var: &str, path_var: &str, default_path: &str) -> Self {
        match std::env::var(pem_var) {
            Ok(pem) if !pem.trim().is_empty() => KeySource::Pem(pem),
            _ => KeySource::File(PathBuf::from(
                std::env::var(path_var).unwrap_or_else(|_| default_path.to_string()),
            )),
        }
    }

    /// Resolve the source into PEM text
    pub fn read(&self) -> std::io::Result<String> {
        match self {
            KeySource::Pem(pem) => Ok(pem.clone()),
            KeySource::File(path) => std::fs::read_to_string(path),
        }
    }
}

/// JWT configuration (RS256 key pair and token lifetime)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Private key used to sign tokens
    pub private_key: KeySource,

    /// Public key used to verify tokens
    pub public_key: KeySource,

    /// Lifetime of tokens issued at login, in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,

    /// Allowed clock skew when checking `exp`/`nbf`, in seconds
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key: KeySource::File(PathBuf::from(DEFAULT_PRIVATE_KEY_PATH)),
            public_key: KeySource::File(PathBuf::from(DEFAULT_PUBLIC_KEY_PATH)),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            leeway_seconds: 0,
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    ///
    /// `JWT_PRIVATE_KEY`/`JWT_PUBLIC_KEY` carry inline PEM and take precedence
    /// over `JWT_PRIVATE_KEY_PATH`/`JWT_PUBLIC_KEY_PATH`.
    pub fn from_env() -> Self {
        Self {
            private_key: KeySource::from_env(
                "JWT_PRIVATE_KEY",
                "JWT_PRIVATE_KEY_PATH",
                DEFAULT_PRIVATE_KEY_PATH,
            ),
            public_key: KeySource::from_env(
                "JWT_PUBLIC_KEY",
                "JWT_PUBLIC_KEY_PATH",
                DEFAULT_PUBLIC_KEY_PATH,
            ),
            token_ttl_seconds: env_or("JWT_TOKEN_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS),
            leeway_seconds: env_or("JWT_LEEWAY_SECONDS", 0),
        }
    }

    /// Create a configuration from inline PEM strings
    pub fn from_pem(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            private_key: KeySource::Pem(private_key.into()),
            public_key: KeySource::Pem(public_key.into()),
            ..Default::default()
        }
    }

    /// Set the token lifetime in hours
    pub fn with_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_seconds = hours * 3600;
        self
    }
}

fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECONDS
}
