//! Account identifier generator configuration

use serde::{Deserialize, Serialize};

/// Settings for the snowflake identifier generator
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Node discriminant (0-1023); picked at random on startup when unset
    #[serde(default)]
    pub node_id: Option<u16>,
}

impl IdentityConfig {
    /// Create from the `NODE_ID` environment variable
    pub fn from_env() -> Self {
        Self {
            node_id: std::env::var("NODE_ID")
                .ok()
                .and_then(|value| value.trim().parse().ok()),
        }
    }
}
