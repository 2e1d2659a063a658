//! Shared error response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error response structure used across all API endpoints
///
/// `message` is the field clients read; `error` is a stable code for
/// programmatic handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const AUTHENTICATION_FAILED: &str = "authentication_failed";
    pub const FORBIDDEN: &str = "forbidden";
    pub const TOKEN_EXPIRED: &str = "token_expired";
    pub const TOKEN_INVALID: &str = "token_invalid";
    pub const CONFLICT: &str = "conflict";
    pub const NOT_FOUND: &str = "not_found";
    pub const STORE_ERROR: &str = "store_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
