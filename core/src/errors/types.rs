//! Domain-specific error types for authentication and related operations
//!
//! This module provides the error type definitions for input validation,
//! credential checks, token handling and account storage. The HTTP layer
//! maps each of them to a status class and error code.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown phone number or wrong password; deliberately indistinguishable
    #[error("invalid phone number or password")]
    AuthenticationFailed,

    #[error("missing or malformed authorization header")]
    Forbidden,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to load signing key: {message}")]
    KeyLoadError { message: String },

    #[error("failed to sign token")]
    SigningFailed,

    #[error("token signature verification failed")]
    InvalidSignature,

    #[error("token expired")]
    TokenExpired,

    #[error("token not yet valid")]
    TokenNotYetValid,

    #[error("invalid token format")]
    InvalidTokenFormat,

    #[error("token payload type not supported: {found}")]
    PayloadTypeMismatch { found: String },
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field {} cannot be empty", .fields.join(", "))]
    RequiredFields { fields: Vec<String> },

    #[error("phone number must be between {min} and {max} characters")]
    PhoneNumberLength { min: usize, max: usize },

    #[error("phone number should start with '{prefix}'")]
    PhoneNumberPrefix { prefix: String },

    #[error("full name must be between {min} and {max} characters")]
    FullNameLength { min: usize, max: usize },

    #[error("password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },

    #[error("password must contain at least one uppercase letter, one number and one special character")]
    PasswordFormat,

    #[error("node id must be at most {max}, got {node_id}")]
    NodeIdOutOfRange { node_id: u16, max: u16 },
}

/// Account storage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint (id or phone number) was violated
    #[error("{field} already registered")]
    Conflict { field: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("store operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("store failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Shorthand for a missing account
    pub fn account_not_found() -> Self {
        StoreError::NotFound {
            resource: "account".to_string(),
        }
    }

    /// Whether the error means "no matching record"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
