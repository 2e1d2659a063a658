use actix_web::{http::StatusCode, HttpResponse};
use tracing::{error, warn};

use crate::dto::{ErrorResponse, ErrorResponseExt};
use us_core::errors::{AuthError, DomainError, StoreError, TokenError};
use us_shared::error_codes;

/// Convert a domain error into the HTTP response the client sees
///
/// Validation, credential and store errors are client-class (400), token
/// and authorization problems are 403, and key or hashing failures are
/// 500. Backend messages are not echoed back.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation(e) => {
            warn!(reason = %e, "Validation error");
            ErrorResponse::new(error_codes::VALIDATION_ERROR, e.to_string())
                .to_response(StatusCode::BAD_REQUEST)
        }

        DomainError::Auth(auth_error) => match auth_error {
            AuthError::AuthenticationFailed => {
                ErrorResponse::new(error_codes::AUTHENTICATION_FAILED, auth_error.to_string())
                    .to_response(StatusCode::BAD_REQUEST)
            }
            AuthError::Forbidden => ErrorResponse::new(error_codes::FORBIDDEN, auth_error.to_string())
                .to_response(StatusCode::FORBIDDEN),
        },

        DomainError::Token(token_error) => handle_token_error(token_error),

        DomainError::Store(store_error) => handle_store_error(store_error),

        DomainError::Internal { message } => {
            error!(%message, "Internal error");
            internal_error()
        }
    }
}

fn handle_token_error(token_error: TokenError) -> HttpResponse {
    match token_error {
        TokenError::KeyLoadError { .. } | TokenError::SigningFailed => {
            error!(reason = %token_error, "Token signing failure");
            internal_error()
        }
        TokenError::TokenExpired => {
            ErrorResponse::new(error_codes::TOKEN_EXPIRED, token_error.to_string())
                .to_response(StatusCode::FORBIDDEN)
        }
        TokenError::InvalidSignature
        | TokenError::TokenNotYetValid
        | TokenError::InvalidTokenFormat
        | TokenError::PayloadTypeMismatch { .. } => {
            ErrorResponse::new(error_codes::TOKEN_INVALID, token_error.to_string())
                .to_response(StatusCode::FORBIDDEN)
        }
    }
}

fn handle_store_error(store_error: StoreError) -> HttpResponse {
    let (code, message) = match &store_error {
        StoreError::Conflict { .. } => (error_codes::CONFLICT, store_error.to_string()),
        StoreError::NotFound { .. } => (error_codes::NOT_FOUND, store_error.to_string()),
        StoreError::Timeout { .. } => (error_codes::STORE_ERROR, store_error.to_string()),
        StoreError::Backend { .. } => {
            error!(reason = %store_error, "Store backend failure");
            (
                error_codes::STORE_ERROR,
                "the account store could not complete the request".to_string(),
            )
        }
    };

    ErrorResponse::new(code, message).to_response(StatusCode::BAD_REQUEST)
}

fn internal_error() -> HttpResponse {
    ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
        .to_response(StatusCode::INTERNAL_SERVER_ERROR)
}
