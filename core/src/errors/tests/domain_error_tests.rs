//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, StoreError, TokenError, ValidationError};

#[test]
fn test_required_fields_message_lists_fields() {
    let error = ValidationError::RequiredFields {
        fields: vec!["full_name".to_string(), "password".to_string()],
    };
    assert_eq!(error.to_string(), "field full_name, password cannot be empty");
}

#[test]
fn test_validation_error_bounds_in_message() {
    let error = ValidationError::PhoneNumberLength { min: 10, max: 13 };
    assert_eq!(
        error.to_string(),
        "phone number must be between 10 and 13 characters"
    );

    let error = ValidationError::PhoneNumberPrefix {
        prefix: "+62".to_string(),
    };
    assert!(error.to_string().contains("'+62'"));
}

#[test]
fn test_authentication_failure_does_not_reveal_cause() {
    let message = AuthError::AuthenticationFailed.to_string();
    assert!(message.contains("phone number or password"));
    assert!(!message.contains("not found"));
}

#[test]
fn test_domain_error_is_transparent_over_bridged_errors() {
    let error: DomainError = TokenError::TokenExpired.into();
    assert_eq!(error.to_string(), "token expired");

    let error: DomainError = StoreError::Conflict {
        field: "phone number".to_string(),
    }
    .into();
    assert_eq!(error.to_string(), "phone number already registered");
}

#[test]
fn test_is_not_found() {
    let error: DomainError = StoreError::account_not_found().into();
    assert!(error.is_not_found());

    let error: DomainError = StoreError::Backend {
        message: "connection reset".to_string(),
    }
    .into();
    assert!(!error.is_not_found());

    let error: DomainError = AuthError::AuthenticationFailed.into();
    assert!(!error.is_not_found());
}
