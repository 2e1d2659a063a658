//! Unit tests for authentication service

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::account::AccountId;
use crate::errors::{AuthError, DomainError, StoreError, TokenError, ValidationError};
use crate::repositories::{AccountStore, FailPoint};

use super::mocks::*;

#[tokio::test]
async fn test_jane_doe_scenario() {
    let (service, store) = build_service();

    let id = service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();

    let login = service.login(JANE_PHONE, JANE_PASSWORD).await.unwrap();
    assert_eq!(login.id, id);
    assert_eq!(store.get_login_counter(id).await.unwrap().count, 1);

    let profile = service.get_profile(&login.token).await.unwrap();
    assert_eq!(profile.full_name, JANE_NAME);
    assert_eq!(profile.phone_number, JANE_PHONE);

    service
        .update_profile(&login.token, "Jane Smith", JANE_PHONE)
        .await
        .unwrap();

    let profile = service.get_profile(&login.token).await.unwrap();
    assert_eq!(profile.full_name, "Jane Smith");
    assert_eq!(profile.phone_number, JANE_PHONE);
}

#[tokio::test]
async fn test_register_stores_hash_not_password() {
    let (service, store) = build_service();
    let id = service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();

    let account = store.get_by_id(id).await.unwrap();
    assert_ne!(account.password_hash, JANE_PASSWORD);
    assert!(account.password_hash.starts_with("$2"));
    assert_eq!(store.get_login_counter(id).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_register_rejects_empty_fields_first() {
    let (service, store) = build_service();

    let err = service.register("", "0812", "").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::RequiredFields { ref fields })
            if fields == &vec!["full_name".to_string(), "password".to_string()]
    ));
    assert_eq!(store.account_count().await, 0);
}

#[tokio::test]
async fn test_register_policy_failures() {
    let (service, _) = build_service();

    let err = service
        .register(JANE_NAME, "0812345678", JANE_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::PhoneNumberPrefix { .. })
    ));

    let err = service
        .register(JANE_NAME, JANE_PHONE, "secret1!")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::PasswordFormat)
    ));
}

#[tokio::test]
async fn test_register_duplicate_phone_conflicts() {
    let (service, store) = build_service();
    service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();

    let err = service
        .register("John Doe", JANE_PHONE, "An0ther!")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Store(StoreError::Conflict { .. })));
    assert_eq!(store.account_count().await, 1);
}

#[tokio::test]
async fn test_register_atomic_on_store_failure() {
    let (service, store) = build_service();
    store.fail_at(FailPoint::BeforeCounterInsert);

    let err = service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Store(StoreError::Backend { .. })));
    assert_eq!(store.account_count().await, 0);
    assert_eq!(store.counter_count().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_register_same_phone() {
    let (service, store) = build_service();
    let service = Arc::new(service);

    let a = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.register(JANE_NAME, JANE_PHONE, JANE_PASSWORD).await })
    };
    let b = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.register("John Doe", JANE_PHONE, "An0ther!").await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::Store(StoreError::Conflict { .. }))))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(store.account_count().await, 1);
}

#[tokio::test]
async fn test_login_unknown_phone_and_wrong_password_look_the_same() {
    let (service, _) = build_service();
    service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();

    let unknown = service.login("+628999999999", JANE_PASSWORD).await.unwrap_err();
    let wrong = service.login(JANE_PHONE, "Wr0ng!!").await.unwrap_err();

    assert!(matches!(unknown, DomainError::Auth(AuthError::AuthenticationFailed)));
    assert!(matches!(wrong, DomainError::Auth(AuthError::AuthenticationFailed)));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_login_requires_fields() {
    let (service, _) = build_service();
    let err = service.login("", "").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "field phone_number, password cannot be empty"
    );
}

#[tokio::test]
async fn test_login_counts_each_success_only() {
    let (service, store) = build_service();
    let id = service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();

    service.login(JANE_PHONE, JANE_PASSWORD).await.unwrap();
    service.login(JANE_PHONE, JANE_PASSWORD).await.unwrap();
    let _ = service.login(JANE_PHONE, "Wr0ng!!").await;

    assert_eq!(store.get_login_counter(id).await.unwrap().count, 2);
}

#[tokio::test]
async fn test_login_fails_when_counter_cannot_be_incremented() {
    let (service, store) = build_service();
    service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();
    store.fail_at(FailPoint::OnIncrement);

    let err = service.login(JANE_PHONE, JANE_PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::Store(StoreError::Backend { .. })));
}

#[tokio::test]
async fn test_login_surfaces_backend_lookup_failure() {
    let (service, store) = build_service();
    store.fail_at(FailPoint::OnLookup);

    let err = service.login(JANE_PHONE, JANE_PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::Store(StoreError::Backend { .. })));
}

#[tokio::test]
async fn test_get_profile_accepts_bearer_prefix() {
    let (service, _) = build_service();
    service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();
    let login = service.login(JANE_PHONE, JANE_PASSWORD).await.unwrap();

    let header = format!("Bearer {}", login.token);
    let profile = service.get_profile(&header).await.unwrap();
    assert_eq!(profile.full_name, JANE_NAME);
}

#[tokio::test]
async fn test_get_profile_empty_header_is_forbidden() {
    let (service, _) = build_service();

    for header in ["", "Bearer ", "   "] {
        let err = service.get_profile(header).await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::Forbidden)));
    }
}

#[tokio::test]
async fn test_get_profile_rejects_expired_token() {
    let (service, _) = build_service();
    let token = token_service()
        .issue(Duration::seconds(-60), &AccountId::new(1))
        .unwrap();

    let err = service.get_profile(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenExpired)));
}

#[tokio::test]
async fn test_get_profile_rejects_non_numeric_payload() {
    let (service, _) = build_service();
    let token = token_service().issue(Duration::hours(1), "jane").unwrap();

    let err = service.get_profile(&token).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::PayloadTypeMismatch { .. })
    ));
}

#[tokio::test]
async fn test_get_profile_unknown_account_is_not_found() {
    let (service, _) = build_service();
    let token = token_service()
        .issue(Duration::hours(1), &AccountId::new(404))
        .unwrap();

    let err = service.get_profile(&token).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_profile_verifies_token_before_input() {
    let (service, _) = build_service();

    let err = service.update_profile("garbage", "", "").await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidTokenFormat)));
}

#[tokio::test]
async fn test_update_profile_validation() {
    let (service, _) = build_service();
    service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();
    let login = service.login(JANE_PHONE, JANE_PASSWORD).await.unwrap();

    let err = service
        .update_profile(&login.token, "", JANE_PHONE)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::RequiredFields { .. })
    ));

    let err = service
        .update_profile(&login.token, "Jo", "+6281")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::PhoneNumberLength { .. })
    ));
}

#[tokio::test]
async fn test_update_profile_to_taken_phone_conflicts() {
    let (service, store) = build_service();
    service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();
    let john = service
        .register("John Doe", "+628111111111", "An0ther!")
        .await
        .unwrap();
    let login = service.login("+628111111111", "An0ther!").await.unwrap();

    let err = service
        .update_profile(&login.token, "John Doe", JANE_PHONE)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Store(StoreError::Conflict { .. })));

    let account = store.get_by_id(john).await.unwrap();
    assert_eq!(account.phone_number, "+628111111111");
}

#[tokio::test]
async fn test_update_profile_surfaces_lookup_failure() {
    let (service, store) = build_service();
    service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();
    let login = service.login(JANE_PHONE, JANE_PASSWORD).await.unwrap();
    store.fail_at(FailPoint::OnLookup);

    let err = service
        .update_profile(&login.token, "Jane Smith", JANE_PHONE)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Store(StoreError::Backend { .. })));
}

#[tokio::test]
async fn test_register_rejects_password_past_bcrypt_input() {
    let (service, store) = build_service();

    // 27 characters, 75 bytes; bcrypt would only see the first 72
    let password = format!("A1!{}", "€".repeat(24));
    assert_eq!(password.len(), 75);

    let err = service
        .register(JANE_NAME, JANE_PHONE, &password)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::PasswordLength { .. })
    ));
    assert_eq!(store.account_count().await, 0);
}

#[tokio::test]
async fn test_login_rejects_password_differing_in_last_byte() {
    let (service, _) = build_service();

    // 64 bytes, the longest accepted password
    let password = format!("A1!{}€", "x".repeat(58));
    assert_eq!(password.len(), 64);
    service
        .register(JANE_NAME, JANE_PHONE, &password)
        .await
        .unwrap();

    let other = format!("A1!{}€", "x".repeat(57) + "y");
    assert_eq!(other.len(), 64);
    assert!(matches!(
        service.login(JANE_PHONE, &other).await,
        Err(DomainError::Auth(AuthError::AuthenticationFailed))
    ));
    assert!(service.login(JANE_PHONE, &password).await.is_ok());
}
