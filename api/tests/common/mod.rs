//! Shared wiring for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use us_api::AppState;
use us_core::repositories::MockAccountStore;
use us_core::services::credential::MIN_COST;
use us_core::services::{
    AuthServiceConfig, AuthenticationService, IdentityIdGenerator, Rs256KeyManager, TokenService,
    TokenServiceConfig,
};

pub const PRIVATE_KEY: &str = include_str!("../../../core/tests/fixtures/jwt_private_key.pem");
pub const PUBLIC_KEY: &str = include_str!("../../../core/tests/fixtures/jwt_public_key.pem");
pub const OTHER_PRIVATE_KEY: &str =
    include_str!("../../../core/tests/fixtures/other_private_key.pem");

pub const MAX_PAYLOAD: usize = 16 * 1024;

pub const JANE_NAME: &str = "Jane Doe";
pub const JANE_PHONE: &str = "+628123456789";
pub const JANE_PASSWORD: &str = "Secr3t!";

pub fn app_state() -> (web::Data<AppState<MockAccountStore>>, Arc<MockAccountStore>) {
    let store = Arc::new(MockAccountStore::new());
    let keys = Rs256KeyManager::from_pem_strings(PRIVATE_KEY, PUBLIC_KEY).unwrap();
    let token_service = Arc::new(TokenService::new(&keys, TokenServiceConfig::default()));

    let auth_service = AuthenticationService::new(
        Arc::clone(&store),
        token_service,
        Arc::new(IdentityIdGenerator::new(7).unwrap()),
        AuthServiceConfig::default().with_password_hash_cost(MIN_COST),
    );

    (web::Data::new(AppState::new(Arc::new(auth_service))), store)
}

/// Register Jane through the service and return her bearer header value
pub async fn register_and_login(state: &web::Data<AppState<MockAccountStore>>) -> (u64, String) {
    let id = state
        .auth_service
        .register(JANE_NAME, JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();
    let login = state
        .auth_service
        .login(JANE_PHONE, JANE_PASSWORD)
        .await
        .unwrap();

    (id.value(), format!("Bearer {}", login.token))
}
