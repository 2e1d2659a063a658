//! Tests for RS256 key loading

use us_shared::config::{JwtConfig, KeySource};

use crate::errors::{DomainError, TokenError};
use crate::services::token::Rs256KeyManager;

const PRIVATE_KEY: &str = include_str!("../../../../tests/fixtures/jwt_private_key.pem");
const PUBLIC_KEY: &str = include_str!("../../../../tests/fixtures/jwt_public_key.pem");

fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_from_pem_strings() {
    let manager = Rs256KeyManager::from_pem_strings(PRIVATE_KEY, PUBLIC_KEY).unwrap();
    assert_eq!(manager.origin(), "memory");
}

#[test]
fn test_load_from_files() {
    let manager = Rs256KeyManager::from_files(
        fixture_path("jwt_private_key.pem"),
        fixture_path("jwt_public_key.pem"),
    )
    .unwrap();
    assert!(manager.origin().contains("jwt_private_key.pem"));
}

#[test]
fn test_load_from_config_mixed_sources() {
    let config = JwtConfig {
        private_key: KeySource::Pem(PRIVATE_KEY.to_string()),
        public_key: KeySource::File(fixture_path("jwt_public_key.pem")),
        ..Default::default()
    };
    assert!(Rs256KeyManager::from_config(&config).is_ok());
}

#[test]
fn test_malformed_pem_is_key_load_error() {
    let result = Rs256KeyManager::from_pem_strings("not a key", PUBLIC_KEY);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::KeyLoadError { .. }))
    ));

    let result = Rs256KeyManager::from_pem_strings(PRIVATE_KEY, "not a key");
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::KeyLoadError { .. }))
    ));
}

#[test]
fn test_missing_file_is_key_load_error() {
    let result = Rs256KeyManager::from_files(
        fixture_path("missing_private.pem"),
        fixture_path("jwt_public_key.pem"),
    );
    match result {
        Err(DomainError::Token(TokenError::KeyLoadError { message })) => {
            assert!(message.contains("private key"));
        }
        other => panic!("expected key load error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_debug_does_not_print_keys() {
    let manager = Rs256KeyManager::from_pem_strings(PRIVATE_KEY, PUBLIC_KEY).unwrap();
    let debug = format!("{:?}", manager);
    assert!(!debug.contains("BEGIN"));
}
