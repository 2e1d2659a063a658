//! RS256 key management for JWT signing and verification

use std::fs;
use std::path::Path;

use jsonwebtoken::{DecodingKey, EncodingKey};
use us_shared::config::{JwtConfig, KeySource};

use crate::errors::{DomainError, TokenError};

/// Holder of the RS256 key pair used to sign and verify tokens
#[derive(Clone)]
pub struct Rs256KeyManager {
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    /// Where the keys were loaded from, for diagnostics
    origin: String,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("origin", &self.origin)
            .finish()
    }
}

impl Rs256KeyManager {
    /// Creates a key manager from PEM strings
    ///
    /// # Arguments
    ///
    /// * `private_key_pem` - PEM-encoded RSA private key
    /// * `public_key_pem` - PEM-encoded RSA public key
    ///
    /// # Returns
    ///
    /// * `Ok(Rs256KeyManager)` - Key manager initialized successfully
    /// * `Err(DomainError)` - Invalid key format
    pub fn from_pem_strings(
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        let (encoding_key, decoding_key) = parse_pair(private_key_pem, public_key_pem)?;

        Ok(Self {
            encoding_key,
            decoding_key,
            origin: "memory".to_string(),
        })
    }

    /// Creates a key manager from key file paths
    ///
    /// ```no_run
    /// use us_core::services::token::Rs256KeyManager;
    ///
    /// let key_manager = Rs256KeyManager::from_files(
    ///     "keys/jwt_private_key.pem",
    ///     "keys/jwt_public_key.pem",
    /// ).expect("Failed to load keys");
    /// ```
    pub fn from_files<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_key_path = private_key_path.as_ref();
        let public_key_path = public_key_path.as_ref();

        let private_key_pem = fs::read_to_string(private_key_path)
            .map_err(|e| key_error(format!("Failed to read private key: {}", e)))?;
        let public_key_pem = fs::read_to_string(public_key_path)
            .map_err(|e| key_error(format!("Failed to read public key: {}", e)))?;

        let (encoding_key, decoding_key) = parse_pair(&private_key_pem, &public_key_pem)?;

        Ok(Self {
            encoding_key,
            decoding_key,
            origin: format!(
                "{} / {}",
                private_key_path.display(),
                public_key_path.display()
            ),
        })
    }

    /// Creates a key manager from the JWT configuration
    ///
    /// Each key may independently come from inline PEM or a file.
    pub fn from_config(config: &JwtConfig) -> Result<Self, DomainError> {
        let private_key_pem = read_source(&config.private_key, "private")?;
        let public_key_pem = read_source(&config.public_key, "public")?;

        let (encoding_key, decoding_key) = parse_pair(&private_key_pem, &public_key_pem)?;

        Ok(Self {
            encoding_key,
            decoding_key,
            origin: format!("{:?} / {:?}", config.private_key, config.public_key),
        })
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

fn read_source(source: &KeySource, which: &str) -> Result<String, DomainError> {
    source
        .read()
        .map_err(|e| key_error(format!("Failed to read {} key: {}", which, e)))
}

fn parse_pair(
    private_key_pem: &str,
    public_key_pem: &str,
) -> Result<(EncodingKey, DecodingKey), DomainError> {
    let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map_err(|e| key_error(format!("Invalid private key format: {}", e)))?;

    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| key_error(format!("Invalid public key format: {}", e)))?;

    Ok((encoding_key, decoding_key))
}

fn key_error(message: String) -> DomainError {
    DomainError::Token(TokenError::KeyLoadError { message })
}
