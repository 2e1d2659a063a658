//! RS256 token issuance and verification

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::domain::entities::token::{Claims, TokenPayload};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;
use super::key_manager::Rs256KeyManager;

/// Algorithms accepted on verification; all share the RSA key family
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

/// Service that signs and verifies bearer tokens
///
/// Keys are read-only after construction, so one instance can be shared
/// across request handlers behind an `Arc`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a token service from an RS256 key pair
    pub fn new(key_manager: &Rs256KeyManager, config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = config.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        Self {
            encoding_key: key_manager.encoding_key().clone(),
            decoding_key: key_manager.decoding_key().clone(),
            validation,
        }
    }

    /// Signs a token carrying `payload` that is valid for `ttl`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact JWT
    /// * `Err(DomainError)` - The payload could not be encoded or signed
    pub fn issue<T: Serialize + ?Sized>(
        &self,
        ttl: Duration,
        payload: &T,
    ) -> Result<String, DomainError> {
        let dat = serde_json::to_value(payload)
            .map_err(|_| DomainError::Token(TokenError::SigningFailed))?;
        let claims = Claims::new(dat, ttl);

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::SigningFailed))
    }

    /// Verifies a token and returns its decoded claims
    pub fn verify_claims(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let err = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(err)
            })
    }

    /// Verifies a token and returns the payload from its `dat` claim
    pub fn verify(&self, token: &str) -> Result<TokenPayload, DomainError> {
        let claims = self.verify_claims(token)?;
        Ok(TokenPayload::from_value(&claims.dat)?)
    }
}
