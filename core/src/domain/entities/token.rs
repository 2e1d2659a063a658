//! Token claims and the identity payload carried in them.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::account::AccountId;
use crate::errors::TokenError;

/// Default lifetime of a login token (24 hours)
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Claims structure for JWT payload
///
/// Exactly `{dat, iat, nbf, exp}`; timestamps are seconds since the epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque payload, the account id for login tokens
    pub dat: Value,

    /// Issued at
    pub iat: i64,

    /// Not before
    pub nbf: i64,

    /// Expiration
    pub exp: i64,
}

impl Claims {
    /// Builds claims valid from now until `now + ttl`
    pub fn new(dat: Value, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            dat,
            iat: now,
            nbf: now,
            exp: now + ttl.num_seconds(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// The identity value recovered from a verified token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenPayload {
    Integer(i128),
    Float(f64),
    NumericString(String),
}

impl TokenPayload {
    /// Classifies the `dat` claim; objects, arrays, booleans and null are rejected
    pub fn from_value(value: &Value) -> Result<Self, TokenError> {
        match value {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(TokenPayload::Integer(i128::from(u)))
                } else if let Some(i) = n.as_i64() {
                    Ok(TokenPayload::Integer(i128::from(i)))
                } else if let Some(f) = n.as_f64() {
                    Ok(TokenPayload::Float(f))
                } else {
                    Err(mismatch("number"))
                }
            }
            Value::String(s) => Ok(TokenPayload::NumericString(s.clone())),
            Value::Null => Err(mismatch("null")),
            Value::Bool(_) => Err(mismatch("boolean")),
            Value::Array(_) => Err(mismatch("array")),
            Value::Object(_) => Err(mismatch("object")),
        }
    }

    /// Coerces the payload to an account id
    pub fn to_account_id(&self) -> Result<AccountId, TokenError> {
        match self {
            TokenPayload::Integer(i) => u64::try_from(*i)
                .map(AccountId::new)
                .map_err(|_| mismatch("negative integer")),
            TokenPayload::Float(f) => {
                if !f.is_finite() || *f < 0.0 || *f >= u64::MAX as f64 {
                    return Err(mismatch("out of range float"));
                }
                Ok(AccountId::new(f.trunc() as u64))
            }
            TokenPayload::NumericString(s) => s
                .parse::<u64>()
                .map(AccountId::new)
                .map_err(|_| mismatch("non-numeric string")),
        }
    }
}

impl From<AccountId> for TokenPayload {
    fn from(id: AccountId) -> Self {
        TokenPayload::Integer(i128::from(id.value()))
    }
}

fn mismatch(found: &str) -> TokenError {
    TokenError::PayloadTypeMismatch {
        found: found.to_string(),
    }
}
