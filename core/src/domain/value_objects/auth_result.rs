//! Login result value object.

use serde::{Deserialize, Serialize};

use crate::domain::entities::account::AccountId;

/// Outcome of a successful login: the account id and a signed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub id: AccountId,

    /// RS256 JWT carrying the account id
    pub token: String,
}

impl LoginResult {
    pub fn new(id: AccountId, token: String) -> Self {
        Self { id, token }
    }
}
