//! Account entity and its companion login counter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snowflake identifier assigned to an account at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u64);

impl AccountId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for AccountId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<AccountId> for u64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// A registered account
///
/// The password hash never leaves the service layer: it is skipped when
/// the entity is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Generator-assigned identifier, immutable once created
    pub id: AccountId,

    /// Display name (3 to 60 characters)
    pub full_name: String,

    /// Phone number, unique across accounts
    pub phone_number: String,

    /// Bcrypt digest of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with fresh timestamps
    pub fn new(id: AccountId, full_name: String, phone_number: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            full_name,
            phone_number,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the editable profile fields
    pub fn update_profile(&mut self, full_name: String, phone_number: String) {
        self.full_name = full_name;
        self.phone_number = phone_number;
        self.updated_at = Utc::now();
    }

    /// Public view of the account
    pub fn profile(&self) -> Profile {
        Profile {
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Number of successful logins recorded for an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCounter {
    pub account_id: AccountId,
    pub count: u64,
}

impl LoginCounter {
    /// Counter created alongside a new account
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id, count: 0 }
    }

    pub fn increment(&mut self) {
        self.count += 1;
    }
}

/// Name and phone number returned by GetProfile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: String,
    pub phone_number: String,
}
