//! Account store trait defining the interface for account persistence.
//!
//! An account is always created together with its login counter; the two
//! rows live and die in one transaction. Implementations report failures
//! through [`StoreError`] so callers can tell a uniqueness conflict from a
//! missing record or a backend fault.

use async_trait::async_trait;

use crate::domain::entities::account::{Account, AccountId, LoginCounter};
use crate::errors::StoreError;

/// Durable storage for accounts and their login counters
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert an account and its counter (count 0) atomically
    ///
    /// # Returns
    /// * `Ok(())` - Both rows committed
    /// * `Err(StoreError::Conflict)` - The id or phone number is taken
    /// * `Err(StoreError::Backend)` - Anything else; nothing was committed
    async fn insert_account(&self, account: &Account) -> Result<(), StoreError>;

    /// Find an account by phone number
    ///
    /// Returns `StoreError::NotFound` when no account has that number.
    async fn get_by_phone(&self, phone_number: &str) -> Result<Account, StoreError>;

    /// Find an account by id
    async fn get_by_id(&self, id: AccountId) -> Result<Account, StoreError>;

    /// Add one to the account's login counter
    ///
    /// A missing counter row is `StoreError::NotFound`.
    async fn increment_login_counter(&self, id: AccountId) -> Result<(), StoreError>;

    /// Overwrite the account's name and phone number
    ///
    /// Updating an unknown id, or writing identical values, is not an error.
    /// A phone number owned by another account is `StoreError::Conflict`.
    async fn update_profile(
        &self,
        id: AccountId,
        full_name: &str,
        phone_number: &str,
    ) -> Result<(), StoreError>;

    /// Read the login counter of an account
    async fn get_login_counter(&self, id: AccountId) -> Result<LoginCounter, StoreError>;
}
