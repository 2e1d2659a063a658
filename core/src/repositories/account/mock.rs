//! In-memory implementation of AccountStore for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use crate::domain::entities::account::{Account, AccountId, LoginCounter};
use crate::errors::StoreError;

use super::trait_::AccountStore;

/// Conflict field reported for a duplicate phone number
pub const PHONE_NUMBER_FIELD: &str = "phone number";

/// Conflict field reported for a duplicate account id
pub const ACCOUNT_ID_FIELD: &str = "account id";

/// Places where the mock store can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// After the account row is written, before the counter row
    BeforeCounterInsert,
    /// On `increment_login_counter`
    OnIncrement,
    /// On `get_by_phone` and `get_by_id`
    OnLookup,
}

#[derive(Default)]
struct MockState {
    accounts: HashMap<AccountId, Account>,
    counters: HashMap<AccountId, LoginCounter>,
}

/// Mock account store
///
/// Both tables sit behind one lock. `insert_account` writes the account
/// row, then the counter row, and undoes the first write if the second
/// cannot happen.
#[derive(Clone, Default)]
pub struct MockAccountStore {
    state: Arc<RwLock<MockState>>,
    fail_point: Arc<Mutex<Option<FailPoint>>>,
}

impl MockAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given operation fail until cleared
    pub fn fail_at(&self, point: FailPoint) {
        if let Ok(mut guard) = self.fail_point.lock() {
            *guard = Some(point);
        }
    }

    pub fn clear_fail_point(&self) {
        if let Ok(mut guard) = self.fail_point.lock() {
            *guard = None;
        }
    }

    /// Number of stored accounts
    pub async fn account_count(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    /// Number of stored login counters
    pub async fn counter_count(&self) -> usize {
        self.state.read().await.counters.len()
    }

    fn should_fail(&self, point: FailPoint) -> bool {
        self.fail_point
            .lock()
            .map(|guard| *guard == Some(point))
            .unwrap_or(false)
    }

    fn injected(point: FailPoint) -> StoreError {
        StoreError::Backend {
            message: format!("injected failure at {:?}", point),
        }
    }
}

#[async_trait]
impl AccountStore for MockAccountStore {
    async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        if state.accounts.contains_key(&account.id) {
            return Err(StoreError::Conflict {
                field: ACCOUNT_ID_FIELD.to_string(),
            });
        }
        if state
            .accounts
            .values()
            .any(|a| a.phone_number == account.phone_number)
        {
            return Err(StoreError::Conflict {
                field: PHONE_NUMBER_FIELD.to_string(),
            });
        }

        // Both rows are written under the one write lock; a failure between
        // them removes the account row again before the lock is released
        state.accounts.insert(account.id, account.clone());

        if self.should_fail(FailPoint::BeforeCounterInsert) {
            state.accounts.remove(&account.id);
            return Err(Self::injected(FailPoint::BeforeCounterInsert));
        }

        let counter = LoginCounter::new(account.id);
        state.counters.insert(counter.account_id, counter);
        Ok(())
    }

    async fn get_by_phone(&self, phone_number: &str) -> Result<Account, StoreError> {
        if self.should_fail(FailPoint::OnLookup) {
            return Err(Self::injected(FailPoint::OnLookup));
        }

        let state = self.state.read().await;
        state
            .accounts
            .values()
            .find(|a| a.phone_number == phone_number)
            .cloned()
            .ok_or_else(StoreError::account_not_found)
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Account, StoreError> {
        if self.should_fail(FailPoint::OnLookup) {
            return Err(Self::injected(FailPoint::OnLookup));
        }

        let state = self.state.read().await;
        state
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(StoreError::account_not_found)
    }

    async fn increment_login_counter(&self, id: AccountId) -> Result<(), StoreError> {
        if self.should_fail(FailPoint::OnIncrement) {
            return Err(Self::injected(FailPoint::OnIncrement));
        }

        let mut state = self.state.write().await;
        match state.counters.get_mut(&id) {
            Some(counter) => {
                counter.increment();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                resource: "login counter".to_string(),
            }),
        }
    }

    async fn update_profile(
        &self,
        id: AccountId,
        full_name: &str,
        phone_number: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        if state
            .accounts
            .values()
            .any(|a| a.id != id && a.phone_number == phone_number)
        {
            return Err(StoreError::Conflict {
                field: PHONE_NUMBER_FIELD.to_string(),
            });
        }

        if let Some(account) = state.accounts.get_mut(&id) {
            account.update_profile(full_name.to_string(), phone_number.to_string());
        }
        Ok(())
    }

    async fn get_login_counter(&self, id: AccountId) -> Result<LoginCounter, StoreError> {
        let state = self.state.read().await;
        state.counters.get(&id).copied().ok_or_else(|| StoreError::NotFound {
            resource: "login counter".to_string(),
        })
    }
}
