//! Main authentication service implementation

use std::sync::Arc;

use tracing::{error, info, warn};
use us_shared::utils::mask_phone_number;

use crate::domain::entities::account::{Account, AccountId, Profile};
use crate::domain::value_objects::LoginResult;
use crate::errors::{AuthError, DomainError, DomainResult, StoreError};
use crate::repositories::AccountStore;
use crate::services::credential::CredentialHasher;
use crate::services::identity::IdentityIdGenerator;
use crate::services::policy::PasswordPolicy;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Optional scheme prefix on the Authorization header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Authentication service for registration, login and profile access
pub struct AuthenticationService<S: AccountStore> {
    /// Account persistence
    account_store: Arc<S>,
    /// Token signing and verification
    token_service: Arc<TokenService>,
    /// Account id source
    id_generator: Arc<IdentityIdGenerator>,
    hasher: CredentialHasher,
    policy: PasswordPolicy,
    config: AuthServiceConfig,
}

impl<S: AccountStore> AuthenticationService<S> {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `account_store` - Store for accounts and login counters
    /// * `token_service` - Service for JWT issuance and verification
    /// * `id_generator` - Snowflake generator for new account ids
    /// * `config` - Token lifetime and hashing cost
    pub fn new(
        account_store: Arc<S>,
        token_service: Arc<TokenService>,
        id_generator: Arc<IdentityIdGenerator>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            account_store,
            token_service,
            id_generator,
            hasher: CredentialHasher::new(config.password_hash_cost),
            policy: PasswordPolicy::new(),
            config,
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Rejects empty fields
    /// 2. Validates phone, name and password, in that order
    /// 3. Hashes the password and assigns a new id
    /// 4. Stores the account and its login counter in one transaction
    ///
    /// # Returns
    ///
    /// * `Ok(AccountId)` - Id of the new account
    /// * `Err(DomainError)` - Validation failure, hashing failure, or a
    ///   store error such as a duplicate phone number
    pub async fn register(
        &self,
        full_name: &str,
        phone_number: &str,
        password: &str,
    ) -> DomainResult<AccountId> {
        let masked = mask_phone_number(phone_number);

        self.policy.require_fields(&[
            ("full_name", full_name),
            ("phone_number", phone_number),
            ("password", password),
        ])?;

        if let Err(e) = self
            .policy
            .validate_registration(full_name, phone_number, password)
        {
            warn!(phone = %masked, reason = %e, "Registration rejected");
            return Err(e.into());
        }

        let password_hash = self.hasher.hash(password)?;
        let id = self.id_generator.generate();
        let account = Account::new(
            id,
            full_name.to_string(),
            phone_number.to_string(),
            password_hash,
        );

        if let Err(e) = self.account_store.insert_account(&account).await {
            log_store_failure("register", &masked, &e);
            return Err(e.into());
        }

        info!(account_id = %id, phone = %masked, "Account registered");
        Ok(id)
    }

    /// Log in with phone number and password
    ///
    /// An unknown phone number and a wrong password produce the same
    /// `AuthError::AuthenticationFailed`. The login only succeeds once the
    /// login counter has been incremented.
    pub async fn login(&self, phone_number: &str, password: &str) -> DomainResult<LoginResult> {
        let masked = mask_phone_number(phone_number);

        self.policy
            .require_fields(&[("phone_number", phone_number), ("password", password)])?;

        let account = match self.account_store.get_by_phone(phone_number).await {
            Ok(account) => account,
            Err(e) if e.is_not_found() => {
                warn!(phone = %masked, "Login failed: unknown phone number");
                return Err(AuthError::AuthenticationFailed.into());
            }
            Err(e) => {
                log_store_failure("login", &masked, &e);
                return Err(e.into());
            }
        };

        if !self.hasher.verify(&account.password_hash, password) {
            warn!(account_id = %account.id, phone = %masked, "Login failed: wrong password");
            return Err(AuthError::AuthenticationFailed.into());
        }

        let token = self.token_service.issue(self.config.token_ttl, &account.id)?;

        if let Err(e) = self.account_store.increment_login_counter(account.id).await {
            log_store_failure("login", &masked, &e);
            return Err(e.into());
        }

        info!(account_id = %account.id, phone = %masked, "Login succeeded");
        Ok(LoginResult::new(account.id, token))
    }

    /// Read the profile of the account named by the bearer token
    pub async fn get_profile(&self, authorization: &str) -> DomainResult<Profile> {
        let account_id = self.authenticate(authorization)?;

        let account = self.account_store.get_by_id(account_id).await.map_err(|e| {
            warn!(account_id = %account_id, reason = %e, "Profile lookup failed");
            DomainError::from(e)
        })?;

        Ok(account.profile())
    }

    /// Overwrite name and phone number of the account named by the bearer token
    ///
    /// The lookup of the new phone number only surfaces unexpected store
    /// failures; a number already taken by another account is rejected by
    /// the store's uniqueness constraint.
    pub async fn update_profile(
        &self,
        authorization: &str,
        full_name: &str,
        phone_number: &str,
    ) -> DomainResult<()> {
        let account_id = self.authenticate(authorization)?;
        let masked = mask_phone_number(phone_number);

        self.policy
            .require_fields(&[("full_name", full_name), ("phone_number", phone_number)])?;

        if let Err(e) = self.policy.validate_profile(full_name, phone_number) {
            warn!(account_id = %account_id, phone = %masked, reason = %e, "Profile update rejected");
            return Err(e.into());
        }

        match self.account_store.get_by_phone(phone_number).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => {
                log_store_failure("update_profile", &masked, &e);
                return Err(e.into());
            }
        }

        if let Err(e) = self
            .account_store
            .update_profile(account_id, full_name, phone_number)
            .await
        {
            log_store_failure("update_profile", &masked, &e);
            return Err(e.into());
        }

        info!(account_id = %account_id, phone = %masked, "Profile updated");
        Ok(())
    }

    /// Resolve an Authorization header value to an account id
    ///
    /// The `Bearer ` prefix is optional. An empty value is
    /// `AuthError::Forbidden`; a bad token is a `TokenError`.
    pub fn authenticate(&self, authorization: &str) -> DomainResult<AccountId> {
        let token = authorization
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(authorization)
            .trim();

        if token.is_empty() {
            warn!("Missing bearer token");
            return Err(AuthError::Forbidden.into());
        }

        let payload = self.token_service.verify(token).map_err(|e| {
            warn!(reason = %e, "Token rejected");
            e
        })?;

        Ok(payload.to_account_id()?)
    }
}

fn log_store_failure(operation: &str, masked_phone: &str, err: &StoreError) {
    match err {
        StoreError::Conflict { .. } | StoreError::NotFound { .. } => {
            warn!(operation, phone = %masked_phone, reason = %err, "Store rejected request");
        }
        StoreError::Timeout { .. } | StoreError::Backend { .. } => {
            error!(operation, phone = %masked_phone, reason = %err, "Store failure");
        }
    }
}
