//! Account route handlers
//!
//! - `POST /register` creates an account
//! - `POST /login` exchanges credentials for a token
//! - `GET /profile` and `PUT /profile` read and overwrite the profile of
//!   the account named by the bearer token

pub mod login;
pub mod profile;
pub mod register;

use std::sync::Arc;

use us_core::repositories::AccountStore;
use us_core::services::AuthenticationService;

/// Application state that holds shared services
pub struct AppState<S>
where
    S: AccountStore,
{
    pub auth_service: Arc<AuthenticationService<S>>,
}

impl<S: AccountStore> AppState<S> {
    pub fn new(auth_service: Arc<AuthenticationService<S>>) -> Self {
        Self { auth_service }
    }
}
