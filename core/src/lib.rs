//! # UserService Core
//!
//! Core business logic and domain layer for the UserService backend.
//! This crate contains the domain entities, the identity & credential
//! services, the account store interface and the error types the other
//! layers build on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Account, AccountId, Claims, LoginCounter, LoginResult, Profile, TokenPayload};
pub use errors::{
    AuthError, DomainError, DomainResult, StoreError, TokenError, ValidationError,
};
pub use repositories::{AccountStore, FailPoint, MockAccountStore};
pub use services::{
    AuthServiceConfig, AuthenticationService, CredentialHasher, IdentityIdGenerator,
    PasswordPolicy, Rs256KeyManager, TokenService, TokenServiceConfig,
};
