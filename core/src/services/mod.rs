//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credential;
pub mod identity;
pub mod policy;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthServiceConfig, AuthenticationService};
pub use credential::CredentialHasher;
pub use identity::IdentityIdGenerator;
pub use policy::PasswordPolicy;
pub use token::{Rs256KeyManager, TokenService, TokenServiceConfig};
