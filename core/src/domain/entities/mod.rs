//! Domain entities representing core business objects.

pub mod account;
pub mod token;

// Re-export commonly used types
pub use account::{Account, AccountId, LoginCounter, Profile};
pub use token::{Claims, TokenPayload, DEFAULT_TOKEN_TTL_HOURS};
