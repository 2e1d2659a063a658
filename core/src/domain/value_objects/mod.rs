//! Value objects returned by the authentication flows.

pub mod auth_result;

pub use auth_result::LoginResult;
