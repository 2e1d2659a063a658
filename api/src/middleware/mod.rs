pub mod auth;

pub use auth::AuthorizationHeader;
