pub mod account;
pub mod health;

pub use account::AppState;
