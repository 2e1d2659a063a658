pub mod account;

pub use account::{AccountStore, FailPoint, MockAccountStore};
