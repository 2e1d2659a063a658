//! Account store module.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;


pub use mock::{FailPoint, MockAccountStore, ACCOUNT_ID_FIELD, PHONE_NUMBER_FIELD};
pub use r#trait::AccountStore;
