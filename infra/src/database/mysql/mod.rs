//! MySQL implementations of the core storage traits

mod account_store_impl;

pub use account_store_impl::MySqlAccountStore;
