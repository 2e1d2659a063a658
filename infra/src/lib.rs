//! # Infrastructure Layer
//!
//! Concrete implementations behind the core's storage interface:
//! - **Database**: MySQL connection pool, embedded migrations and the
//!   sqlx-backed `AccountStore`

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, MySqlAccountStore, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
