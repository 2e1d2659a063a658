//! MySQL implementation of the AccountStore trait.
//!
//! Accounts and login counters live in two tables; creating an account
//! writes both rows inside one transaction. Every call is bounded by the
//! configured statement timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Row, Transaction};

use us_core::domain::entities::account::{Account, AccountId, LoginCounter};
use us_core::errors::StoreError;
use us_core::repositories::account::{AccountStore, ACCOUNT_ID_FIELD, PHONE_NUMBER_FIELD};

use crate::database::connection::DatabasePool;

/// MySQL implementation of AccountStore
#[derive(Clone)]
pub struct MySqlAccountStore {
    /// Database connection pool
    pool: MySqlPool,
    /// Upper bound for one store call
    statement_timeout: Duration,
}

impl MySqlAccountStore {
    /// Create a new MySQL account store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    /// * `statement_timeout` - Deadline applied to each store call
    pub fn new(pool: MySqlPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Build a store on top of a configured pool
    pub fn from_pool(pool: &DatabasePool) -> Self {
        Self::new(pool.get_pool().clone(), pool.statement_timeout())
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, StoreError> {
        let id: u64 = row.try_get("id").map_err(column_error)?;

        Ok(Account {
            id: AccountId::new(id),
            full_name: row.try_get("full_name").map_err(column_error)?,
            phone_number: row.try_get("phone_number").map_err(column_error)?,
            password_hash: row.try_get("password_hash").map_err(column_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error)?,
        })
    }

    /// Write the account row and its counter row on an open transaction
    async fn insert_rows(
        tx: &mut Transaction<'_, MySql>,
        account: &Account,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, full_name, phone_number, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(account.id.value())
        .bind(&account.full_name)
        .bind(&account.phone_number)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&mut **tx)
        .await?;

        sqlx::query("INSERT INTO login_counters (account_id, count) VALUES (?, 0)")
            .bind(account.id.value())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        with_timeout(self.statement_timeout, operation).await
    }
}

/// Run `operation` under a deadline; dropping it on expiry rolls back any
/// transaction it holds
pub(crate) async fn with_timeout<T, F>(deadline: Duration, operation: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(deadline, operation)
        .await
        .map_err(|_| StoreError::Timeout {
            seconds: deadline.as_secs(),
        })?
}

/// Classify a sqlx error
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let field = if db.message().contains("phone_number") {
                PHONE_NUMBER_FIELD
            } else {
                ACCOUNT_ID_FIELD
            };
            StoreError::Conflict {
                field: field.to_string(),
            }
        }
        sqlx::Error::RowNotFound => StoreError::account_not_found(),
        _ => StoreError::Backend {
            message: err.to_string(),
        },
    }
}

fn column_error(err: sqlx::Error) -> StoreError {
    StoreError::Backend {
        message: format!("Failed to decode account row: {}", err),
    }
}

#[async_trait]
impl AccountStore for MySqlAccountStore {
    async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        self.bounded(async {
            let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

            match Self::insert_rows(&mut tx, account).await {
                Ok(()) => tx.commit().await.map_err(map_sqlx_error),
                Err(e) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        tracing::error!(
                            account_id = %account.id,
                            "Failed to roll back account insert: {}",
                            rollback_err
                        );
                    }
                    Err(map_sqlx_error(e))
                }
            }
        })
        .await
    }

    async fn get_by_phone(&self, phone_number: &str) -> Result<Account, StoreError> {
        let query = r#"
            SELECT id, full_name, phone_number, password_hash, created_at, updated_at
            FROM accounts
            WHERE phone_number = ?
            LIMIT 1
        "#;

        self.bounded(async {
            let row = sqlx::query(query)
                .bind(phone_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            match row {
                Some(row) => Self::row_to_account(&row),
                None => Err(StoreError::account_not_found()),
            }
        })
        .await
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Account, StoreError> {
        let query = r#"
            SELECT id, full_name, phone_number, password_hash, created_at, updated_at
            FROM accounts
            WHERE id = ?
            LIMIT 1
        "#;

        self.bounded(async {
            let row = sqlx::query(query)
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            match row {
                Some(row) => Self::row_to_account(&row),
                None => Err(StoreError::account_not_found()),
            }
        })
        .await
    }

    async fn increment_login_counter(&self, id: AccountId) -> Result<(), StoreError> {
        self.bounded(async {
            let result = sqlx::query("UPDATE login_counters SET count = count + 1 WHERE account_id = ?")
                .bind(id.value())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound {
                    resource: "login counter".to_string(),
                });
            }
            Ok(())
        })
        .await
    }

    async fn update_profile(
        &self,
        id: AccountId,
        full_name: &str,
        phone_number: &str,
    ) -> Result<(), StoreError> {
        self.bounded(async {
            // Zero affected rows is not an error: MySQL reports unchanged rows as 0
            sqlx::query(
                "UPDATE accounts SET full_name = ?, phone_number = ?, updated_at = ? WHERE id = ?",
            )
            .bind(full_name)
            .bind(phone_number)
            .bind(Utc::now())
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

            Ok(())
        })
        .await
    }

    async fn get_login_counter(&self, id: AccountId) -> Result<LoginCounter, StoreError> {
        self.bounded(async {
            let row = sqlx::query("SELECT account_id, count FROM login_counters WHERE account_id = ?")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            let row = row.ok_or_else(|| StoreError::NotFound {
                resource: "login counter".to_string(),
            })?;

            let account_id: u64 = row.try_get("account_id").map_err(column_error)?;
            let count: u64 = row.try_get("count").map_err(column_error)?;

            Ok(LoginCounter {
                account_id: AccountId::new(account_id),
                count,
            })
        })
        .await
    }
}
