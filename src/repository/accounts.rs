//! Postgres account repository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use super::AccountStore;
use crate::error::LedgerError;
use crate::models::Account;

pub struct PgAccountRepository;

#[async_trait]
impl AccountStore for PgAccountRepository {
    async fn create(
        &self,
        pool: &PgPool,
        id: &str,
        balance: Decimal,
    ) -> Result<Account, LedgerError> {
        let account = sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (id, balance)
               VALUES ($1, $2)
               RETURNING id, balance, created_at, updated_at"#,
        )
        .bind(id)
        .bind(balance)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                LedgerError::AlreadyExists(id.to_string())
            } else {
                LedgerError::Storage {
                    operation: "create account",
                    source: e,
                }
            }
        })?;

        Ok(account)
    }

    async fn get_by_id(&self, pool: &PgPool, id: &str) -> Result<Account, LedgerError> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, balance, created_at, updated_at
               FROM accounts WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(LedgerError::storage("get account by id"))?
        .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
    }

    async fn get_by_id_for_update(
        &self,
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<Account>, LedgerError> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, balance, created_at, updated_at
               FROM accounts WHERE id = $1
               FOR UPDATE"#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(LedgerError::storage("get account for update"))
    }

    async fn update_balance(
        &self,
        conn: &mut PgConnection,
        id: &str,
        new_balance: Decimal,
    ) -> Result<(), LedgerError> {
        let result = sqlx::query(
            r#"UPDATE accounts
               SET balance = $1, updated_at = CURRENT_TIMESTAMP
               WHERE id = $2"#,
        )
        .bind(new_balance)
        .bind(id)
        .execute(conn)
        .await
        .map_err(LedgerError::storage("update account balance"))?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::AccountNotFound(id.to_string()));
        }

        Ok(())
    }

    async fn exists(&self, pool: &PgPool, id: &str) -> Result<bool, LedgerError> {
        sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)"#)
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(LedgerError::storage("check account exists"))
    }
}
