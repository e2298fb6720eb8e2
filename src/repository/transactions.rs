//! Postgres transaction repository (append-only transfer records)

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::TransactionStore;
use crate::error::LedgerError;
use crate::models::{NewTransaction, Transaction};

pub struct PgTransactionRepository;

#[async_trait]
impl TransactionStore for PgTransactionRepository {
    async fn insert(
        &self,
        conn: &mut PgConnection,
        new: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        let id = new.id.unwrap_or_else(Uuid::new_v4);

        sqlx::query_as::<_, Transaction>(
            r#"INSERT INTO transactions (id, source_account_id, destination_account_id, amount)
               VALUES ($1, $2, $3, $4)
               RETURNING id, source_account_id, destination_account_id, amount, created_at"#,
        )
        .bind(id)
        .bind(&new.source_account_id)
        .bind(&new.destination_account_id)
        .bind(new.amount)
        .fetch_one(conn)
        .await
        .map_err(LedgerError::storage("create transaction record"))
    }

    async fn get_by_id(&self, pool: &PgPool, id: Uuid) -> Result<Transaction, LedgerError> {
        sqlx::query_as::<_, Transaction>(
            r#"SELECT id, source_account_id, destination_account_id, amount, created_at
               FROM transactions WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(LedgerError::storage("get transaction by id"))?
        .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))
    }

    async fn list_by_account(
        &self,
        pool: &PgPool,
        account_id: &str,
    ) -> Result<Vec<Transaction>, LedgerError> {
        sqlx::query_as::<_, Transaction>(
            r#"SELECT id, source_account_id, destination_account_id, amount, created_at
               FROM transactions
               WHERE source_account_id = $1 OR destination_account_id = $1
               ORDER BY created_at DESC"#,
        )
        .bind(account_id)
        .fetch_all(pool)
        .await
        .map_err(LedgerError::storage("list transactions by account"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::repository::testutil::{test_pool, unique_id};
    use crate::repository::{AccountStore, PgAccountRepository};
    use rust_decimal::Decimal;

    async fn seed_pair(pool: &PgPool) -> (String, String) {
        let accounts = PgAccountRepository;
        let a = unique_id("src");
        let b = unique_id("dst");
        accounts.create(pool, &a, Decimal::new(1000, 0)).await.unwrap();
        accounts.create(pool, &b, Decimal::new(1000, 0)).await.unwrap();
        (a, b)
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL running
    async fn test_insert_generates_id_and_timestamp() {
        let pool = test_pool().await;
        let repo = PgTransactionRepository;
        let (a, b) = seed_pair(&pool).await;

        let mut tx = pool.begin().await.unwrap();
        let record = repo
            .insert(
                &mut tx,
                NewTransaction {
                    id: None,
                    source_account_id: a.clone(),
                    destination_account_id: b.clone(),
                    amount: Decimal::new(250, 0),
                },
            )
            .await
            .expect("Should insert transaction");
        tx.commit().await.unwrap();

        assert!(!record.id.is_nil());
        assert_eq!(record.source_account_id, a);
        assert_eq!(record.destination_account_id, b);
        assert_eq!(record.amount, Decimal::new(250, 0));

        let fetched = repo.get_by_id(&pool, record.id).await.unwrap();
        assert_eq!(fetched.created_at, record.created_at);
    }

    #[tokio::test]
    #[ignore]
    async fn test_get_missing_transaction_is_not_found() {
        let pool = test_pool().await;
        let repo = PgTransactionRepository;

        let err = repo
            .get_by_id(&pool, Uuid::new_v4())
            .await
            .expect_err("Missing transaction should be NotFound");
        assert!(matches!(err, LedgerError::TransactionNotFound(_)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_list_by_account_newest_first() {
        let pool = test_pool().await;
        let repo = PgTransactionRepository;
        let (a, b) = seed_pair(&pool).await;

        for amount in [1i64, 2, 3] {
            let mut tx = pool.begin().await.unwrap();
            repo.insert(
                &mut tx,
                NewTransaction {
                    id: None,
                    source_account_id: a.clone(),
                    destination_account_id: b.clone(),
                    amount: Decimal::new(amount, 0),
                },
            )
            .await
            .unwrap();
            tx.commit().await.unwrap();
        }

        let listed = repo.list_by_account(&pool, &a).await.unwrap();
        assert_eq!(listed.len(), 3);
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }

        // destination side sees the same records
        let listed_b = repo.list_by_account(&pool, &b).await.unwrap();
        assert_eq!(listed_b.len(), 3);
    }
}
