//! Transfer engine
//!
//! Moves an amount between two accounts inside one strictly-serializable unit
//! of work. Row locks are always taken in canonical identifier order, never in
//! request order, so reversed-direction transfers on the same pair cannot
//! deadlock each other.
//!
//! The unit of work has two phases. Phase one (locked reads, both balance
//! updates, the transaction record) is all-or-nothing: any failure before
//! commit rolls everything back. Phase two (the three audit entries) runs in a
//! savepoint on the same connection: it commits atomically with phase one when
//! healthy, but its failure only rolls back to the savepoint and the transfer
//! proceeds.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::{Acquire, Postgres};

use crate::db::Database;
use crate::error::LedgerError;
use crate::models::{
    Account, AccountBalanceSnapshot, AuditAction, EntityType, NewAuditEntry, NewTransaction,
    Transaction, TransactionSnapshot,
};
use crate::repository::{AccountStore, AuditStore, TransactionStore};

pub struct TransferService {
    db: Arc<Database>,
    accounts: Arc<dyn AccountStore>,
    transactions: Arc<dyn TransactionStore>,
    audit: Arc<dyn AuditStore>,
    deadline: Duration,
}

/// Canonical lock order for a pair of account ids: lexicographic, independent
/// of which side is source or destination.
pub fn lock_order<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Pre-validation, performed before any storage access.
fn validate_transfer(
    source_id: &str,
    destination_id: &str,
    amount: Decimal,
) -> Result<(), LedgerError> {
    if source_id.is_empty() {
        return Err(LedgerError::Validation {
            field: "source_account_id",
            reason: "must be non-empty",
        });
    }
    if destination_id.is_empty() {
        return Err(LedgerError::Validation {
            field: "destination_account_id",
            reason: "must be non-empty",
        });
    }
    if source_id == destination_id {
        return Err(LedgerError::SameAccount);
    }
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

impl TransferService {
    pub fn new(
        db: Arc<Database>,
        accounts: Arc<dyn AccountStore>,
        transactions: Arc<dyn TransactionStore>,
        audit: Arc<dyn AuditStore>,
        deadline_ms: u64,
    ) -> Self {
        Self {
            db,
            accounts,
            transactions,
            audit,
            deadline: Duration::from_millis(deadline_ms),
        }
    }

    /// Execute an atomic transfer between two accounts.
    ///
    /// The whole transactional section, lock waits included, is bounded by the
    /// configured deadline; expiry drops the unit of work, which rolls back.
    pub async fn transfer(
        &self,
        source_id: &str,
        destination_id: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        if let Err(e) = validate_transfer(source_id, destination_id, amount) {
            tracing::warn!(
                source_account_id = %source_id,
                destination_account_id = %destination_id,
                amount = %amount,
                error = %e,
                "invalid transfer request"
            );
            return Err(e);
        }

        let result = tokio::time::timeout(
            self.deadline,
            self.transfer_locked(source_id, destination_id, amount),
        )
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    source_account_id = %source_id,
                    destination_account_id = %destination_id,
                    deadline_ms = self.deadline.as_millis() as u64,
                    "transfer deadline expired before commit, rolling back"
                );
                Err(LedgerError::DeadlineExceeded)
            }
        }
    }

    async fn transfer_locked(
        &self,
        source_id: &str,
        destination_id: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(LedgerError::storage("begin"))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(LedgerError::storage("set isolation level"))?;

        // Lock both rows in canonical order, regardless of transfer direction.
        let (first_id, second_id) = lock_order(source_id, destination_id);
        let first = self.accounts.get_by_id_for_update(&mut tx, first_id).await?;
        let second = self
            .accounts
            .get_by_id_for_update(&mut tx, second_id)
            .await?;

        let (source, destination) = if first_id == source_id {
            (first, second)
        } else {
            (second, first)
        };

        let Some(source) = source else {
            tracing::warn!(source_account_id = %source_id, "source account not found");
            return Err(LedgerError::SourceAccountNotFound(source_id.to_string()));
        };
        let Some(destination) = destination else {
            tracing::warn!(
                destination_account_id = %destination_id,
                "destination account not found"
            );
            return Err(LedgerError::DestinationAccountNotFound(
                destination_id.to_string(),
            ));
        };

        if source.balance < amount {
            tracing::warn!(
                source_account_id = %source_id,
                available_balance = %source.balance,
                requested_amount = %amount,
                "insufficient balance in source account"
            );
            return Err(LedgerError::InsufficientBalance {
                account_id: source.id.clone(),
                available: source.balance,
                requested: amount,
            });
        }

        let new_source_balance = source.balance - amount;
        let new_destination_balance = destination.balance + amount;

        self.accounts
            .update_balance(&mut tx, source_id, new_source_balance)
            .await?;
        self.accounts
            .update_balance(&mut tx, destination_id, new_destination_balance)
            .await?;

        let record = self
            .transactions
            .insert(
                &mut tx,
                NewTransaction {
                    id: None,
                    source_account_id: source_id.to_string(),
                    destination_account_id: destination_id.to_string(),
                    amount,
                },
            )
            .await?;

        // Phase two: best-effort audit trail. Failure never rolls back the
        // balances staged above.
        if let Err(e) = self
            .write_transfer_audit(
                &mut tx,
                &record,
                &source,
                new_source_balance,
                &destination,
                new_destination_balance,
            )
            .await
        {
            tracing::warn!(
                transaction_id = %record.id,
                error = %e,
                "failed to create audit logs for transfer, continuing"
            );
        }

        tx.commit().await.map_err(LedgerError::storage("commit"))?;

        tracing::info!(
            transaction_id = %record.id,
            source_account_id = %source_id,
            destination_account_id = %destination_id,
            amount = %amount,
            "transfer committed"
        );

        Ok(record)
    }

    /// Insert the debit, credit, and transfer audit entries in a savepoint so
    /// their failure domain stays separate from the balance updates.
    async fn write_transfer_audit(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        record: &Transaction,
        source: &Account,
        new_source_balance: Decimal,
        destination: &Account,
        new_destination_balance: Decimal,
    ) -> Result<(), LedgerError> {
        let entries = [
            NewAuditEntry {
                entity_type: EntityType::Account,
                entity_id: source.id.clone(),
                action: AuditAction::Debit,
                old_value: Some(AccountBalanceSnapshot::new(&source.id, source.balance)),
                new_value: AccountBalanceSnapshot::new(&source.id, new_source_balance),
            },
            NewAuditEntry {
                entity_type: EntityType::Account,
                entity_id: destination.id.clone(),
                action: AuditAction::Credit,
                old_value: Some(AccountBalanceSnapshot::new(
                    &destination.id,
                    destination.balance,
                )),
                new_value: AccountBalanceSnapshot::new(
                    &destination.id,
                    new_destination_balance,
                ),
            },
            NewAuditEntry {
                entity_type: EntityType::Transaction,
                entity_id: record.id.to_string(),
                action: AuditAction::Transfer,
                old_value: None,
                new_value: serde_json::json!(TransactionSnapshot::from(record)),
            },
        ];

        let mut savepoint = tx
            .begin()
            .await
            .map_err(LedgerError::storage("open audit savepoint"))?;

        let outcome = async {
            for entry in entries {
                self.audit.record(&mut savepoint, entry).await?;
            }
            Ok::<(), LedgerError>(())
        }
        .await;

        match outcome {
            Ok(()) => savepoint
                .commit()
                .await
                .map_err(LedgerError::storage("release audit savepoint")),
            Err(e) => {
                savepoint.rollback().await.ok();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_order_is_canonical() {
        assert_eq!(lock_order("acc001", "acc002"), ("acc001", "acc002"));
        assert_eq!(lock_order("acc002", "acc001"), ("acc001", "acc002"));
        assert_eq!(lock_order("b", "a"), ("a", "b"));
    }

    #[test]
    fn test_lock_order_independent_of_direction() {
        let forward = lock_order("alice", "bob");
        let reverse = lock_order("bob", "alice");
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_validate_rejects_empty_source_first() {
        let err = validate_transfer("", "", Decimal::ONE).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation {
                field: "source_account_id",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_empty_destination() {
        let err = validate_transfer("acc001", "", Decimal::ONE).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation {
                field: "destination_account_id",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_same_account() {
        let err = validate_transfer("acc001", "acc001", Decimal::new(100, 0)).unwrap_err();
        assert!(matches!(err, LedgerError::SameAccount));
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let err = validate_transfer("acc001", "acc002", Decimal::ZERO).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount));

        let err = validate_transfer("acc001", "acc002", Decimal::new(-5, 0)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount));
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(validate_transfer("acc001", "acc002", Decimal::new(250, 0)).is_ok());
    }
}
