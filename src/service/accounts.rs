//! Account manager: creation and lookup
//!
//! Account creation writes a CREATE audit entry after the insert, outside any
//! unit of work. The audit write is best-effort: its failure is logged and
//! never fails the creation.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::db::Database;
use crate::error::LedgerError;
use crate::models::{
    Account, AccountBalanceSnapshot, AuditAction, AuditLog, EntityType, NewAuditEntry,
    Transaction,
};
use crate::repository::{AccountStore, AuditStore, TransactionStore};

pub struct AccountService {
    db: Arc<Database>,
    accounts: Arc<dyn AccountStore>,
    transactions: Arc<dyn TransactionStore>,
    audit: Arc<dyn AuditStore>,
}

impl AccountService {
    pub fn new(
        db: Arc<Database>,
        accounts: Arc<dyn AccountStore>,
        transactions: Arc<dyn TransactionStore>,
        audit: Arc<dyn AuditStore>,
    ) -> Self {
        Self {
            db,
            accounts,
            transactions,
            audit,
        }
    }

    pub async fn create_account(
        &self,
        id: &str,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        if id.is_empty() {
            return Err(LedgerError::Validation {
                field: "id",
                reason: "must be non-empty",
            });
        }
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::Validation {
                field: "initial_balance",
                reason: "must not be negative",
            });
        }

        let account = self
            .accounts
            .create(self.db.pool(), id, initial_balance)
            .await?;

        // Best-effort CREATE audit entry, detached from the insert
        let entry = NewAuditEntry {
            entity_type: EntityType::Account,
            entity_id: account.id.clone(),
            action: AuditAction::Create,
            old_value: None,
            new_value: AccountBalanceSnapshot::new(&account.id, account.balance),
        };
        if let Err(e) = self.audit.record_detached(self.db.pool(), entry).await {
            tracing::error!(
                account_id = %account.id,
                error = %e,
                "failed to create audit log for account creation"
            );
        }

        tracing::info!(account_id = %account.id, "account created successfully");
        Ok(account)
    }

    pub async fn get_account(&self, id: &str) -> Result<Account, LedgerError> {
        if id.is_empty() {
            return Err(LedgerError::Validation {
                field: "id",
                reason: "must be non-empty",
            });
        }

        self.accounts.get_by_id(self.db.pool(), id).await
    }

    /// Transfers touching the account, newest first.
    pub async fn list_transactions(
        &self,
        account_id: &str,
    ) -> Result<Vec<Transaction>, LedgerError> {
        if account_id.is_empty() {
            return Err(LedgerError::Validation {
                field: "id",
                reason: "must be non-empty",
            });
        }
        if !self.accounts.exists(self.db.pool(), account_id).await? {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }

        self.transactions
            .list_by_account(self.db.pool(), account_id)
            .await
    }

    pub async fn get_transaction(&self, id: &str) -> Result<Transaction, LedgerError> {
        let id: Uuid = id.parse().map_err(|_| LedgerError::Validation {
            field: "id",
            reason: "must be a valid transaction id",
        })?;

        self.transactions.get_by_id(self.db.pool(), id).await
    }

    /// Audit trail for one entity, newest first.
    pub async fn list_audit_trail(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Vec<AuditLog>, LedgerError> {
        if entity_id.is_empty() {
            return Err(LedgerError::Validation {
                field: "entity_id",
                reason: "must be non-empty",
            });
        }

        self.audit
            .list_by_entity(self.db.pool(), entity_type, entity_id)
            .await
    }
}
