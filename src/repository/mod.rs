//! Repository layer for ledger storage
//!
//! Each store is a trait so services can be wired with substitutes in tests
//! (the audit best-effort policy in particular is verified with a failing
//! store). Methods that must run inside an open unit of work take
//! `&mut PgConnection` — both a `sqlx::Transaction` and a savepoint deref to
//! it — while standalone reads and writes take the pool.

pub mod accounts;
pub mod audit;
pub mod transactions;

#[cfg(test)]
pub(crate) mod testutil;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{
    Account, AuditLog, EntityType, NewAuditEntry, NewTransaction, Transaction,
};

pub use accounts::PgAccountRepository;
pub use audit::PgAuditRepository;
pub use transactions::PgTransactionRepository;

/// CRUD and locked reads over account rows
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account row; unique violation maps to `AlreadyExists`.
    async fn create(&self, pool: &PgPool, id: &str, balance: Decimal)
    -> Result<Account, LedgerError>;

    /// Plain read; missing row maps to `AccountNotFound`.
    async fn get_by_id(&self, pool: &PgPool, id: &str) -> Result<Account, LedgerError>;

    /// Locking read (`FOR UPDATE`). Valid only on a connection with an open
    /// unit of work; the lock is held until that unit of work ends.
    async fn get_by_id_for_update(
        &self,
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<Account>, LedgerError>;

    /// Overwrite the balance of a locked row; zero rows affected maps to
    /// `AccountNotFound`.
    async fn update_balance(
        &self,
        conn: &mut PgConnection,
        id: &str,
        new_balance: Decimal,
    ) -> Result<(), LedgerError>;

    async fn exists(&self, pool: &PgPool, id: &str) -> Result<bool, LedgerError>;
}

/// Append-only transfer records
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert within an open unit of work; generates the id when absent.
    async fn insert(
        &self,
        conn: &mut PgConnection,
        new: NewTransaction,
    ) -> Result<Transaction, LedgerError>;

    async fn get_by_id(&self, pool: &PgPool, id: Uuid) -> Result<Transaction, LedgerError>;

    /// Transfers touching the account as source or destination, newest first.
    async fn list_by_account(
        &self,
        pool: &PgPool,
        account_id: &str,
    ) -> Result<Vec<Transaction>, LedgerError>;
}

/// Append-only audit trail
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Insert within an open unit of work (transfer audit phase).
    async fn record(
        &self,
        conn: &mut PgConnection,
        entry: NewAuditEntry,
    ) -> Result<AuditLog, LedgerError>;

    /// Insert outside any unit of work (account-creation audit).
    async fn record_detached(
        &self,
        pool: &PgPool,
        entry: NewAuditEntry,
    ) -> Result<AuditLog, LedgerError>;

    /// Entries for one entity, newest first.
    async fn list_by_entity(
        &self,
        pool: &PgPool,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Vec<AuditLog>, LedgerError>;
}
