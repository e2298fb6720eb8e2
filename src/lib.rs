//! Ledgerd - Internal Transfer Ledger Service
//!
//! Named accounts with non-negative balances, atomic pairwise transfers, and
//! an append-only audit trail over PostgreSQL.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with documented defaults
//! - [`logging`] - tracing setup (rolling file + stdout)
//! - [`db`] - PostgreSQL connection pool
//! - [`schema`] - ledger schema bootstrap
//! - [`models`] - Account, Transaction, and AuditLog types
//! - [`error`] - ledger error taxonomy
//! - [`repository`] - account / transaction / audit stores
//! - [`service`] - account manager and transfer engine
//! - [`gateway`] - axum HTTP boundary

pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod repository;
pub mod schema;
pub mod service;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use error::LedgerError;
pub use models::{Account, AuditAction, AuditLog, EntityType, Transaction};
pub use repository::{
    AccountStore, AuditStore, PgAccountRepository, PgAuditRepository, PgTransactionRepository,
    TransactionStore,
};
pub use service::{AccountService, TransferService};
