//! Ledger error types
//!
//! One taxonomy for the whole service. Domain errors carry a stable `code()`
//! identity for API responses; storage failures keep the failing operation's
//! name and the underlying cause, which is logged but never leaked to callers.

use rust_decimal::Decimal;
use thiserror::Error;

/// Ledger error types
#[derive(Error, Debug)]
pub enum LedgerError {
    // === Validation Errors ===
    #[error("validation error on field '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error("source and destination accounts cannot be the same")]
    SameAccount,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    // === Account Errors ===
    #[error("account '{0}' already exists")]
    AlreadyExists(String),

    #[error("account '{0}' not found")]
    AccountNotFound(String),

    #[error("source account '{0}' not found")]
    SourceAccountNotFound(String),

    #[error("destination account '{0}' not found")]
    DestinationAccountNotFound(String),

    #[error("insufficient balance in account '{account_id}': available {available}, requested {requested}")]
    InsufficientBalance {
        account_id: String,
        available: Decimal,
        requested: Decimal,
    },

    // === Transaction Errors ===
    #[error("transaction '{0}' not found")]
    TransactionNotFound(String),

    // === System Errors ===
    #[error("transfer deadline exceeded")]
    DeadlineExceeded,

    #[error("storage failure during '{operation}'")]
    Storage {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl LedgerError {
    /// Wrap a storage failure with the failing operation's name.
    pub fn storage(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| LedgerError::Storage { operation, source }
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::Validation { .. } => "VALIDATION_ERROR",
            LedgerError::SameAccount => "SAME_ACCOUNT",
            LedgerError::InvalidAmount => "INVALID_AMOUNT",
            LedgerError::AlreadyExists(_) => "ALREADY_EXISTS",
            LedgerError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            LedgerError::SourceAccountNotFound(_) => "SOURCE_ACCOUNT_NOT_FOUND",
            LedgerError::DestinationAccountNotFound(_) => "DESTINATION_ACCOUNT_NOT_FOUND",
            LedgerError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            LedgerError::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            LedgerError::DeadlineExceeded => "DEADLINE_EXCEEDED",
            LedgerError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// HTTP status code suggestion for the gateway layer
    pub fn http_status(&self) -> u16 {
        match self {
            LedgerError::Validation { .. }
            | LedgerError::SameAccount
            | LedgerError::InvalidAmount => 400,
            LedgerError::AlreadyExists(_) => 409,
            LedgerError::AccountNotFound(_)
            | LedgerError::SourceAccountNotFound(_)
            | LedgerError::DestinationAccountNotFound(_)
            | LedgerError::TransactionNotFound(_) => 404,
            LedgerError::InsufficientBalance { .. } => 422,
            LedgerError::DeadlineExceeded => 503,
            LedgerError::Storage { .. } => 500,
        }
    }

    /// Message safe to surface to callers.
    ///
    /// Storage failures come back as an opaque "internal error"; everything
    /// else displays as-is.
    pub fn public_message(&self) -> String {
        match self {
            LedgerError::Storage { .. } => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}
