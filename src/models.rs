//! Domain models: accounts, transfer transactions, audit entries
//!
//! Rows map 1:1 onto the Postgres schema (see [`crate::schema`]). Monetary
//! values are `rust_decimal::Decimal` end to end; amounts serialize as JSON
//! strings to keep precision across the boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A named account holding a non-negative balance.
///
/// Created once, never deleted. The balance is mutated only at creation and
/// by the transfer engine while holding the row's exclusive lock.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A committed transfer between two distinct accounts. Immutable.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    pub source_account_id: String,
    pub destination_account_id: String,
    #[schema(value_type = String, example = "250.00")]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input for the transaction repository; `id` is generated when absent.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub id: Option<Uuid>,
    pub source_account_id: String,
    pub destination_account_id: String,
    pub amount: Decimal,
}

// ============================================================================
// Audit trail
// ============================================================================

/// Kind of entity an audit entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Account,
    Transaction,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Account => "ACCOUNT",
            EntityType::Transaction => "TRANSACTION",
        }
    }
}

impl TryFrom<String> for EntityType {
    type Error = String;

    fn try_from(v: String) -> Result<Self, Self::Error> {
        match v.as_str() {
            "ACCOUNT" => Ok(EntityType::Account),
            "TRANSACTION" => Ok(EntityType::Transaction),
            other => Err(format!("unknown entity type: {}", other)),
        }
    }
}

/// State-changing action recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Debit,
    Credit,
    Transfer,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Debit => "DEBIT",
            AuditAction::Credit => "CREDIT",
            AuditAction::Transfer => "TRANSFER",
        }
    }
}

impl TryFrom<String> for AuditAction {
    type Error = String;

    fn try_from(v: String) -> Result<Self, Self::Error> {
        match v.as_str() {
            "CREATE" => Ok(AuditAction::Create),
            "DEBIT" => Ok(AuditAction::Debit),
            "CREDIT" => Ok(AuditAction::Credit),
            "TRANSFER" => Ok(AuditAction::Transfer),
            other => Err(format!("unknown audit action: {}", other)),
        }
    }
}

/// Append-only audit entry. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub id: i64,
    #[sqlx(try_from = "String")]
    pub entity_type: EntityType,
    pub entity_id: String,
    #[sqlx(try_from = "String")]
    pub action: AuditAction,
    #[schema(value_type = Option<Object>)]
    pub old_value: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub new_value: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Input for the audit repository
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub entity_type: EntityType,
    pub entity_id: String,
    pub action: AuditAction,
    pub old_value: Option<serde_json::Value>,
    pub new_value: serde_json::Value,
}

/// Point-in-time balance snapshot stored in audit entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceSnapshot {
    pub id: String,
    pub balance: Decimal,
}

impl AccountBalanceSnapshot {
    pub fn new(id: &str, balance: Decimal) -> serde_json::Value {
        serde_json::json!(Self {
            id: id.to_string(),
            balance,
        })
    }
}

/// Snapshot of a committed transfer stored in its TRANSFER audit entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSnapshot {
    pub id: Uuid,
    pub source_account_id: String,
    pub destination_account_id: String,
    pub amount: Decimal,
}

impl From<&Transaction> for TransactionSnapshot {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            source_account_id: t.source_account_id.clone(),
            destination_account_id: t.destination_account_id.clone(),
            amount: t.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_round_trip() {
        assert_eq!(EntityType::Account.as_str(), "ACCOUNT");
        assert_eq!(
            EntityType::try_from("TRANSACTION".to_string()),
            Ok(EntityType::Transaction)
        );
        assert!(EntityType::try_from("account".to_string()).is_err());
    }

    #[test]
    fn test_audit_action_round_trip() {
        for action in [
            AuditAction::Create,
            AuditAction::Debit,
            AuditAction::Credit,
            AuditAction::Transfer,
        ] {
            assert_eq!(
                AuditAction::try_from(action.as_str().to_string()),
                Ok(action)
            );
        }
    }

    #[test]
    fn test_balance_snapshot_shape() {
        let snap = AccountBalanceSnapshot::new("acc001", Decimal::new(75000, 2));
        assert_eq!(snap["id"], "acc001");
        assert_eq!(snap["balance"], "750.00");
    }
}
