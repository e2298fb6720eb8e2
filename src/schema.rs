//! Postgres schema bootstrap for the ledger store
//!
//! Idempotent DDL executed at startup. Balance non-negativity, positive
//! amounts, and source != destination are enforced at the database level as
//! the last line of defense behind the engine's own checks.

use anyhow::Result;
use sqlx::PgPool;

const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id          TEXT PRIMARY KEY,
    balance     NUMERIC(20, 8) NOT NULL CHECK (balance >= 0),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_TRANSACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id                      UUID PRIMARY KEY,
    source_account_id       TEXT NOT NULL REFERENCES accounts(id),
    destination_account_id  TEXT NOT NULL REFERENCES accounts(id),
    amount                  NUMERIC(20, 8) NOT NULL CHECK (amount > 0),
    created_at              TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    CHECK (source_account_id <> destination_account_id)
)
"#;

const CREATE_TRANSACTIONS_ACCOUNT_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_transactions_source
    ON transactions (source_account_id, created_at DESC)
"#;

const CREATE_TRANSACTIONS_DESTINATION_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_transactions_destination
    ON transactions (destination_account_id, created_at DESC)
"#;

const CREATE_AUDIT_LOGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS audit_logs (
    id          BIGSERIAL PRIMARY KEY,
    entity_type TEXT NOT NULL,
    entity_id   TEXT NOT NULL,
    action      TEXT NOT NULL,
    old_value   JSONB,
    new_value   JSONB NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_AUDIT_LOGS_ENTITY_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_audit_logs_entity
    ON audit_logs (entity_type, entity_id, created_at DESC)
"#;

/// Initialize the ledger schema
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Initializing ledger schema...");

    sqlx::query(CREATE_ACCOUNTS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create accounts table: {}", e))?;

    sqlx::query(CREATE_TRANSACTIONS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create transactions table: {}", e))?;

    sqlx::query(CREATE_TRANSACTIONS_ACCOUNT_INDEX)
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create transactions source index: {}", e))?;

    sqlx::query(CREATE_TRANSACTIONS_DESTINATION_INDEX)
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create transactions destination index: {}", e))?;

    sqlx::query(CREATE_AUDIT_LOGS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create audit_logs table: {}", e))?;

    sqlx::query(CREATE_AUDIT_LOGS_ENTITY_INDEX)
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create audit_logs entity index: {}", e))?;

    tracing::info!("Ledger schema initialized successfully");
    Ok(())
}
