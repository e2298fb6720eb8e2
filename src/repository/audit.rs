//! Postgres audit repository (append-only event trail)

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::AuditStore;
use crate::error::LedgerError;
use crate::models::{AuditLog, EntityType, NewAuditEntry};

const INSERT_AUDIT_LOG: &str = r#"
INSERT INTO audit_logs (entity_type, entity_id, action, old_value, new_value)
VALUES ($1, $2, $3, $4, $5)
RETURNING id, entity_type, entity_id, action, old_value, new_value, created_at
"#;

pub struct PgAuditRepository;

#[async_trait]
impl AuditStore for PgAuditRepository {
    async fn record(
        &self,
        conn: &mut PgConnection,
        entry: NewAuditEntry,
    ) -> Result<AuditLog, LedgerError> {
        sqlx::query_as::<_, AuditLog>(INSERT_AUDIT_LOG)
            .bind(entry.entity_type.as_str())
            .bind(entry.entity_id)
            .bind(entry.action.as_str())
            .bind(entry.old_value)
            .bind(entry.new_value)
            .fetch_one(conn)
            .await
            .map_err(LedgerError::storage("create audit log"))
    }

    async fn record_detached(
        &self,
        pool: &PgPool,
        entry: NewAuditEntry,
    ) -> Result<AuditLog, LedgerError> {
        sqlx::query_as::<_, AuditLog>(INSERT_AUDIT_LOG)
            .bind(entry.entity_type.as_str())
            .bind(entry.entity_id)
            .bind(entry.action.as_str())
            .bind(entry.old_value)
            .bind(entry.new_value)
            .fetch_one(pool)
            .await
            .map_err(LedgerError::storage("create audit log"))
    }

    async fn list_by_entity(
        &self,
        pool: &PgPool,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Vec<AuditLog>, LedgerError> {
        sqlx::query_as::<_, AuditLog>(
            r#"SELECT id, entity_type, entity_id, action, old_value, new_value, created_at
               FROM audit_logs
               WHERE entity_type = $1 AND entity_id = $2
               ORDER BY created_at DESC, id DESC"#,
        )
        .bind(entity_type.as_str())
        .bind(entity_id)
        .fetch_all(pool)
        .await
        .map_err(LedgerError::storage("list audit logs by entity"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountBalanceSnapshot, AuditAction};
    use crate::repository::testutil::{test_pool, unique_id};
    use rust_decimal::Decimal;

    fn entry_for(entity_id: &str, action: AuditAction) -> NewAuditEntry {
        NewAuditEntry {
            entity_type: EntityType::Account,
            entity_id: entity_id.to_string(),
            action,
            old_value: None,
            new_value: AccountBalanceSnapshot::new(entity_id, Decimal::new(100, 0)),
        }
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL running
    async fn test_record_detached_and_list() {
        let pool = test_pool().await;
        let repo = PgAuditRepository;

        let entity_id = unique_id("acc");
        let log = repo
            .record_detached(&pool, entry_for(&entity_id, AuditAction::Create))
            .await
            .expect("Should insert audit log");

        assert!(log.id > 0);
        assert_eq!(log.entity_type, EntityType::Account);
        assert_eq!(log.action, AuditAction::Create);
        assert!(log.old_value.is_none());
        assert_eq!(log.new_value["id"], entity_id.as_str());

        let listed = repo
            .list_by_entity(&pool, EntityType::Account, &entity_id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, log.id);
    }

    #[tokio::test]
    #[ignore]
    async fn test_record_in_unit_of_work_rolls_back_with_it() {
        let pool = test_pool().await;
        let repo = PgAuditRepository;

        let entity_id = unique_id("acc");
        {
            let mut tx = pool.begin().await.unwrap();
            repo.record(&mut tx, entry_for(&entity_id, AuditAction::Debit))
                .await
                .unwrap();
            tx.rollback().await.unwrap();
        }

        let listed = repo
            .list_by_entity(&pool, EntityType::Account, &entity_id)
            .await
            .unwrap();
        assert!(listed.is_empty(), "Rolled back entry must not persist");
    }

    #[tokio::test]
    #[ignore]
    async fn test_list_newest_first() {
        let pool = test_pool().await;
        let repo = PgAuditRepository;

        let entity_id = unique_id("acc");
        for action in [AuditAction::Create, AuditAction::Debit, AuditAction::Credit] {
            repo.record_detached(&pool, entry_for(&entity_id, action))
                .await
                .unwrap();
        }

        let listed = repo
            .list_by_entity(&pool, EntityType::Account, &entity_id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].action, AuditAction::Credit);
        assert_eq!(listed[2].action, AuditAction::Create);
    }
}
