//! Audit trail handlers

use std::sync::Arc;

use axum::extract::{Path, State};

use super::super::state::AppState;
use super::super::types::{ApiResult, ok};
use crate::error::LedgerError;
use crate::models::{AuditLog, EntityType};

/// List audit entries for one entity, newest first
///
/// GET /api/v1/audit/{entity_type}/{entity_id}
#[utoipa::path(
    get,
    path = "/api/v1/audit/{entity_type}/{entity_id}",
    params(
        ("entity_type" = String, Path, description = "ACCOUNT or TRANSACTION"),
        ("entity_id" = String, Path, description = "Entity id")
    ),
    responses(
        (status = 200, description = "Audit trail for the entity", body = [AuditLog], content_type = "application/json"),
        (status = 400, description = "Unknown entity type")
    ),
    tag = "Audit"
)]
pub async fn list_entity_audit(
    State(state): State<Arc<AppState>>,
    Path((entity_type, entity_id)): Path<(String, String)>,
) -> ApiResult<Vec<AuditLog>> {
    let entity_type = EntityType::try_from(entity_type.to_uppercase()).map_err(|_| {
        LedgerError::Validation {
            field: "entity_type",
            reason: "must be ACCOUNT or TRANSACTION",
        }
    })?;

    let logs = state
        .accounts
        .list_audit_trail(entity_type, &entity_id)
        .await?;
    ok(logs)
}
