//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/swagger-ui`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{AccountResponse, CreateAccountRequest, CreateTransactionRequest};
use crate::models::{AuditLog, Transaction};

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ledgerd Internal Transfer API",
        version = "1.0.0",
        description = "Named accounts with non-negative balances, atomic pairwise transfers, and an append-only audit trail.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::account::create_account,
        crate::gateway::handlers::account::get_account,
        crate::gateway::handlers::account::list_account_transactions,
        crate::gateway::handlers::transfer::create_transfer,
        crate::gateway::handlers::transfer::get_transaction,
        crate::gateway::handlers::audit::list_entity_audit,
        crate::gateway::handlers::health::health_check,
    ),
    components(schemas(
        CreateAccountRequest,
        AccountResponse,
        CreateTransactionRequest,
        Transaction,
        AuditLog,
        HealthResponse,
    )),
    tags(
        (name = "Accounts", description = "Account creation and lookup"),
        (name = "Transfers", description = "Atomic pairwise transfers"),
        (name = "Audit", description = "Append-only audit trail"),
        (name = "System", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("OpenAPI doc should serialize");
        assert!(json.contains("/api/v1/transactions"));
        assert!(json.contains("/api/v1/accounts/{id}"));
        assert!(json.contains("/api/v1/health"));
    }
}
