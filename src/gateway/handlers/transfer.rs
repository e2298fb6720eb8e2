//! Transfer handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::state::AppState;
use super::super::types::{ApiResult, CreateTransactionRequest, created, ok};
use crate::models::Transaction;

/// Execute an atomic transfer between two accounts
///
/// POST /api/v1/transactions
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transfer committed", body = Transaction, content_type = "application/json"),
        (status = 400, description = "Validation, same account, or invalid amount"),
        (status = 404, description = "Source or destination account not found"),
        (status = 422, description = "Insufficient balance"),
        (status = 503, description = "Transfer deadline exceeded")
    ),
    tag = "Transfers"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTransactionRequest>,
) -> ApiResult<Transaction> {
    let transaction = state
        .transfers
        .transfer(
            &req.source_account_id,
            &req.destination_account_id,
            req.amount,
        )
        .await?;
    created(transaction)
}

/// Get a committed transfer by id
///
/// GET /api/v1/transactions/{id}
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction details", body = Transaction, content_type = "application/json"),
        (status = 404, description = "Transaction not found")
    ),
    tag = "Transfers"
)]
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Transaction> {
    let transaction = state.accounts.get_transaction(&id).await?;
    ok(transaction)
}
