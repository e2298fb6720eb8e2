//! Account handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::state::AppState;
use super::super::types::{
    AccountResponse, ApiResult, CreateAccountRequest, created, ok,
};
use crate::models::Transaction;

/// Create a new account
///
/// POST /api/v1/accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse, content_type = "application/json"),
        (status = 400, description = "Invalid id or negative initial balance"),
        (status = 409, description = "Account id already taken")
    ),
    tag = "Accounts"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<AccountResponse> {
    let account = state
        .accounts
        .create_account(&req.id, req.initial_balance)
        .await?;
    created(account.into())
}

/// Get an account by id
///
/// GET /api/v1/accounts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account details", body = AccountResponse, content_type = "application/json"),
        (status = 404, description = "Account not found")
    ),
    tag = "Accounts"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<AccountResponse> {
    let account = state.accounts.get_account(&id).await?;
    ok(account.into())
}

/// List transfers touching an account, newest first
///
/// GET /api/v1/accounts/{id}/transactions
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/transactions",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Transactions for the account", body = [Transaction], content_type = "application/json"),
        (status = 404, description = "Account not found")
    ),
    tag = "Accounts"
)]
pub async fn list_account_transactions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Transaction>> {
    let transactions = state.accounts.list_transactions(&id).await?;
    ok(transactions)
}
