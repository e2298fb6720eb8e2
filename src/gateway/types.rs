//! API response types and error codes
//!
//! - `ApiResponse<T>`: unified response wrapper
//! - `ApiError`: axum-facing wrapper around [`LedgerError`]
//! - `error_codes`: stable numeric code constants

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::LedgerError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Stable numeric API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const VALIDATION_ERROR: i32 = 1001;
    pub const INVALID_AMOUNT: i32 = 1002;
    pub const SAME_ACCOUNT: i32 = 1003;
    pub const INSUFFICIENT_BALANCE: i32 = 1004;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4041;
    pub const SOURCE_ACCOUNT_NOT_FOUND: i32 = 4042;
    pub const DESTINATION_ACCOUNT_NOT_FOUND: i32 = 4043;
    pub const TRANSACTION_NOT_FOUND: i32 = 4044;
    pub const ALREADY_EXISTS: i32 = 4091;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const DEADLINE_EXCEEDED: i32 = 5031;
}

fn numeric_code(err: &LedgerError) -> i32 {
    match err {
        LedgerError::Validation { .. } => error_codes::VALIDATION_ERROR,
        LedgerError::InvalidAmount => error_codes::INVALID_AMOUNT,
        LedgerError::SameAccount => error_codes::SAME_ACCOUNT,
        LedgerError::InsufficientBalance { .. } => error_codes::INSUFFICIENT_BALANCE,
        LedgerError::AccountNotFound(_) => error_codes::ACCOUNT_NOT_FOUND,
        LedgerError::SourceAccountNotFound(_) => error_codes::SOURCE_ACCOUNT_NOT_FOUND,
        LedgerError::DestinationAccountNotFound(_) => {
            error_codes::DESTINATION_ACCOUNT_NOT_FOUND
        }
        LedgerError::TransactionNotFound(_) => error_codes::TRANSACTION_NOT_FOUND,
        LedgerError::AlreadyExists(_) => error_codes::ALREADY_EXISTS,
        LedgerError::DeadlineExceeded => error_codes::DEADLINE_EXCEEDED,
        LedgerError::Storage { .. } => error_codes::INTERNAL_ERROR,
    }
}

// ============================================================================
// ApiError: LedgerError at the HTTP boundary
// ============================================================================

/// Wrapper translating [`LedgerError`] into an HTTP response.
///
/// Storage failures are logged here with their full cause and surface as an
/// opaque internal error.
#[derive(Debug)]
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if let LedgerError::Storage { operation, source } = &err {
            tracing::error!(
                operation = %operation,
                error = %source,
                "storage failure while handling request"
            );
        }

        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ApiResponse::<()>::error(numeric_code(&err), err.public_message());
        (status, Json(body)).into_response()
    }
}

/// Handler result type: unified envelope or mapped domain error
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 OK success response
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 201 Created success response
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

/// Account creation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    #[schema(example = "acc001")]
    pub id: String,
    /// Opening balance; decimal string to keep precision
    #[schema(value_type = String, example = "1000.00")]
    pub initial_balance: Decimal,
}

/// Account response data
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    #[schema(example = "acc001")]
    pub id: String,
    #[schema(value_type = String, example = "750.00")]
    pub balance: Decimal,
}

impl From<crate::models::Account> for AccountResponse {
    fn from(a: crate::models::Account) -> Self {
        Self {
            id: a.id,
            balance: a.balance,
        }
    }
}

/// Transfer creation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    #[schema(example = "acc001")]
    pub source_account_id: String,
    #[schema(example = "acc002")]
    pub destination_account_id: String,
    /// Decimal string to keep precision
    #[schema(value_type = String, example = "250.00")]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(42u32);
        assert_eq!(resp.code, 0);
        assert_eq!(resp.msg, "ok");
        assert_eq!(resp.data, Some(42));
    }

    #[test]
    fn test_error_envelope_has_no_data() {
        let resp = ApiResponse::<()>::error(error_codes::SAME_ACCOUNT, "same account");
        assert_eq!(resp.code, error_codes::SAME_ACCOUNT);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_numeric_codes_follow_http_classes() {
        assert_eq!(
            numeric_code(&LedgerError::SameAccount),
            error_codes::SAME_ACCOUNT
        );
        assert_eq!(
            numeric_code(&LedgerError::AlreadyExists("x".into())),
            error_codes::ALREADY_EXISTS
        );
        assert_eq!(
            numeric_code(&LedgerError::DeadlineExceeded),
            error_codes::DEADLINE_EXCEEDED
        );
    }

    #[test]
    fn test_amounts_parse_from_decimal_strings() {
        let req: CreateTransactionRequest = serde_json::from_str(
            r#"{"source_account_id":"acc001","destination_account_id":"acc002","amount":"250.00"}"#,
        )
        .unwrap();
        assert_eq!(req.amount, Decimal::new(25000, 2));
    }
}
