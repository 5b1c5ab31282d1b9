//! Request and response bodies.

use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

/// JSON body extractor whose rejections are reported as `400 Bad Request`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
    pub first_name: String,
    #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
    pub last_name: String,
}

/// Accepted and echoed; credentials are not verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}

/// Accepted and echoed; no money moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub to_account: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub deleted: i64,
}
