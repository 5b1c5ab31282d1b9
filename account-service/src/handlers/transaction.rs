use axum::Json;

use crate::dtos::{JsonBody, TransactionRequest};

/// `POST /transaction`: decodes and echoes the transfer request.
pub async fn create_transaction(
    JsonBody(req): JsonBody<TransactionRequest>,
) -> Json<TransactionRequest> {
    tracing::debug!(
        to_account = req.to_account,
        amount = req.amount,
        "Transaction request received"
    );
    Json(req)
}
