use axum::Json;

use crate::dtos::{JsonBody, LoginRequest};

/// `POST /login`: decodes and echoes the request. Credentials are not checked
/// and no token is issued here.
pub async fn login(JsonBody(req): JsonBody<LoginRequest>) -> Json<LoginRequest> {
    tracing::debug!(number = req.number, "Login request received");
    Json(req)
}
