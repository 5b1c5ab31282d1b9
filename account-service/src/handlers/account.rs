use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

use crate::{
    dtos::{CreateAccountRequest, DeleteAccountResponse, JsonBody},
    middleware::AuthorizedAccount,
    models::{Account, NewAccount},
    services::{metrics, ACCESS_TOKEN_HEADER},
    AppState,
};

/// `GET /account`
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = state.store.list_accounts().await?;
    Ok(Json(accounts))
}

/// `POST /account`: store the account and hand back its access token in the
/// `x-jwt-token` response header.
pub async fn create_account(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let account = state
        .store
        .create_account(&NewAccount::new(req.first_name, req.last_name))
        .await?;
    metrics::record_account_created();

    let token = state.jwt.issue_token(&account).map_err(|e| {
        tracing::error!(account_id = account.id, error = %e, "Failed to issue access token");
        e
    })?;
    metrics::record_token_issued();

    tracing::info!(account_id = account.id, "Account created");

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCESS_TOKEN_HEADER,
        HeaderValue::from_str(&token).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Access token is not a valid header: {}", e))
        })?,
    );

    Ok((headers, Json(account)))
}

/// `GET /account/:id`: the gate already loaded the account.
pub async fn get_account(AuthorizedAccount(account): AuthorizedAccount) -> Json<Account> {
    Json(account)
}

/// `DELETE /account/:id`
pub async fn delete_account(
    State(state): State<AppState>,
    AuthorizedAccount(account): AuthorizedAccount,
) -> Result<Json<DeleteAccountResponse>, AppError> {
    state.store.delete_account(account.id).await?;

    tracing::info!(account_id = account.id, "Account deleted");

    Ok(Json(DeleteAccountResponse {
        deleted: account.id,
    }))
}
