//! Access gate for per-account routes.
//!
//! A request to `/account/:id` passes only if its `x-jwt-token` verifies under
//! the service secret and asserts the identity number of the account stored
//! under `:id`. Every failure collapses into the same `403 access denied`; the
//! specific cause is only logged.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

use crate::models::Account;
use crate::services::metrics::record_access_decision;
use crate::services::{AccountStore, JwtService, ServiceError, ACCESS_TOKEN_HEADER};
use crate::AppState;

/// The only message a denied caller ever sees.
pub const ACCESS_DENIED: &str = "access denied";

/// Why the gate refused a request. Never shown to the client.
#[derive(Debug, Error)]
pub enum AccessDenied {
    #[error("missing access token")]
    MissingToken,

    #[error("invalid access token: {0}")]
    InvalidToken(#[source] ServiceError),

    #[error("access token expired")]
    TokenExpired,

    #[error("invalid account id {0:?}")]
    InvalidAccountId(String),

    #[error("account {0} not found")]
    AccountNotFound(i64),

    #[error("account lookup failed: {0}")]
    Storage(#[source] ServiceError),

    #[error("token asserts account number {claimed}, account holds {actual}")]
    NumberMismatch { claimed: i64, actual: i64 },
}

impl AccessDenied {
    /// Stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AccessDenied::MissingToken => "missing_token",
            AccessDenied::InvalidToken(_) => "invalid_token",
            AccessDenied::TokenExpired => "token_expired",
            AccessDenied::InvalidAccountId(_) => "invalid_account_id",
            AccessDenied::AccountNotFound(_) => "account_not_found",
            AccessDenied::Storage(_) => "storage_error",
            AccessDenied::NumberMismatch { .. } => "number_mismatch",
        }
    }
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        AppError::Forbidden(anyhow::anyhow!(ACCESS_DENIED)).into_response()
    }
}

/// Binds a bearer token to a stored account.
///
/// Stateless apart from the shared key material and store handle, so one
/// instance serves all requests concurrently.
#[derive(Clone)]
pub struct AccessGate {
    jwt: JwtService,
    store: Arc<dyn AccountStore>,
}

impl AccessGate {
    pub fn new(jwt: JwtService, store: Arc<dyn AccountStore>) -> Self {
        Self { jwt, store }
    }

    /// Single pass: token present → signature and expiry valid → id parses →
    /// account loads → identity numbers match. The first failing step decides.
    pub async fn authorize(
        &self,
        token: Option<&str>,
        account_id: Option<&str>,
    ) -> Result<Account, AccessDenied> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AccessDenied::MissingToken)?;

        let claims = self.jwt.validate_token(token).map_err(|e| match e {
            ServiceError::TokenExpired => AccessDenied::TokenExpired,
            other => AccessDenied::InvalidToken(other),
        })?;

        let raw_id = account_id.unwrap_or_default();
        let id: i64 = raw_id
            .parse()
            .map_err(|_| AccessDenied::InvalidAccountId(raw_id.to_string()))?;

        let account = self.store.get_account(id).await.map_err(|e| match e {
            ServiceError::AccountNotFound(id) => AccessDenied::AccountNotFound(id),
            other => AccessDenied::Storage(other),
        })?;

        if claims.account_number != account.number {
            return Err(AccessDenied::NumberMismatch {
                claimed: claims.account_number,
                actual: account.number,
            });
        }

        Ok(account)
    }
}

/// Middleware guarding `/account/:id`. Apply with `route_layer` so the path
/// parameter is available.
pub async fn account_auth_middleware(
    State(state): State<AppState>,
    account_id: Option<Path<String>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccessDenied> {
    let token = req
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let account_id = account_id.map(|Path(id)| id);

    match state
        .gate
        .authorize(token.as_deref(), account_id.as_deref())
        .await
    {
        Ok(account) => {
            record_access_decision("allowed");
            tracing::debug!(account_id = account.id, "Access granted");
            req.extensions_mut().insert(AuthorizedAccount(account));
            Ok(next.run(req).await)
        }
        Err(denied) => {
            record_access_decision(denied.reason());
            tracing::warn!(reason = denied.reason(), error = %denied, "Access denied");
            Err(denied)
        }
    }
}

/// The account the access gate authorized for this request.
#[derive(Debug, Clone)]
pub struct AuthorizedAccount(pub Account);

#[async_trait]
impl<S> FromRequestParts<S> for AuthorizedAccount
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthorizedAccount>()
            .cloned()
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Authorized account missing from request extensions"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::models::NewAccount;
    use crate::services::MemoryAccountStore;
    use secrecy::Secret;

    async fn gate_with_account(number: i64) -> (AccessGate, JwtService, Account) {
        let jwt = JwtService::new(&JwtConfig {
            secret: Secret::new("gate-secret".to_string()),
            token_ttl_minutes: 5,
            enforce_expiry: true,
        })
        .unwrap();
        let store = Arc::new(MemoryAccountStore::new());
        let account = store
            .create_account(&NewAccount::new("Ada", "Lovelace").with_number(number))
            .await
            .unwrap();
        (AccessGate::new(jwt.clone(), store), jwt, account)
    }

    #[tokio::test]
    async fn test_authorizes_matching_token() {
        let (gate, jwt, account) = gate_with_account(42).await;
        let token = jwt.issue_token(&account).unwrap();

        let authorized = gate
            .authorize(Some(&token), Some(&account.id.to_string()))
            .await
            .unwrap();

        assert_eq!(authorized, account);
    }

    #[tokio::test]
    async fn test_denies_each_failing_step_with_its_reason() {
        let (gate, jwt, account) = gate_with_account(42).await;
        let token = jwt.issue_token(&account).unwrap();
        let id = account.id.to_string();
        let other = NewAccount::new("Eve", "Mallory").with_number(99).into_account(account.id);
        let wrong_token = jwt.issue_token(&other).unwrap();

        let cases: Vec<(Option<&str>, Option<&str>, &str)> = vec![
            (None, Some(id.as_str()), "missing_token"),
            (Some("  "), Some(id.as_str()), "missing_token"),
            (Some("garbage"), Some(id.as_str()), "invalid_token"),
            (Some(token.as_str()), None, "invalid_account_id"),
            (Some(token.as_str()), Some("abc"), "invalid_account_id"),
            (Some(token.as_str()), Some("999"), "account_not_found"),
            (Some(wrong_token.as_str()), Some(id.as_str()), "number_mismatch"),
        ];

        for (token, account_id, reason) in cases {
            let denied = gate.authorize(token, account_id).await.unwrap_err();
            assert_eq!(denied.reason(), reason, "token={token:?} id={account_id:?}");
        }
    }

    #[tokio::test]
    async fn test_checks_token_before_account_id() {
        let (gate, _, _) = gate_with_account(42).await;

        let denied = gate.authorize(None, Some("abc")).await.unwrap_err();
        assert!(matches!(denied, AccessDenied::MissingToken));
    }

    #[tokio::test]
    async fn test_every_denial_renders_the_same_response() {
        let denials = [
            AccessDenied::MissingToken,
            AccessDenied::TokenExpired,
            AccessDenied::InvalidAccountId("abc".to_string()),
            AccessDenied::AccountNotFound(3),
            AccessDenied::NumberMismatch { claimed: 1, actual: 2 },
        ];

        for denied in denials {
            let response = denied.into_response();
            assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(&body[..], br#"{"error":"access denied"}"#);
        }
    }
}
