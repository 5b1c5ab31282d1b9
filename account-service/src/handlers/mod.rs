//! HTTP handlers for account-service.

pub mod account;
pub mod health;
pub mod login;
pub mod transaction;

pub use account::*;
pub use health::*;
pub use login::*;
pub use transaction::*;

use axum::http::Method;
use service_core::error::AppError;

/// Fallback for routes hit with a method they do not serve.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::BadRequest(anyhow::anyhow!("method is not allowed {}", method))
}
