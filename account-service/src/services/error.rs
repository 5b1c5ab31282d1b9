use service_core::error::AppError;
use thiserror::Error;

use crate::middleware::ACCESS_DENIED;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to sign access token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid access token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("Access token expired")]
    TokenExpired,

    #[error("Account {0} not found")]
    AccountNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Configuration(e) => AppError::ConfigError(anyhow::anyhow!(e)),
            ServiceError::Signing(e) => {
                AppError::InternalError(anyhow::anyhow!("Failed to issue access token: {}", e))
            }
            ServiceError::InvalidToken(_) | ServiceError::TokenExpired => {
                AppError::Forbidden(anyhow::anyhow!(ACCESS_DENIED))
            }
            ServiceError::AccountNotFound(id) => {
                AppError::NotFound(anyhow::anyhow!("Account {} not found", id))
            }
            ServiceError::Database(e) => AppError::DatabaseError(anyhow::Error::new(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}
