use async_trait::async_trait;

use crate::models::{Account, NewAccount};
use crate::services::ServiceError;

/// Durable account storage consumed by the handlers and the access gate.
///
/// Each call is independent; a read reflects the last completed write.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert an account, returning it with its storage-assigned id.
    async fn create_account(&self, input: &NewAccount) -> Result<Account, ServiceError>;

    /// Fails with `ServiceError::AccountNotFound` when no row has this id.
    async fn get_account(&self, id: i64) -> Result<Account, ServiceError>;

    /// Fails with `ServiceError::AccountNotFound` when no row has this id.
    async fn delete_account(&self, id: i64) -> Result<(), ServiceError>;

    /// All accounts ordered by id.
    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError>;

    async fn health_check(&self) -> Result<(), ServiceError>;
}
