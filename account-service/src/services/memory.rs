use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::models::{Account, NewAccount};
use crate::services::{AccountStore, ServiceError};

/// In-process account store for tests and `STORAGE_BACKEND=memory` runs.
pub struct MemoryAccountStore {
    state: Mutex<MemoryState>,
}

struct MemoryState {
    next_id: i64,
    accounts: BTreeMap<i64, Account>,
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: 1,
                accounts: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, ServiceError> {
        self.state
            .lock()
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Account store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create_account(&self, input: &NewAccount) -> Result<Account, ServiceError> {
        let mut state = self.lock()?;
        let id = state.next_id;
        state.next_id += 1;

        let account = input.clone().into_account(id);
        state.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, ServiceError> {
        self.lock()?
            .accounts
            .get(&id)
            .cloned()
            .ok_or(ServiceError::AccountNotFound(id))
    }

    async fn delete_account(&self, id: i64) -> Result<(), ServiceError> {
        self.lock()?
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(ServiceError::AccountNotFound(id))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(self.lock()?.accounts.values().cloned().collect())
    }

    async fn health_check(&self) -> Result<(), ServiceError> {
        self.lock().map(|_| ())
    }
}
