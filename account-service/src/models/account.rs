//! Account model.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account numbers are drawn uniformly from `0..ACCOUNT_NUMBER_RANGE`.
pub const ACCOUNT_NUMBER_RANGE: i64 = 1_000_000;

/// Ledger account.
///
/// `number` is the identity asserted by access tokens; `id` is only the
/// storage key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    /// A zero-balance account with a freshly drawn account number.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            number: rand::thread_rng().gen_range(0..ACCOUNT_NUMBER_RANGE),
            balance: 0,
            created_at: Utc::now(),
        }
    }

    /// Override the drawn account number.
    pub fn with_number(mut self, number: i64) -> Self {
        self.number = number;
        self
    }

    /// Materialize the stored row once storage has assigned an id.
    pub fn into_account(self, id: i64) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            number: self.number,
            balance: self.balance,
            created_at: self.created_at,
        }
    }
}
