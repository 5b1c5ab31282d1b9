//! Domain models for account-service.

mod account;

pub use account::{Account, NewAccount, ACCOUNT_NUMBER_RANGE};
