//! Services layer for account-service.
//!
//! Token issuance/validation and account storage.

mod database;
pub mod error;
mod jwt;
mod memory;
pub mod metrics;
mod store;

pub use database::PostgresAccountStore;
pub use error::ServiceError;
pub use jwt::{AccountClaims, JwtService, ACCESS_TOKEN_HEADER};
pub use memory::MemoryAccountStore;
pub use store::AccountStore;
