pub mod account_auth;

pub use account_auth::{
    account_auth_middleware, AccessDenied, AccessGate, AuthorizedAccount, ACCESS_DENIED,
};
