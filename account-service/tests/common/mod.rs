//! Shared helpers for account-service integration tests.
//!
//! Routers are built over the in-memory store and driven with `oneshot`, so
//! these tests need no database.

#![allow(dead_code)]

use account_service::{
    build_router,
    config::{AccountConfig, Environment, JwtConfig, StorageConfig},
    models::{Account, NewAccount},
    services::{AccountStore, JwtService, MemoryAccountStore, ServiceError, ACCESS_TOKEN_HEADER},
    AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use secrecy::Secret;
use service_core::config::Config;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-jwt-secret";

pub fn test_config() -> AccountConfig {
    AccountConfig {
        common: Config::default(),
        environment: Environment::Dev,
        service_name: "account-service-test".to_string(),
        service_version: "0.0.0-test".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        storage: StorageConfig::Memory,
        jwt: JwtConfig {
            secret: Secret::new(TEST_SECRET.to_string()),
            token_ttl_minutes: 60,
            enforce_expiry: true,
        },
    }
}

pub fn test_jwt() -> JwtService {
    JwtService::new(&test_config().jwt).expect("Failed to create JWT service")
}

/// Router and the store behind it, so tests can seed accounts directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn AccountStore>,
    pub jwt: JwtService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryAccountStore::new()))
    }

    pub fn with_store(store: Arc<dyn AccountStore>) -> Self {
        let jwt = test_jwt();
        let state = AppState::new(test_config(), jwt.clone(), store.clone());
        Self {
            router: build_router(state),
            store,
            jwt,
        }
    }

    /// Insert an account holding the given identity number.
    pub async fn seed_account(&self, number: i64) -> Account {
        self.store
            .create_account(&NewAccount::new("Ada", "Lovelace").with_number(number))
            .await
            .expect("Failed to seed account")
    }

    pub fn token_for(&self, account: &Account) -> String {
        self.jwt.issue_token(account).expect("Failed to issue token")
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(ACCESS_TOKEN_HEADER, token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}

/// Assert the uniform gate refusal.
pub async fn assert_access_denied(response: Response) {
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_bytes(response).await, br#"{"error":"access denied"}"#.to_vec());
}

/// Store whose every call fails, as an unreachable database would.
pub struct FailingStore;

fn unavailable() -> ServiceError {
    ServiceError::Internal(anyhow::anyhow!("storage unavailable"))
}

#[async_trait]
impl AccountStore for FailingStore {
    async fn create_account(&self, _input: &NewAccount) -> Result<Account, ServiceError> {
        Err(unavailable())
    }

    async fn get_account(&self, _id: i64) -> Result<Account, ServiceError> {
        Err(unavailable())
    }

    async fn delete_account(&self, _id: i64) -> Result<(), ServiceError> {
        Err(unavailable())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), ServiceError> {
        Err(unavailable())
    }
}

/// Store whose rows vanish between the gate's lookup and the delete, as when
/// two deletes race.
pub struct VanishingStore {
    inner: MemoryAccountStore,
}

impl VanishingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryAccountStore::new(),
        }
    }
}

#[async_trait]
impl AccountStore for VanishingStore {
    async fn create_account(&self, input: &NewAccount) -> Result<Account, ServiceError> {
        self.inner.create_account(input).await
    }

    async fn get_account(&self, id: i64) -> Result<Account, ServiceError> {
        self.inner.get_account(id).await
    }

    async fn delete_account(&self, id: i64) -> Result<(), ServiceError> {
        Err(ServiceError::AccountNotFound(id))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        self.inner.list_accounts().await
    }

    async fn health_check(&self) -> Result<(), ServiceError> {
        self.inner.health_check().await
    }
}
