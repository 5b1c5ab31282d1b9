//! PostgreSQL account store.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

use crate::config::DatabaseConfig;
use crate::models::{Account, NewAccount};
use crate::services::metrics::record_db_query;
use crate::services::{AccountStore, ServiceError};

const ACCOUNT_COLUMNS: &str = "id, first_name, last_name, number, balance, created_at";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    /// Create a new database connection pool.
    #[instrument(skip(config), fields(service = "account-service"))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, ServiceError> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(config.url.expose_secret())
            .await?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), ServiceError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    #[instrument(skip(self, input), fields(number = input.number))]
    async fn create_account(&self, input: &NewAccount) -> Result<Account, ServiceError> {
        let started = Instant::now();

        // TODO: enforce unique account numbers (unique index on `number` plus redraw on conflict)
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (first_name, last_name, number, balance, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.number)
        .bind(input.balance)
        .bind(input.created_at)
        .fetch_one(&self.pool)
        .await?;

        record_db_query("create_account", started);
        info!(account_id = account.id, "Account inserted");

        Ok(account)
    }

    #[instrument(skip(self))]
    async fn get_account(&self, id: i64) -> Result<Account, ServiceError> {
        let started = Instant::now();

        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record_db_query("get_account", started);

        account.ok_or(ServiceError::AccountNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, id: i64) -> Result<(), ServiceError> {
        let started = Instant::now();

        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        record_db_query("delete_account", started);

        if result.rows_affected() == 0 {
            return Err(ServiceError::AccountNotFound(id));
        }

        info!(account_id = id, "Account deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        let started = Instant::now();

        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        record_db_query("list_accounts", started);

        Ok(accounts)
    }

    /// Check database health.
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), ServiceError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
