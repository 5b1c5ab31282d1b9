use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

/// Where accounts are kept.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    /// Process-local map; for tests and local runs only.
    Memory,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret. Must be non-empty.
    pub secret: Secret<String>,
    pub token_ttl_minutes: i64,
    pub enforce_expiry: bool,
}

impl AccountConfig {
    /// Load configuration from the environment (and `.env`), failing fast on
    /// anything the service cannot run safely without.
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = parse_value("ENVIRONMENT", &env_str)?;

        let is_prod = environment == Environment::Prod;

        let storage = match get_env("STORAGE_BACKEND", Some("postgres"), is_prod)?
            .to_lowercase()
            .as_str()
        {
            "postgres" => StorageConfig::Postgres(DatabaseConfig {
                url: Secret::new(get_env("DATABASE_URL", None, is_prod)?),
                max_connections: get_parsed("DATABASE_MAX_CONNECTIONS", Some("10"), is_prod)?,
                min_connections: get_parsed("DATABASE_MIN_CONNECTIONS", Some("1"), is_prod)?,
            }),
            "memory" => StorageConfig::Memory,
            other => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Invalid STORAGE_BACKEND: {}",
                    other
                )));
            }
        };

        let config = AccountConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("account-service"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            storage,
            jwt: JwtConfig {
                secret: Secret::new(get_env("JWT_SECRET", None, is_prod)?),
                token_ttl_minutes: get_parsed("JWT_TOKEN_TTL_MINUTES", Some("60"), is_prod)?,
                enforce_expiry: get_parsed("JWT_ENFORCE_EXPIRY", Some("true"), is_prod)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.common.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "APP__PORT must be greater than 0"
            )));
        }

        if self.jwt.secret.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_SECRET must not be empty"
            )));
        }

        if self.jwt.token_ttl_minutes <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_TOKEN_TTL_MINUTES must be positive"
            )));
        }

        if let StorageConfig::Postgres(db) = &self.storage {
            if db.min_connections > db.max_connections {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "DATABASE_MIN_CONNECTIONS exceeds DATABASE_MAX_CONNECTIONS"
                )));
            }
        }

        if self.environment == Environment::Prod {
            if matches!(self.storage, StorageConfig::Memory) {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "STORAGE_BACKEND=memory is not allowed in production"
                )));
            }
        }

        Ok(())
    }

    /// Settings that are valid but unsafe. Reported once tracing is up.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if self.environment == Environment::Prod && !self.jwt.enforce_expiry {
            warnings.push("JWT expiry enforcement is disabled in production");
        }

        warnings
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

fn get_parsed<T>(key: &str, default: Option<&str>, is_prod: bool) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = get_env(key, default, is_prod)?;
    parse_value(key, &raw)
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| AppError::ConfigError(anyhow::anyhow!("Invalid {}: {}", key, e)))
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}
