//! Application startup and lifecycle management.

use service_core::error::AppError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

use crate::config::{AccountConfig, StorageConfig};
use crate::services::{AccountStore, JwtService, MemoryAccountStore, PostgresAccountStore};
use crate::{build_router, AppState};

/// Application container for managing server lifecycle.
pub struct Application {
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Connects storage, runs migrations, derives signing keys and binds the
    /// listener. Any failure here aborts startup.
    pub async fn build(config: AccountConfig) -> Result<Self, AppError> {
        let store: Arc<dyn AccountStore> = match &config.storage {
            StorageConfig::Postgres(db_config) => {
                let store = PostgresAccountStore::connect(db_config).await.map_err(|e| {
                    tracing::error!("Failed to connect to PostgreSQL: {}", e);
                    AppError::from(e)
                })?;
                store.run_migrations().await?;
                Arc::new(store)
            }
            StorageConfig::Memory => {
                tracing::warn!("Using in-memory account storage - data is lost on restart");
                Arc::new(MemoryAccountStore::new())
            }
        };

        let jwt = JwtService::new(&config.jwt)?;

        let state = AppState::new(config.clone(), jwt, store);

        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Account service listening");

        Ok(Self {
            listener,
            state,
        })
    }

    /// Serve until SIGINT/SIGTERM, then drain in-flight requests.
    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
