//! Account Service - account ledger API with per-account access tokens.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AccountConfig;
use crate::middleware::AccessGate;
use crate::services::{AccountStore, JwtService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AccountConfig,
    pub jwt: JwtService,
    pub store: Arc<dyn AccountStore>,
    pub gate: AccessGate,
}

impl AppState {
    pub fn new(config: AccountConfig, jwt: JwtService, store: Arc<dyn AccountStore>) -> Self {
        let gate = AccessGate::new(jwt.clone(), store.clone());
        Self {
            config,
            jwt,
            store,
            gate,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Per-account routes sit behind the access gate
    let account_routes = Router::new()
        .route(
            "/account/:id",
            get(handlers::get_account)
                .delete(handlers::delete_account)
                .fallback(handlers::method_not_allowed),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::account_auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/login",
            post(handlers::login).fallback(handlers::method_not_allowed),
        )
        .route(
            "/account",
            get(handlers::list_accounts)
                .post(handlers::create_account)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/transaction",
            post(handlers::create_transaction).fallback(handlers::method_not_allowed),
        )
        .merge(account_routes)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}
