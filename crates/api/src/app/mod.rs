//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: use-case services and document store selection
//! - `dispatcher.rs`: error-kind → response handler registry
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: query DTOs
//! - `extract.rs`: request body extractor
//! - `errors.rs`: service error type and the generic 500 fallback

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use warehouse_infra::StoreError;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dispatcher;
pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> Result<Router, StoreError> {
    let services = services::build_services(config).await?;
    Ok(router(Arc::new(services)))
}

/// Build the HTTP router around already-constructed services.
pub fn router(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_context))
                .layer(Extension(services)),
        )
}

pub use services::AppServices;
