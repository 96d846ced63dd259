//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` with the dashboard,
//! health, introspection and entity CRUD routes.

use super::super::host::ServerHost;
use crate::server::handlers::dashboard;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host containing all state
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Dashboard routes (`/`, `/dashboard`)
    /// - Health check routes
    /// - Introspection route (`/entities`)
    /// - Entity CRUD routes
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let state = host.state();

        let registry_routes = Router::new()
            .route("/", get(dashboard))
            .route("/dashboard", get(dashboard))
            .merge(host.entity_registry.build_routes())
            .with_state(state);

        let app = Self::health_routes()
            .merge(Self::introspection_routes(&host))
            .merge(registry_routes);

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        ))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "studentorg"
        }))
    }

    /// Lists every registered entity with its search fields and sort tokens
    fn introspection_routes(host: &ServerHost) -> Router {
        let catalog = Arc::new(host.entity_registry.describe());
        Router::new().route(
            "/entities",
            get(move || {
                let catalog = catalog.clone();
                async move { Json(json!({ "entities": catalog.as_ref() })) }
            }),
        )
    }
}
