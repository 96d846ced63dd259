//! ServerBuilder for fluent API to build HTTP servers

use super::descriptor::RecordDescriptor;
use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::RegistryConfig;
use crate::core::entity::Entity;
use crate::core::service::RegistryStore;
use crate::entities::{College, OrgMember, Organization, Program, Student};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating HTTP servers with auto-registered routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryRegistryStore::new())
///     .register_all_entities()
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn RegistryStore>>,
    config: RegistryConfig,
    entity_registry: EntityRegistry,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            config: RegistryConfig::default(),
            entity_registry: EntityRegistry::new(),
        }
    }

    /// Set the entity store (required)
    pub fn with_store(self, store: impl RegistryStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set an entity store that is also held elsewhere (e.g. for seeding)
    pub fn with_shared_store(mut self, store: Arc<dyn RegistryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the default configuration
    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Expose CRUD and list routes for one entity type
    pub fn register_entity<E: Entity>(mut self) -> Self {
        self.entity_registry
            .register(Box::new(RecordDescriptor::<E>::new()));
        self
    }

    /// Expose all five registry entities
    pub fn register_all_entities(self) -> Self {
        self.register_entity::<College>()
            .register_entity::<Program>()
            .register_entity::<Student>()
            .register_entity::<Organization>()
            .register_entity::<OrgMember>()
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("RegistryStore is required. Call .with_store()"))?;

        Ok(ServerHost::new(self.config, store, self.entity_registry))
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        RestExposure::build_router(Arc::new(self.build_host()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the configured address and handles SIGTERM and SIGINT
    /// (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_address()?;
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
