//! Server host for transport-agnostic API exposure
//!
//! The host holds everything an exposure needs (store, config and the
//! registered entities) and is the single source of truth for application
//! state.

use crate::config::RegistryConfig;
use crate::core::entity::EntityKind;
use crate::core::service::RegistryStore;
use crate::server::entity_registry::EntityRegistry;
use crate::server::handlers::RegistryState;
use std::sync::Arc;

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(config, store, entity_registry));
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
pub struct ServerHost {
    /// Loaded configuration
    pub config: Arc<RegistryConfig>,

    /// Entity store shared by every handler
    pub store: Arc<dyn RegistryStore>,

    /// Entity registry for CRUD routes
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    pub fn new(
        config: RegistryConfig,
        store: Arc<dyn RegistryStore>,
        entity_registry: EntityRegistry,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            entity_registry,
        }
    }

    /// Get entity types registered in the host
    pub fn entity_kinds(&self) -> Vec<EntityKind> {
        self.entity_registry.entity_kinds()
    }

    /// Handler state backed by this host's store
    pub fn state(&self) -> RegistryState {
        RegistryState {
            store: self.store.clone(),
        }
    }
}
