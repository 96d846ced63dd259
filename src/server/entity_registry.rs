//! Entity registry for managing entity descriptors and auto-generating CRUD routes

use axum::Router;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::entity::EntityKind;
use crate::core::plan::FieldPath;
use crate::core::policy::query_config;
use crate::server::handlers::RegistryState;

/// Trait that describes how to build routes for an entity
///
/// Should return a Router with routes like:
/// - GET/POST /{plural}
/// - GET/PUT/DELETE /{plural}/{id}
pub trait EntityDescriptor: Send + Sync {
    /// The entity type tag
    fn kind(&self) -> EntityKind;

    /// The plural form used in URLs (e.g., "members")
    fn plural(&self) -> &'static str {
        self.kind().plural()
    }

    /// Build the CRUD routes for this entity
    fn build_routes(&self) -> Router<RegistryState>;
}

/// Introspection entry for one registered entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInfo {
    pub entity: EntityKind,
    pub path: String,
    pub search_fields: Vec<FieldPath>,
    pub sort_tokens: Vec<&'static str>,
    pub default_order: Vec<FieldPath>,
}

impl EntityInfo {
    fn describe(kind: EntityKind) -> Self {
        let config = query_config(kind);
        let (default_order, _) = config.fallback_order();
        Self {
            entity: kind,
            path: format!("/{}", kind.plural()),
            search_fields: config.search_fields.to_vec(),
            sort_tokens: config.sort_tokens(),
            default_order: default_order.to_vec(),
        }
    }
}

/// Registry for all entities exposed by the server
///
/// Keyed by entity type, so registering a type twice replaces the first
/// descriptor and routes are built in a stable order.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<EntityKind, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity descriptor
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        self.descriptors.insert(descriptor.kind(), descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router<RegistryState> {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Get all registered entity types
    pub fn entity_kinds(&self) -> Vec<EntityKind> {
        self.descriptors.keys().copied().collect()
    }

    /// Search and sort capabilities of every registered entity
    pub fn describe(&self) -> Vec<EntityInfo> {
        self.descriptors.keys().map(|k| EntityInfo::describe(*k)).collect()
    }
}
