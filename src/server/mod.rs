//! Server module for building the registry's HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD and list routes for every registry entity
//! - The dashboard at `/` and `/dashboard`
//! - Introspection routes for API discovery

pub mod builder;
pub mod descriptor;
pub mod entity_registry;
pub mod exposure;
pub mod handlers;
pub mod host;

pub use builder::ServerBuilder;
pub use descriptor::RecordDescriptor;
pub use entity_registry::{EntityDescriptor, EntityInfo, EntityRegistry};
pub use exposure::RestExposure;
pub use handlers::RegistryState;
pub use host::ServerHost;
