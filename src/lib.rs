//! # studentorg
//!
//! A registry of colleges, programs, students, student organizations and
//! organization memberships, served as a JSON API.
//!
//! ## Features
//!
//! - **Storage-agnostic list queries**: search, allow-listed sorting and
//!   paging are turned into a [`QueryPlan`](core::plan::QueryPlan) before any
//!   store is touched
//! - **Per-entity policies**: which fields are searchable and which sort
//!   tokens are honoured live in static tables ([`core::policy`])
//! - **Relation-aware paths**: search and sort can reach through references
//!   (`student__program__prog_name`)
//! - **Dashboard**: totals plus distinct students who joined an organization
//!   this year
//! - **Referential integrity**: creates need existing references, deletes of
//!   referenced records are refused
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use studentorg::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = Arc::new(InMemoryRegistryStore::new());
//!     seed_demo_data(store.as_ref()).await?;
//!
//!     ServerBuilder::new()
//!         .with_shared_store(store)
//!         .register_all_entities()
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        dashboard::{DashboardCounts, compute_dashboard},
        entity::{Entity, EntityKind},
        error::{EntityError, RegistryError, StorageError, ValidationError},
        field::{Attr, FieldValue},
        plan::{EntityQueryConfig, FieldPath, OrderSource, QueryPlan, SearchPredicate},
        policy::query_config,
        query::{ListQuery, PAGE_SIZE, PaginatedResponse, PaginationMeta},
        service::RegistryStore,
        store::{Page, RecordLookup},
        validation::Validated,
    };

    // === Entities ===
    pub use crate::entities::{
        College, CollegeInput, OrgMember, OrgMemberInput, Organization, OrganizationInput,
        Program, ProgramInput, Record, Student, StudentInput,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryRegistryStore, seed_demo_data};

    // === Config ===
    pub use crate::config::{RegistryConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{
        EntityDescriptor, EntityRegistry, RecordDescriptor, RegistryState, RestExposure,
        ServerBuilder, ServerHost,
    };

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
