//! Core module containing the query layer and the traits it is built on

pub mod dashboard;
pub mod entity;
pub mod error;
pub mod field;
pub mod plan;
pub mod policy;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use dashboard::{DashboardCounts, compute_dashboard};
pub use entity::{Entity, EntityKind};
pub use error::{RegistryError, Result};
pub use field::{Attr, FieldValue};
pub use plan::{EntityQueryConfig, FieldPath, OrderSource, QueryPlan, SearchPredicate};
pub use policy::query_config;
pub use query::{ListQuery, PAGE_SIZE, PaginatedResponse, PaginationMeta};
pub use service::RegistryStore;
pub use store::{Page, RecordLookup};
