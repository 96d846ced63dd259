//! Service trait for the registry's entity store

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::entity::EntityKind;
use crate::core::error::Result;
use crate::core::plan::QueryPlan;
use crate::core::store::Page;
use crate::entities::Record;

/// Service trait for the entity store behind the registry
///
/// The query layer only ever talks to the store through this trait. A plan is
/// executed as one unit; failures come back as
/// [`StorageError`](crate::core::error::StorageError) and are passed through
/// to the caller untouched.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Filter, order and page the records a plan describes
    async fn execute(&self, plan: &QueryPlan) -> Result<Page<Record>>;

    /// Get a record by type and id
    async fn get(&self, kind: EntityKind, id: Uuid) -> Result<Option<Record>>;

    /// Insert a new record
    ///
    /// Fails when the id is taken or a required reference is missing.
    async fn insert(&self, record: Record) -> Result<Record>;

    /// Replace an existing record
    async fn update(&self, record: Record) -> Result<Record>;

    /// Delete a record
    ///
    /// Fails when another record still references it.
    async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<()>;

    /// Number of records of one type
    async fn count(&self, kind: EntityKind) -> Result<usize>;

    /// `(student, date_joined)` for every membership
    async fn membership_dates(&self) -> Result<Vec<(Uuid, NaiveDate)>>;
}
