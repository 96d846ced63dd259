//! Entity traits defining the core abstraction for all registry records

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::core::field::Attr;
use crate::entities::Record;

/// Tag naming one of the five registry entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    College,
    Program,
    Student,
    Organization,
    OrgMember,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::College,
        EntityKind::Program,
        EntityKind::Student,
        EntityKind::Organization,
        EntityKind::OrgMember,
    ];

    /// The singular resource name (e.g., "college", "org_member")
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::College => "college",
            EntityKind::Program => "program",
            EntityKind::Student => "student",
            EntityKind::Organization => "organization",
            EntityKind::OrgMember => "org_member",
        }
    }

    /// The plural resource name used in URLs (e.g., "colleges", "members")
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::College => "colleges",
            EntityKind::Program => "programs",
            EntityKind::Student => "students",
            EntityKind::Organization => "organizations",
            EntityKind::OrgMember => "members",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Base trait for all registry records.
///
/// All entities have:
/// - id: Unique identifier
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// Besides metadata, an entity exposes its attributes by name through
/// [`Entity::attr`]. Attributes that point at another record come back as
/// [`Attr::Ref`], which is what lets a plan walk `student.program.prog_name`
/// without the query layer knowing the concrete types.
pub trait Entity: Clone + Send + Sync + Serialize + 'static {
    /// Validated payload accepted by create and update
    type Input: DeserializeOwned + Validate + Send + 'static;

    /// The entity type tag
    const KIND: EntityKind;

    // === Core Entity Fields ===

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get an attribute by field name
    fn attr(&self, field: &str) -> Option<Attr>;

    /// Records this entity points at (required foreign keys)
    fn references(&self) -> Vec<(&'static str, EntityKind, Uuid)> {
        Vec::new()
    }

    // === Lifecycle ===

    /// Build a fresh entity from a validated payload
    fn from_input(input: Self::Input) -> Self;

    /// Overwrite the mutable fields from a validated payload.
    ///
    /// Keeps `id` and `created_at`, bumps `updated_at`.
    fn apply_input(&mut self, input: Self::Input);

    // === Record conversion ===

    fn into_record(self) -> Record;

    fn from_record(record: Record) -> Option<Self>;
}
