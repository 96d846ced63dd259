//! Organization entity, hosted by a college

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Record;
use crate::core::entity::{Entity, EntityKind};
use crate::core::field::{Attr, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub college: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrganizationInput {
    #[validate(length(min = 1, max = 250))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    pub college: Uuid,
}

impl Organization {
    pub fn new(name: impl Into<String>, description: impl Into<String>, college: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            college,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Organization {
    type Input = OrganizationInput;

    const KIND: EntityKind = EntityKind::Organization;

    fn id(&self) -> Uuid {
        self.id
    }

    fn attr(&self, field: &str) -> Option<Attr> {
        match field {
            "id" => Some(Attr::Value(FieldValue::Uuid(self.id))),
            "name" => Some(Attr::string(&self.name)),
            "description" => Some(Attr::string(&self.description)),
            "college" => Some(Attr::Ref(EntityKind::College, self.college)),
            "created_at" => Some(Attr::Value(FieldValue::DateTime(self.created_at))),
            "updated_at" => Some(Attr::Value(FieldValue::DateTime(self.updated_at))),
            _ => None,
        }
    }

    fn references(&self) -> Vec<(&'static str, EntityKind, Uuid)> {
        vec![("college", EntityKind::College, self.college)]
    }

    fn from_input(input: OrganizationInput) -> Self {
        Self::new(input.name, input.description, input.college)
    }

    fn apply_input(&mut self, input: OrganizationInput) {
        self.name = input.name;
        self.description = input.description;
        self.college = input.college;
        self.updated_at = Utc::now();
    }

    fn into_record(self) -> Record {
        Record::Organization(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Organization(organization) => Some(organization),
            _ => None,
        }
    }
}
