//! College entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Record;
use crate::core::entity::{Entity, EntityKind};
use crate::core::field::{Attr, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: Uuid,
    pub college_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CollegeInput {
    #[validate(length(min = 1, max = 150))]
    pub college_name: String,
}

impl College {
    pub fn new(college_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            college_name: college_name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for College {
    type Input = CollegeInput;

    const KIND: EntityKind = EntityKind::College;

    fn id(&self) -> Uuid {
        self.id
    }

    fn attr(&self, field: &str) -> Option<Attr> {
        match field {
            "id" => Some(Attr::Value(FieldValue::Uuid(self.id))),
            "college_name" => Some(Attr::string(&self.college_name)),
            "created_at" => Some(Attr::Value(FieldValue::DateTime(self.created_at))),
            "updated_at" => Some(Attr::Value(FieldValue::DateTime(self.updated_at))),
            _ => None,
        }
    }

    fn from_input(input: CollegeInput) -> Self {
        Self::new(input.college_name)
    }

    fn apply_input(&mut self, input: CollegeInput) {
        self.college_name = input.college_name;
        self.updated_at = Utc::now();
    }

    fn into_record(self) -> Record {
        Record::College(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::College(college) => Some(college),
            _ => None,
        }
    }
}
