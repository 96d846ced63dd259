//! Program entity, belongs to a college

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Record;
use crate::core::entity::{Entity, EntityKind};
use crate::core::field::{Attr, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: Uuid,
    pub prog_name: String,
    pub college: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProgramInput {
    #[validate(length(min = 1, max = 150))]
    pub prog_name: String,
    pub college: Uuid,
}

impl Program {
    pub fn new(prog_name: impl Into<String>, college: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            prog_name: prog_name.into(),
            college,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Program {
    type Input = ProgramInput;

    const KIND: EntityKind = EntityKind::Program;

    fn id(&self) -> Uuid {
        self.id
    }

    fn attr(&self, field: &str) -> Option<Attr> {
        match field {
            "id" => Some(Attr::Value(FieldValue::Uuid(self.id))),
            "prog_name" => Some(Attr::string(&self.prog_name)),
            "college" => Some(Attr::Ref(EntityKind::College, self.college)),
            "created_at" => Some(Attr::Value(FieldValue::DateTime(self.created_at))),
            "updated_at" => Some(Attr::Value(FieldValue::DateTime(self.updated_at))),
            _ => None,
        }
    }

    fn references(&self) -> Vec<(&'static str, EntityKind, Uuid)> {
        vec![("college", EntityKind::College, self.college)]
    }

    fn from_input(input: ProgramInput) -> Self {
        Self::new(input.prog_name, input.college)
    }

    fn apply_input(&mut self, input: ProgramInput) {
        self.prog_name = input.prog_name;
        self.college = input.college;
        self.updated_at = Utc::now();
    }

    fn into_record(self) -> Record {
        Record::Program(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Program(program) => Some(program),
            _ => None,
        }
    }
}
