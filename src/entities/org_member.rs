//! Organization membership: a student joining an organization on a date

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Record;
use crate::core::entity::{Entity, EntityKind};
use crate::core::field::{Attr, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMember {
    pub id: Uuid,
    pub student: Uuid,
    pub organization: Uuid,
    pub date_joined: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrgMemberInput {
    pub student: Uuid,
    pub organization: Uuid,
    pub date_joined: NaiveDate,
}

impl OrgMember {
    pub fn new(student: Uuid, organization: Uuid, date_joined: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student,
            organization,
            date_joined,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for OrgMember {
    type Input = OrgMemberInput;

    const KIND: EntityKind = EntityKind::OrgMember;

    fn id(&self) -> Uuid {
        self.id
    }

    fn attr(&self, field: &str) -> Option<Attr> {
        match field {
            "id" => Some(Attr::Value(FieldValue::Uuid(self.id))),
            "student" => Some(Attr::Ref(EntityKind::Student, self.student)),
            "organization" => Some(Attr::Ref(EntityKind::Organization, self.organization)),
            "date_joined" => Some(Attr::Value(FieldValue::Date(self.date_joined))),
            "created_at" => Some(Attr::Value(FieldValue::DateTime(self.created_at))),
            "updated_at" => Some(Attr::Value(FieldValue::DateTime(self.updated_at))),
            _ => None,
        }
    }

    fn references(&self) -> Vec<(&'static str, EntityKind, Uuid)> {
        vec![
            ("student", EntityKind::Student, self.student),
            ("organization", EntityKind::Organization, self.organization),
        ]
    }

    fn from_input(input: OrgMemberInput) -> Self {
        Self::new(input.student, input.organization, input.date_joined)
    }

    fn apply_input(&mut self, input: OrgMemberInput) {
        self.student = input.student;
        self.organization = input.organization;
        self.date_joined = input.date_joined;
        self.updated_at = Utc::now();
    }

    fn into_record(self) -> Record {
        Record::OrgMember(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::OrgMember(member) => Some(member),
            _ => None,
        }
    }
}
