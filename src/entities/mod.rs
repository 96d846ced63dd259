//! Registry entities: colleges, programs, students, organizations and
//! organization memberships

pub mod college;
pub mod org_member;
pub mod organization;
pub mod program;
pub mod student;

pub use college::{College, CollegeInput};
pub use org_member::{OrgMember, OrgMemberInput};
pub use organization::{Organization, OrganizationInput};
pub use program::{Program, ProgramInput};
pub use student::{Student, StudentInput};

use serde::Serialize;
use uuid::Uuid;

use crate::core::entity::{Entity, EntityKind};
use crate::core::field::Attr;

/// Any registry record
///
/// Serializes exactly like the wrapped entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    College(College),
    Program(Program),
    Student(Student),
    Organization(Organization),
    OrgMember(OrgMember),
}

macro_rules! with_entity {
    ($record:expr, $entity:ident => $body:expr) => {
        match $record {
            Record::College($entity) => $body,
            Record::Program($entity) => $body,
            Record::Student($entity) => $body,
            Record::Organization($entity) => $body,
            Record::OrgMember($entity) => $body,
        }
    };
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::College(_) => EntityKind::College,
            Record::Program(_) => EntityKind::Program,
            Record::Student(_) => EntityKind::Student,
            Record::Organization(_) => EntityKind::Organization,
            Record::OrgMember(_) => EntityKind::OrgMember,
        }
    }

    pub fn id(&self) -> Uuid {
        with_entity!(self, e => e.id())
    }

    pub fn attr(&self, field: &str) -> Option<Attr> {
        with_entity!(self, e => e.attr(field))
    }

    pub fn references(&self) -> Vec<(&'static str, EntityKind, Uuid)> {
        with_entity!(self, e => e.references())
    }

    /// Whether this record points at the given record
    pub fn refers_to(&self, kind: EntityKind, id: Uuid) -> bool {
        self.references()
            .into_iter()
            .any(|(_, k, target)| k == kind && target == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_record_serializes_like_entity() {
        let college = College::new("College of Science");
        let record = college.clone().into_record();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::to_value(&college).unwrap()
        );
    }

    #[test]
    fn test_record_kind_and_references() {
        let college = College::new("College of Science");
        let program = Program::new("BS Biology", college.id);
        let record = program.clone().into_record();

        assert_eq!(record.kind(), EntityKind::Program);
        assert_eq!(record.id(), program.id);
        assert!(record.refers_to(EntityKind::College, college.id));
        assert!(!record.refers_to(EntityKind::Program, college.id));
    }

    #[test]
    fn test_from_record_rejects_other_kinds() {
        let college = College::new("College of Arts").into_record();
        assert!(Program::from_record(college.clone()).is_none());
        assert!(College::from_record(college).is_some());
    }

    #[test]
    fn test_member_references_both_sides() {
        let member = OrgMember::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        );
        let refs = member.references();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].0, "student");
        assert_eq!(refs[1].1, EntityKind::Organization);
    }
}
