//! Student entity, enrolled in a program

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Record;
use crate::core::entity::{Entity, EntityKind};
use crate::core::field::{Attr, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    /// School-issued identifier, distinct from the record id
    pub student_id: String,
    pub lastname: String,
    pub firstname: String,
    pub middlename: String,
    pub program: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StudentInput {
    #[validate(length(min = 1, max = 15))]
    pub student_id: String,
    #[validate(length(min = 1, max = 25))]
    pub lastname: String,
    #[validate(length(min = 1, max = 25))]
    pub firstname: String,
    #[serde(default)]
    #[validate(length(max = 25))]
    pub middlename: String,
    pub program: Uuid,
}

impl Student {
    pub fn new(
        student_id: impl Into<String>,
        lastname: impl Into<String>,
        firstname: impl Into<String>,
        middlename: impl Into<String>,
        program: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_id: student_id.into(),
            lastname: lastname.into(),
            firstname: firstname.into(),
            middlename: middlename.into(),
            program,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Student {
    type Input = StudentInput;

    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> Uuid {
        self.id
    }

    fn attr(&self, field: &str) -> Option<Attr> {
        match field {
            "id" => Some(Attr::Value(FieldValue::Uuid(self.id))),
            "student_id" => Some(Attr::string(&self.student_id)),
            "lastname" => Some(Attr::string(&self.lastname)),
            "firstname" => Some(Attr::string(&self.firstname)),
            "middlename" => Some(Attr::string(&self.middlename)),
            "program" => Some(Attr::Ref(EntityKind::Program, self.program)),
            "created_at" => Some(Attr::Value(FieldValue::DateTime(self.created_at))),
            "updated_at" => Some(Attr::Value(FieldValue::DateTime(self.updated_at))),
            _ => None,
        }
    }

    fn references(&self) -> Vec<(&'static str, EntityKind, Uuid)> {
        vec![("program", EntityKind::Program, self.program)]
    }

    fn from_input(input: StudentInput) -> Self {
        Self::new(
            input.student_id,
            input.lastname,
            input.firstname,
            input.middlename,
            input.program,
        )
    }

    fn apply_input(&mut self, input: StudentInput) {
        self.student_id = input.student_id;
        self.lastname = input.lastname;
        self.firstname = input.firstname;
        self.middlename = input.middlename;
        self.program = input.program;
        self.updated_at = Utc::now();
    }

    fn into_record(self) -> Record {
        Record::Student(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Student(student) => Some(student),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_input_keeps_identity() {
        let mut student = Student::new("2024-0001", "Cruz", "Maria", "", Uuid::new_v4());
        let (id, created_at) = (student.id, student.created_at);
        let program = Uuid::new_v4();

        student.apply_input(StudentInput {
            student_id: "2024-0002".to_string(),
            lastname: "Santos".to_string(),
            firstname: "Maria".to_string(),
            middlename: "Reyes".to_string(),
            program,
        });

        assert_eq!(student.id, id);
        assert_eq!(student.created_at, created_at);
        assert!(student.updated_at >= created_at);
        assert_eq!(student.lastname, "Santos");
        assert_eq!(student.program, program);
    }

    #[test]
    fn test_input_validation() {
        let input: StudentInput = serde_json::from_value(serde_json::json!({
            "student_id": "",
            "lastname": "Cruz",
            "firstname": "Maria",
            "program": Uuid::nil(),
        }))
        .unwrap();
        assert_eq!(input.middlename, "");
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("student_id"));
    }
}
