//! Field values as seen by the query layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use uuid::Uuid;

use crate::core::entity::EntityKind;

/// A polymorphic field value resolved from a record
///
/// Search and ordering work on these values only, so a plan can be executed
/// without knowing the concrete record types.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Uuid(Uuid),
    Null,
}

impl FieldValue {
    /// Case-insensitive substring test
    ///
    /// `needle` must already be lowercased. Only string values can match;
    /// dates, ids and nulls never do.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::String(s) => s.to_lowercase().contains(needle),
            _ => false,
        }
    }

    /// Ascending comparison used by plan ordering
    ///
    /// Null sorts before everything. Values of different variants fall back to
    /// a fixed variant rank so the ordering stays total.
    pub fn cmp_ascending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::String(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::DateTime(_) => 3,
            FieldValue::Uuid(_) => 4,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

/// One attribute of a record: either a plain value or a reference to
/// another record
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    Value(FieldValue),
    Ref(EntityKind, Uuid),
}

impl Attr {
    pub fn string(value: &str) -> Self {
        Attr::Value(FieldValue::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_case_insensitive() {
        let value = FieldValue::from("Maria Clara");
        assert!(value.contains_lowercase("mar"));
        assert!(value.contains_lowercase("clara"));
        assert!(!value.contains_lowercase("marco"));
    }

    #[test]
    fn test_non_string_never_contains() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(!FieldValue::Date(date).contains_lowercase("2024"));
        assert!(!FieldValue::Null.contains_lowercase(""));
    }

    #[test]
    fn test_null_sorts_first() {
        let value = FieldValue::from("a");
        assert_eq!(FieldValue::Null.cmp_ascending(&value), Ordering::Less);
        assert_eq!(value.cmp_ascending(&FieldValue::Null), Ordering::Greater);
        assert_eq!(
            FieldValue::Null.cmp_ascending(&FieldValue::Null),
            Ordering::Equal
        );
    }

    #[test]
    fn test_dates_compare_chronologically() {
        let early = FieldValue::Date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        let late = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(early.cmp_ascending(&late), Ordering::Less);
    }
}
