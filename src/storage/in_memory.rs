//! In-memory implementation of RegistryStore for testing and development

use crate::core::entity::EntityKind;
use crate::core::error::{EntityError, Result, StorageError};
use crate::core::plan::QueryPlan;
use crate::core::service::RegistryStore;
use crate::core::store::{Page, RecordLookup};
use crate::entities::Record;
use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// One insertion-ordered table per entity type
#[derive(Default)]
struct Tables {
    by_kind: HashMap<EntityKind, IndexMap<Uuid, Record>>,
}

impl Tables {
    fn records(&self, kind: EntityKind) -> impl Iterator<Item = &Record> {
        self.by_kind.get(&kind).into_iter().flat_map(|t| t.values())
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut IndexMap<Uuid, Record> {
        self.by_kind.entry(kind).or_default()
    }

    fn contains(&self, kind: EntityKind, id: Uuid) -> bool {
        self.by_kind.get(&kind).is_some_and(|t| t.contains_key(&id))
    }

    fn check_references(&self, record: &Record) -> Result<()> {
        for (field, target_type, id) in record.references() {
            if !self.contains(target_type, id) {
                return Err(EntityError::MissingReference {
                    entity_type: record.kind(),
                    field,
                    target_type,
                    id,
                }
                .into());
            }
        }
        Ok(())
    }

    /// First entity type holding a record that points at `(kind, id)`
    fn referenced_by(&self, kind: EntityKind, id: Uuid) -> Option<EntityKind> {
        EntityKind::ALL.into_iter().find(|other| {
            self.records(*other)
                .any(|record| record.refers_to(kind, id))
        })
    }
}

impl RecordLookup for Tables {
    fn lookup(&self, kind: EntityKind, id: Uuid) -> Option<&Record> {
        self.by_kind.get(&kind).and_then(|t| t.get(&id))
    }
}

/// In-memory registry store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// a plan executes under a single read guard, so it always sees one
/// consistent snapshot.
#[derive(Clone, Default)]
pub struct InMemoryRegistryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRegistryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| {
            StorageError::QueryFailed {
                message: format!("Failed to acquire read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| {
            StorageError::QueryFailed {
                message: format!("Failed to acquire write lock: {}", e),
            }
            .into()
        })
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistryStore {
    async fn execute(&self, plan: &QueryPlan) -> Result<Page<Record>> {
        let tables = self.read()?;
        let page = tables.execute_plan(tables.records(plan.entity), plan);

        tracing::debug!(
            entity = %plan.entity,
            total = page.total,
            returned = page.items.len(),
            "executed query plan"
        );

        Ok(page)
    }

    async fn get(&self, kind: EntityKind, id: Uuid) -> Result<Option<Record>> {
        let tables = self.read()?;
        Ok(tables.lookup(kind, id).cloned())
    }

    async fn insert(&self, record: Record) -> Result<Record> {
        let mut tables = self.write()?;
        let (kind, id) = (record.kind(), record.id());

        if tables.contains(kind, id) {
            return Err(EntityError::AlreadyExists {
                entity_type: kind,
                id,
            }
            .into());
        }
        tables.check_references(&record)?;

        tables.table_mut(kind).insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: Record) -> Result<Record> {
        let mut tables = self.write()?;
        let (kind, id) = (record.kind(), record.id());

        if !tables.contains(kind, id) {
            return Err(EntityError::NotFound {
                entity_type: kind,
                id,
            }
            .into());
        }
        tables.check_references(&record)?;

        tables.table_mut(kind).insert(id, record.clone());
        Ok(record)
    }

    async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<()> {
        let mut tables = self.write()?;

        if !tables.contains(kind, id) {
            return Err(EntityError::NotFound {
                entity_type: kind,
                id,
            }
            .into());
        }
        if let Some(referenced_by) = tables.referenced_by(kind, id) {
            return Err(EntityError::InUse {
                entity_type: kind,
                id,
                referenced_by,
            }
            .into());
        }

        tables.table_mut(kind).shift_remove(&id);
        Ok(())
    }

    async fn count(&self, kind: EntityKind) -> Result<usize> {
        let tables = self.read()?;
        Ok(tables.by_kind.get(&kind).map_or(0, |t| t.len()))
    }

    async fn membership_dates(&self) -> Result<Vec<(Uuid, NaiveDate)>> {
        let tables = self.read()?;
        Ok(tables
            .records(EntityKind::OrgMember)
            .filter_map(|record| match record {
                Record::OrgMember(member) => Some((member.student, member.date_joined)),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dashboard::{compute_dashboard, compute_dashboard_for_year};
    use crate::core::entity::Entity;
    use crate::core::error::RegistryError;
    use crate::core::plan::OrderSource;
    use crate::core::policy::{COLLEGE, ORG_MEMBER, ORGANIZATION, PROGRAM, STUDENT};
    use crate::entities::{College, OrgMember, Organization, Program, Student};
    use chrono::{Datelike, Local};

    async fn add<E: Entity>(store: &InMemoryRegistryStore, entity: E) -> E {
        store.insert(entity.clone().into_record()).await.unwrap();
        entity
    }

    fn names(page: &Page<Record>) -> Vec<String> {
        page.items
            .iter()
            .map(|record| match record {
                Record::College(c) => c.college_name.clone(),
                Record::Program(p) => p.prog_name.clone(),
                Record::Student(s) => s.firstname.clone(),
                Record::Organization(o) => o.name.clone(),
                Record::OrgMember(m) => m.date_joined.to_string(),
            })
            .collect()
    }

    async fn one_program(store: &InMemoryRegistryStore) -> Program {
        let college = add(store, College::new("College of Science")).await;
        add(store, Program::new("BS Computer Science", college.id)).await
    }

    #[tokio::test]
    async fn test_organization_default_order_by_college_then_name() {
        let store = InMemoryRegistryStore::new();
        let zeta = add(&store, College::new("Zeta College")).await;
        let alpha = add(&store, College::new("Alpha College")).await;
        add(&store, Organization::new("Chess", "", zeta.id)).await;
        add(&store, Organization::new("Art", "", alpha.id)).await;
        add(&store, Organization::new("Archery", "", zeta.id)).await;

        let plan = QueryPlan::build(&ORGANIZATION, None, None, 1);
        let page = store.execute(&plan).await.unwrap();
        assert_eq!(names(&page), vec!["Art", "Archery", "Chess"]);
    }

    #[tokio::test]
    async fn test_search_matches_any_field_once() {
        let store = InMemoryRegistryStore::new();
        let program = one_program(&store).await;
        add(&store, Student::new("2024-0001", "Cruz", "Maria", "Santos", program.id)).await;
        add(&store, Student::new("2024-0002", "Lim", "Paolo", "Marco", program.id)).await;
        add(&store, Student::new("2024-0003", "Tan", "Ana", "", program.id)).await;

        let plan = QueryPlan::build(&STUDENT, Some("mar"), None, 1);
        let page = store.execute(&plan).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(names(&page), vec!["Maria", "Paolo"]);
    }

    #[tokio::test]
    async fn test_search_reaches_program_name() {
        let store = InMemoryRegistryStore::new();
        let program = one_program(&store).await;
        add(&store, Student::new("2024-0001", "Cruz", "Maria", "", program.id)).await;

        let plan = QueryPlan::build(&STUDENT, Some("COMPUTER"), None, 1);
        assert_eq!(store.execute(&plan).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_second_page_of_seven_students() {
        let store = InMemoryRegistryStore::new();
        let program = one_program(&store).await;
        for n in 1..=7 {
            let student_id = format!("2024-000{}", n);
            add(&store, Student::new(student_id, "Doe", format!("S{}", n), "", program.id)).await;
        }

        let plan = QueryPlan::build(&STUDENT, None, None, 2);
        assert_eq!(plan.offset(), 5);
        let page = store.execute(&plan).await.unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(names(&page), vec!["S6", "S7"]);

        let plan = QueryPlan::build(&STUDENT, None, None, 3);
        assert!(store.execute(&plan).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_program_invalid_sort_orders_by_name() {
        let store = InMemoryRegistryStore::new();
        let college = add(&store, College::new("College of Science")).await;
        add(&store, Program::new("BS Physics", college.id)).await;
        add(&store, Program::new("BS Biology", college.id)).await;
        add(&store, Program::new("BS Mathematics", college.id)).await;

        let plan = QueryPlan::build(&PROGRAM, None, Some("drop table"), 1);
        assert_eq!(plan.order_source, OrderSource::Base);
        let page = store.execute(&plan).await.unwrap();
        assert_eq!(names(&page), vec!["BS Biology", "BS Mathematics", "BS Physics"]);
    }

    #[tokio::test]
    async fn test_members_search_and_sort_across_relations() {
        let store = InMemoryRegistryStore::new();
        let college = add(&store, College::new("College of Science")).await;
        let cs = add(&store, Program::new("BS Computer Science", college.id)).await;
        let bio = add(&store, Program::new("BS Biology", college.id)).await;
        let maria = add(&store, Student::new("1", "Cruz", "Maria", "", cs.id)).await;
        let jose = add(&store, Student::new("2", "Reyes", "Jose", "", bio.id)).await;
        let chess = add(&store, Organization::new("Chess Club", "", college.id)).await;
        let day = |d| NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
        add(&store, OrgMember::new(maria.id, chess.id, day(9))).await;
        add(&store, OrgMember::new(jose.id, chess.id, day(1))).await;

        let plan = QueryPlan::build(&ORG_MEMBER, Some("biology"), None, 1);
        let page = store.execute(&plan).await.unwrap();
        assert_eq!(names(&page), vec!["2024-02-01"]);

        let plan = QueryPlan::build(&ORG_MEMBER, None, Some("student__program__prog_name"), 1);
        let page = store.execute(&plan).await.unwrap();
        assert_eq!(names(&page), vec!["2024-02-01", "2024-02-09"]);

        let plan = QueryPlan::build(&ORG_MEMBER, None, None, 1);
        let page = store.execute(&plan).await.unwrap();
        assert_eq!(names(&page), vec!["2024-02-01", "2024-02-09"]);
    }

    #[tokio::test]
    async fn test_equal_keys_keep_insertion_order() {
        let store = InMemoryRegistryStore::new();
        let first = add(&store, College::new("Same")).await;
        let second = add(&store, College::new("Same")).await;

        let page = store
            .execute(&QueryPlan::build(&COLLEGE, None, None, 1))
            .await
            .unwrap();
        let ids: Vec<Uuid> = page.items.iter().map(Record::id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_insert_rejects_missing_reference() {
        let store = InMemoryRegistryStore::new();
        let err = store
            .insert(Program::new("BS Math", Uuid::new_v4()).into_record())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Entity(EntityError::MissingReference {
                field: "college",
                target_type: EntityKind::College,
                ..
            })
        ));
        assert_eq!(store.count(EntityKind::Program).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = InMemoryRegistryStore::new();
        let college = add(&store, College::new("College of Law")).await;
        let err = store.insert(college.into_record()).await.unwrap_err();
        assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = InMemoryRegistryStore::new();
        let err = store
            .update(College::new("Ghost").into_record())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_referenced_record_is_rejected() {
        let store = InMemoryRegistryStore::new();
        let program = one_program(&store).await;
        let college_id = program.college;

        let err = store.delete(EntityKind::College, college_id).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Entity(EntityError::InUse {
                referenced_by: EntityKind::Program,
                ..
            })
        ));

        store.delete(EntityKind::Program, program.id).await.unwrap();
        store.delete(EntityKind::College, college_id).await.unwrap();
        assert_eq!(store.count(EntityKind::College).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let store = InMemoryRegistryStore::new();
        assert_eq!(compute_dashboard(&store).await.unwrap(), Default::default());

        let program = one_program(&store).await;
        let college = program.college;
        let maria = add(&store, Student::new("1", "Cruz", "Maria", "", program.id)).await;
        let jose = add(&store, Student::new("2", "Reyes", "Jose", "", program.id)).await;
        let year = Local::now().year();
        let this_year = NaiveDate::from_ymd_opt(year, 1, 15).unwrap();
        let last_year = NaiveDate::from_ymd_opt(year - 1, 12, 31).unwrap();
        for name in ["Chess", "Debate", "Choir"] {
            let org = add(&store, Organization::new(name, "", college)).await;
            add(&store, OrgMember::new(maria.id, org.id, this_year)).await;
        }
        let org = add(&store, Organization::new("Drama", "", college)).await;
        add(&store, OrgMember::new(jose.id, org.id, last_year)).await;

        let counts = compute_dashboard_for_year(&store, year).await.unwrap();
        assert_eq!(counts.total_students, 2);
        assert_eq!(counts.students_joined_this_year, 1);
        assert_eq!(counts.total_organizations, 4);
        assert_eq!(counts.total_programs, 1);
    }
}
