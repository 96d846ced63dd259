//! Plan execution over an in-process snapshot of records
//!
//! Any backend that can hand out records by `(kind, id)` gets filtering,
//! ordering and paging of a [`QueryPlan`] for free by implementing
//! [`RecordLookup`].

use std::cmp::Ordering;
use uuid::Uuid;

use crate::core::entity::EntityKind;
use crate::core::field::{Attr, FieldValue};
use crate::core::plan::{FieldPath, QueryPlan, SearchPredicate};
use crate::entities::Record;

/// One page of an executed plan
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records inside the page window, in plan order
    pub items: Vec<T>,

    /// Number of records that matched the predicate
    pub total: usize,
}

/// Trait for record snapshots that can execute query plans
///
/// Implementors only provide [`lookup`](RecordLookup::lookup); path
/// resolution, filtering, ordering and paging are shared.
pub trait RecordLookup {
    /// Fetch a record by type and id
    fn lookup(&self, kind: EntityKind, id: Uuid) -> Option<&Record>;

    /// Resolve a field path starting at `record`
    ///
    /// Each hop must be a reference attribute. Unknown fields and dangling
    /// references resolve to [`FieldValue::Null`].
    fn resolve(&self, record: &Record, path: &FieldPath) -> FieldValue {
        let Some((last, hops)) = path.steps().split_last() else {
            return FieldValue::Null;
        };

        let mut current = record;
        for step in hops {
            let next = match current.attr(step) {
                Some(Attr::Ref(kind, id)) => self.lookup(kind, id),
                _ => None,
            };
            match next {
                Some(record) => current = record,
                None => return FieldValue::Null,
            }
        }

        match current.attr(last) {
            Some(Attr::Value(value)) => value,
            Some(Attr::Ref(_, id)) => FieldValue::Uuid(id),
            None => FieldValue::Null,
        }
    }

    /// Whether a record satisfies a search predicate
    fn matches(&self, record: &Record, predicate: &SearchPredicate) -> bool {
        let values: Vec<FieldValue> = predicate
            .fields()
            .iter()
            .map(|path| self.resolve(record, path))
            .collect();
        predicate.matches_any(values.iter())
    }

    /// Run a plan over the candidate records of its entity type
    ///
    /// Candidates are expected in insertion order; records with equal order
    /// keys keep that order (the sort is stable).
    fn execute_plan<'a, I>(&'a self, candidates: I, plan: &QueryPlan) -> Page<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut keyed: Vec<(Vec<FieldValue>, &Record)> = candidates
            .into_iter()
            .filter(|record| record.kind() == plan.entity)
            .filter(|record| {
                plan.predicate
                    .as_ref()
                    .is_none_or(|predicate| self.matches(record, predicate))
            })
            .map(|record| {
                let keys = plan
                    .order
                    .iter()
                    .map(|path| self.resolve(record, path))
                    .collect();
                (keys, record)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b));

        let total = keyed.len();
        let items = keyed
            .into_iter()
            .skip(plan.offset())
            .take(plan.page_size)
            .map(|(_, record)| record.clone())
            .collect();

        Page { items, total }
    }
}

fn compare_keys(a: &[FieldValue], b: &[FieldValue]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp_ascending(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
