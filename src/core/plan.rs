//! Query plans: the storage-agnostic description of one list request
//!
//! A [`QueryPlan`] is built from untrusted request parameters and a static
//! [`EntityQueryConfig`]. Building a plan never fails and never touches the
//! store:
//!
//! - a blank search term produces no predicate (match all)
//! - a sort token that is not allow-listed falls back silently, either to the
//!   entity's default order or, for entities without an explicit fallback, to
//!   its static base order
//! - page numbers below 1 clamp to 1
//!
//! The silent fallback is a deliberate leniency: list pages must always
//! render, so an unknown `sort_by` is never reported back as a 400.
//!
//! Execution order is fixed: filter, then order, then the page window.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::core::entity::EntityKind;
use crate::core::field::FieldValue;
use crate::core::query::{ListQuery, PAGE_SIZE};

/// Ordered field-access steps from a record to a value
///
/// All steps except the last must name reference attributes; the last step
/// names the value. `FieldPath(&["student", "program", "prog_name"])` reads
/// the program name of a membership's student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath(pub &'static [&'static str]);

impl FieldPath {
    pub fn steps(&self) -> &'static [&'static str] {
        self.0
    }

    /// Number of relation hops before the final field
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One allow-listed sort token and the field paths it orders by
#[derive(Debug)]
pub struct SortOption {
    pub token: &'static str,
    pub paths: &'static [FieldPath],
}

/// Per-entity query configuration
///
/// One static record per entity type, consumed by the generic plan builder.
#[derive(Debug)]
pub struct EntityQueryConfig {
    pub entity: EntityKind,

    /// Fields searched with OR / substring / case-insensitive semantics
    pub search_fields: &'static [FieldPath],

    /// The only sort tokens a caller may request
    pub sort_options: &'static [SortOption],

    /// Order used when the requested token is absent or unknown
    pub default_order: &'static [FieldPath],

    /// Whether an unknown token falls back to `default_order`.
    ///
    /// When `false` the entity has no named fallback and its static
    /// `base_order` applies instead.
    pub has_explicit_fallback: bool,

    /// Static ordering of the entity, independent of the request
    pub base_order: &'static [FieldPath],
}

impl EntityQueryConfig {
    /// Find the allow-listed option for a token (exact match)
    pub fn sort_option(&self, token: &str) -> Option<&'static SortOption> {
        self.sort_options.iter().find(|option| option.token == token)
    }

    pub fn allows(&self, token: &str) -> bool {
        self.sort_option(token).is_some()
    }

    pub fn sort_tokens(&self) -> Vec<&'static str> {
        self.sort_options.iter().map(|option| option.token).collect()
    }

    /// Order applied when no valid token was requested
    pub fn fallback_order(&self) -> (&'static [FieldPath], OrderSource) {
        if self.has_explicit_fallback {
            (self.default_order, OrderSource::Fallback)
        } else {
            (self.base_order, OrderSource::Base)
        }
    }

    /// Resolve a caller-supplied sort token to concrete field paths
    pub fn resolve_order(&self, token: Option<&str>) -> (&'static [FieldPath], OrderSource) {
        match token.and_then(|t| self.sort_option(t)) {
            Some(option) => (option.paths, OrderSource::Requested),
            None => self.fallback_order(),
        }
    }
}

/// Where the order of a plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    /// The caller's token was allow-listed
    Requested,
    /// The entity's named default order
    Fallback,
    /// The entity's static base order (no explicit fallback)
    Base,
}

/// OR-combined, case-insensitive substring search over several fields
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPredicate {
    term: String,
    needle: String,
    fields: &'static [FieldPath],
}

impl SearchPredicate {
    /// Build a predicate, or `None` when the term is blank
    pub fn new(term: &str, fields: &'static [FieldPath]) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        Some(Self {
            term: term.to_string(),
            needle: term.to_lowercase(),
            fields,
        })
    }

    /// The trimmed search term
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn fields(&self) -> &'static [FieldPath] {
        self.fields
    }

    /// Whether any of the resolved field values contains the term
    pub fn matches_any<'a>(&self, mut values: impl Iterator<Item = &'a FieldValue>) -> bool {
        values.any(|value| value.contains_lowercase(&self.needle))
    }
}

/// A validated, storage-agnostic list query for one entity type
///
/// Pure data: building a plan performs no I/O, and the same plan can be
/// handed to any [`RegistryStore`](crate::core::service::RegistryStore).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub entity: EntityKind,
    pub predicate: Option<SearchPredicate>,
    /// Ascending order keys, most significant first
    pub order: Vec<FieldPath>,
    pub order_source: OrderSource,
    /// Page number (starts at 1)
    pub page: usize,
    pub page_size: usize,
}

impl QueryPlan {
    /// Build a plan from the three raw list inputs
    pub fn build(
        config: &EntityQueryConfig,
        search_term: Option<&str>,
        sort_token: Option<&str>,
        page_number: i64,
    ) -> Self {
        let predicate = search_term.and_then(|term| SearchPredicate::new(term, config.search_fields));
        let (order, order_source) = config.resolve_order(sort_token);
        let page = usize::try_from(page_number.max(1)).unwrap_or(usize::MAX);

        let plan = Self {
            entity: config.entity,
            predicate,
            order: order.to_vec(),
            order_source,
            page,
            page_size: PAGE_SIZE,
        };

        tracing::debug!(
            entity = %plan.entity,
            search = plan.predicate.as_ref().map(|p| p.term()),
            order = ?plan.order,
            order_source = ?plan.order_source,
            page = plan.page,
            "built query plan"
        );

        plan
    }

    /// Build a plan from decoded query-string parameters
    pub fn from_list_query(config: &EntityQueryConfig, query: &ListQuery) -> Self {
        Self::build(
            config,
            query.q.as_deref(),
            query.sort_by.as_deref(),
            query.page_number(),
        )
    }

    /// Number of filtered and ordered records to skip
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}
