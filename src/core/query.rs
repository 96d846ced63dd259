//! List query parameters and pagination utilities

use serde::Serialize;
use std::num::IntErrorKind;

use crate::core::plan::{FieldPath, OrderSource};

/// Every list endpoint pages by this many records
pub const PAGE_SIZE: usize = 5;

/// Query parameters of a list request
///
/// All three parameters are untrusted strings. Nothing here can make the
/// request fail: the page number is parsed leniently and the search term and
/// sort token are interpreted by the plan builder.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_students(
///     Query(pairs): Query<Vec<(String, String)>>,
/// ) -> Json<PaginatedResponse<Record>> {
///     let plan = QueryPlan::from_list_query(&STUDENT, &ListQuery::from_pairs(pairs));
///     // ...
/// }
///
/// // Usage:
/// GET /students?q=mar
/// GET /students?q=mar&sort_by=lastname&page=2
/// GET /members?sort_by=student__program__prog_name
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Free-text search term
    pub q: Option<String>,

    /// Sort token, only honoured when it is allow-listed for the entity
    pub sort_by: Option<String>,

    /// Page number (starts at 1), kept raw so garbage degrades to page 1
    pub page: Option<String>,
}

impl ListQuery {
    pub fn new(q: Option<&str>, sort_by: Option<&str>, page: Option<&str>) -> Self {
        Self {
            q: q.map(str::to_string),
            sort_by: sort_by.map(str::to_string),
            page: page.map(str::to_string),
        }
    }

    /// Collect the list parameters from decoded query-string pairs
    ///
    /// A repeated key keeps its last value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |mut query, (key, value)| {
                match key.as_str() {
                    "q" => query.q = Some(value),
                    "sort_by" => query.sort_by = Some(value),
                    "page" => query.page = Some(value),
                    _ => {}
                }
                query
            })
    }

    /// Requested page number before clamping
    ///
    /// Missing or non-numeric values read as 1. Integers outside `i64`
    /// saturate.
    pub fn page_number(&self) -> i64 {
        let Some(raw) = self.page.as_deref() else {
            return 1;
        };
        match raw.trim().parse::<i64>() {
            Ok(page) => page,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => 1,
            },
        }
    }
}

/// Paginated response structure
///
/// This structure wraps a page of records with metadata about pagination
/// state and the query that was actually applied.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,

    /// Search and order as applied after fallback
    pub query: AppliedQuery,
}

/// Echo of the interpreted list query
#[derive(Debug, Serialize)]
pub struct AppliedQuery {
    pub q: Option<String>,
    pub sort_by: Option<String>,
    pub order: Vec<FieldPath>,
    pub order_source: OrderSource,
}

/// Pagination metadata
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.page_number(), 1);
        assert!(query.q.is_none());
        assert!(query.sort_by.is_none());
    }

    #[test]
    fn test_page_number_parsing_is_lenient() {
        assert_eq!(ListQuery::new(None, None, Some("3")).page_number(), 3);
        assert_eq!(ListQuery::new(None, None, Some(" 2 ")).page_number(), 2);
        assert_eq!(ListQuery::new(None, None, Some("-4")).page_number(), -4);
        assert_eq!(ListQuery::new(None, None, Some("last")).page_number(), 1);
        assert_eq!(ListQuery::new(None, None, Some("")).page_number(), 1);
    }

    #[test]
    fn test_page_number_saturates() {
        let huge = ListQuery::new(None, None, Some("99999999999999999999999"));
        assert_eq!(huge.page_number(), i64::MAX);
        let tiny = ListQuery::new(None, None, Some("-99999999999999999999999"));
        assert_eq!(tiny.page_number(), i64::MIN);
    }

    #[test]
    fn test_from_pairs_last_value_wins() {
        let pairs = [
            ("q", "ana"),
            ("sort_by", "lastname"),
            ("page", "2"),
            ("sort_by", "bogus"),
            ("q", "mar"),
            ("utm_source", "mail"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let query = ListQuery::from_pairs(pairs);
        assert_eq!(query.q.as_deref(), Some("mar"));
        assert_eq!(query.sort_by.as_deref(), Some("bogus"));
        assert_eq!(query.page_number(), 2);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, PAGE_SIZE, 7);
        assert_eq!(meta.total, 7);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_prev);
        assert!(meta.has_next);

        let meta = PaginationMeta::new(2, PAGE_SIZE, 7);
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = PaginationMeta::new(1, PAGE_SIZE, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }
}
