//! Dashboard counters for the home view

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::core::entity::EntityKind;
use crate::core::error::Result;
use crate::core::service::RegistryStore;

/// The four summary counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub total_students: usize,
    /// Distinct students with a membership dated in the current year
    pub students_joined_this_year: usize,
    pub total_organizations: usize,
    pub total_programs: usize,
}

/// Count distinct students who joined any organization in `year`
pub fn students_joined_in_year(memberships: &[(Uuid, NaiveDate)], year: i32) -> usize {
    memberships
        .iter()
        .filter(|(_, joined)| joined.year() == year)
        .map(|(student, _)| student)
        .collect::<HashSet<_>>()
        .len()
}

/// Compute the counters against the local calendar year at call time
pub async fn compute_dashboard(store: &dyn RegistryStore) -> Result<DashboardCounts> {
    compute_dashboard_for_year(store, Local::now().year()).await
}

/// Compute the counters against an explicit reference year
pub async fn compute_dashboard_for_year(
    store: &dyn RegistryStore,
    year: i32,
) -> Result<DashboardCounts> {
    let memberships = store.membership_dates().await?;

    let counts = DashboardCounts {
        total_students: store.count(EntityKind::Student).await?,
        students_joined_this_year: students_joined_in_year(&memberships, year),
        total_organizations: store.count(EntityKind::Organization).await?,
        total_programs: store.count(EntityKind::Program).await?,
    };

    tracing::debug!(year, ?counts, "computed dashboard");
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_student_counted_once_per_year() {
        let student = Uuid::new_v4();
        let memberships = vec![
            (student, date(2025, 1, 10)),
            (student, date(2025, 6, 1)),
            (student, date(2025, 12, 31)),
        ];
        assert_eq!(students_joined_in_year(&memberships, 2025), 1);
    }

    #[test]
    fn test_other_years_excluded() {
        let memberships = vec![
            (Uuid::new_v4(), date(2024, 12, 31)),
            (Uuid::new_v4(), date(2025, 1, 1)),
            (Uuid::new_v4(), date(2026, 1, 1)),
        ];
        assert_eq!(students_joined_in_year(&memberships, 2025), 1);
    }

    #[test]
    fn test_empty_memberships() {
        assert_eq!(students_joined_in_year(&[], 2025), 0);
    }
}
