//! Demo data so a fresh server has something to list

use chrono::{Datelike, Local, NaiveDate};

use crate::core::entity::Entity;
use crate::core::error::{RegistryError, Result};
use crate::core::service::RegistryStore;
use crate::entities::{College, OrgMember, Organization, Program, Student};

const COLLEGES: &[&str] = &[
    "College of Computing Studies",
    "College of Arts and Sciences",
];

/// (program name, index into COLLEGES)
const PROGRAMS: &[(&str, usize)] = &[
    ("BS Computer Science", 0),
    ("BS Information Technology", 0),
    ("BS Biology", 1),
    ("BA Communication", 1),
];

/// (student id, last, first, middle, index into PROGRAMS)
const STUDENTS: &[(&str, &str, &str, &str, usize)] = &[
    ("2022-0001", "Cruz", "Maria", "Santos", 0),
    ("2022-0002", "Reyes", "Jose", "", 1),
    ("2023-0003", "Lim", "Paolo", "Marco", 2),
    ("2023-0004", "Tan", "Ana", "Dela", 3),
    ("2024-0005", "Garcia", "Lea", "", 0),
    ("2024-0006", "Santos", "Mark", "Ramos", 2),
];

/// (name, description, index into COLLEGES)
const ORGANIZATIONS: &[(&str, &str, usize)] = &[
    ("Computing Society", "Programming contests and workshops", 0),
    ("Chess Club", "", 0),
    ("Debate Society", "Parliamentary debate", 1),
    ("Biology Circle", "Field trips and lab talks", 1),
];

/// (student, organization, joined this year)
const MEMBERSHIPS: &[(usize, usize, bool)] = &[
    (0, 0, true),
    (0, 1, true),
    (1, 0, false),
    (2, 3, true),
    (3, 2, false),
    (5, 3, false),
];

async fn add<E: Entity>(store: &dyn RegistryStore, entity: E) -> Result<E> {
    store.insert(entity.clone().into_record()).await?;
    Ok(entity)
}

fn january(year: i32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, day)
        .ok_or_else(|| RegistryError::Internal(format!("invalid seed date {}-01-{}", year, day)))
}

/// Populate an empty store with a small registry
///
/// Half of the memberships are dated in the current year so the dashboard
/// shows something.
pub async fn seed_demo_data(store: &dyn RegistryStore) -> Result<()> {
    let mut colleges = Vec::with_capacity(COLLEGES.len());
    for name in COLLEGES {
        colleges.push(add(store, College::new(*name)).await?);
    }

    let mut programs = Vec::with_capacity(PROGRAMS.len());
    for (name, college) in PROGRAMS {
        programs.push(add(store, Program::new(*name, colleges[*college].id)).await?);
    }

    let mut students = Vec::with_capacity(STUDENTS.len());
    for (student_id, last, first, middle, program) in STUDENTS {
        let student = Student::new(*student_id, *last, *first, *middle, programs[*program].id);
        students.push(add(store, student).await?);
    }

    let mut organizations = Vec::with_capacity(ORGANIZATIONS.len());
    for (name, description, college) in ORGANIZATIONS {
        let org = Organization::new(*name, *description, colleges[*college].id);
        organizations.push(add(store, org).await?);
    }

    let year = Local::now().year();
    for (n, (student, org, this_year)) in MEMBERSHIPS.iter().enumerate() {
        let joined = january(if *this_year { year } else { year - 1 }, n as u32 + 1)?;
        let member = OrgMember::new(students[*student].id, organizations[*org].id, joined);
        add(store, member).await?;
    }

    tracing::info!(
        colleges = colleges.len(),
        programs = programs.len(),
        students = students.len(),
        organizations = organizations.len(),
        memberships = MEMBERSHIPS.len(),
        "seeded demo data"
    );
    Ok(())
}
