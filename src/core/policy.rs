//! Per-entity search, sort and fallback configuration
//!
//! Sort tokens are the wire tokens list pages send in `sort_by`; a double
//! underscore separates relation hops (`student__program__prog_name`).

use crate::core::entity::EntityKind;
use crate::core::plan::{EntityQueryConfig, FieldPath, SortOption};

pub static ORGANIZATION: EntityQueryConfig = EntityQueryConfig {
    entity: EntityKind::Organization,
    search_fields: &[FieldPath(&["name"]), FieldPath(&["description"])],
    sort_options: &[
        SortOption {
            token: "college__college_name",
            paths: &[FieldPath(&["college", "college_name"])],
        },
        SortOption {
            token: "name",
            paths: &[FieldPath(&["name"])],
        },
    ],
    default_order: &[FieldPath(&["college", "college_name"]), FieldPath(&["name"])],
    has_explicit_fallback: true,
    base_order: &[FieldPath(&["college", "college_name"]), FieldPath(&["name"])],
};

pub static ORG_MEMBER: EntityQueryConfig = EntityQueryConfig {
    entity: EntityKind::OrgMember,
    search_fields: &[
        FieldPath(&["student", "firstname"]),
        FieldPath(&["student", "lastname"]),
        FieldPath(&["student", "middlename"]),
        FieldPath(&["organization", "name"]),
        FieldPath(&["student", "program", "prog_name"]),
    ],
    sort_options: &[
        SortOption {
            token: "student__firstname",
            paths: &[FieldPath(&["student", "firstname"])],
        },
        SortOption {
            token: "student__program__prog_name",
            paths: &[FieldPath(&["student", "program", "prog_name"])],
        },
        SortOption {
            token: "organization__name",
            paths: &[FieldPath(&["organization", "name"])],
        },
        SortOption {
            token: "date_joined",
            paths: &[FieldPath(&["date_joined"])],
        },
    ],
    default_order: &[FieldPath(&["student", "firstname"])],
    has_explicit_fallback: true,
    base_order: &[],
};

pub static STUDENT: EntityQueryConfig = EntityQueryConfig {
    entity: EntityKind::Student,
    search_fields: &[
        FieldPath(&["student_id"]),
        FieldPath(&["lastname"]),
        FieldPath(&["firstname"]),
        FieldPath(&["middlename"]),
        FieldPath(&["program", "prog_name"]),
    ],
    sort_options: &[
        SortOption {
            token: "student_id",
            paths: &[FieldPath(&["student_id"])],
        },
        SortOption {
            token: "lastname",
            paths: &[FieldPath(&["lastname"])],
        },
        SortOption {
            token: "firstname",
            paths: &[FieldPath(&["firstname"])],
        },
        SortOption {
            token: "middlename",
            paths: &[FieldPath(&["middlename"])],
        },
        SortOption {
            token: "program__prog_name",
            paths: &[FieldPath(&["program", "prog_name"])],
        },
    ],
    default_order: &[FieldPath(&["student_id"])],
    has_explicit_fallback: true,
    base_order: &[],
};

pub static COLLEGE: EntityQueryConfig = EntityQueryConfig {
    entity: EntityKind::College,
    search_fields: &[FieldPath(&["college_name"])],
    sort_options: &[
        SortOption {
            token: "college_name",
            paths: &[FieldPath(&["college_name"])],
        },
        SortOption {
            token: "created_at",
            paths: &[FieldPath(&["created_at"])],
        },
        SortOption {
            token: "updated_at",
            paths: &[FieldPath(&["updated_at"])],
        },
    ],
    default_order: &[FieldPath(&["college_name"])],
    has_explicit_fallback: true,
    base_order: &[],
};

// Program never names a fallback: a valid token replaces the static
// prog_name ordering, anything else leaves it in place.
pub static PROGRAM: EntityQueryConfig = EntityQueryConfig {
    entity: EntityKind::Program,
    search_fields: &[FieldPath(&["prog_name"]), FieldPath(&["college", "college_name"])],
    sort_options: &[
        SortOption {
            token: "prog_name",
            paths: &[FieldPath(&["prog_name"])],
        },
        SortOption {
            token: "college__college_name",
            paths: &[FieldPath(&["college", "college_name"])],
        },
    ],
    default_order: &[],
    has_explicit_fallback: false,
    base_order: &[FieldPath(&["prog_name"])],
};

/// Look up the query configuration of an entity type
pub fn query_config(kind: EntityKind) -> &'static EntityQueryConfig {
    match kind {
        EntityKind::Organization => &ORGANIZATION,
        EntityKind::OrgMember => &ORG_MEMBER,
        EntityKind::Student => &STUDENT,
        EntityKind::College => &COLLEGE,
        EntityKind::Program => &PROGRAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_entity_tags_match() {
        for kind in EntityKind::ALL {
            assert_eq!(query_config(kind).entity, kind);
        }
    }

    #[test]
    fn test_only_program_lacks_explicit_fallback() {
        for kind in EntityKind::ALL {
            let config = query_config(kind);
            assert_eq!(config.has_explicit_fallback, kind != EntityKind::Program);
            if config.has_explicit_fallback {
                assert!(!config.default_order.is_empty());
            } else {
                assert!(!config.base_order.is_empty());
            }
        }
    }

    #[test]
    fn test_allow_lists() {
        assert_eq!(ORGANIZATION.sort_tokens(), vec!["college__college_name", "name"]);
        assert_eq!(
            ORG_MEMBER.sort_tokens(),
            vec![
                "student__firstname",
                "student__program__prog_name",
                "organization__name",
                "date_joined"
            ]
        );
        assert_eq!(
            STUDENT.sort_tokens(),
            vec!["student_id", "lastname", "firstname", "middlename", "program__prog_name"]
        );
        assert_eq!(COLLEGE.sort_tokens(), vec!["college_name", "created_at", "updated_at"]);
        assert_eq!(PROGRAM.sort_tokens(), vec!["prog_name", "college__college_name"]);
    }

    #[test]
    fn test_tokens_mirror_their_paths() {
        for kind in EntityKind::ALL {
            for option in query_config(kind).sort_options {
                let joined = option.paths[0].steps().join("__");
                assert_eq!(option.token, joined);
            }
        }
    }

    #[test]
    fn test_search_paths_hop_at_most_twice() {
        for kind in EntityKind::ALL {
            for path in query_config(kind).search_fields {
                assert!(path.hops() <= 2, "{kind}: {path}");
            }
        }
    }
}
