//! Route descriptor shared by every registry entity

use axum::{Router, routing::get};
use std::marker::PhantomData;

use crate::core::entity::{Entity, EntityKind};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::handlers::{
    RegistryState, create_record, delete_record, get_record, list_records, update_record,
};

/// Descriptor wiring the generic CRUD handlers for `E`
pub struct RecordDescriptor<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> RecordDescriptor<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Default for RecordDescriptor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityDescriptor for RecordDescriptor<E> {
    fn kind(&self) -> EntityKind {
        E::KIND
    }

    fn build_routes(&self) -> Router<RegistryState> {
        let collection = format!("/{}", self.plural());
        let item = format!("/{}/{{id}}", self.plural());

        Router::new()
            .route(&collection, get(list_records::<E>).post(create_record::<E>))
            .route(
                &item,
                get(get_record::<E>)
                    .put(update_record::<E>)
                    .delete(delete_record::<E>),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{OrgMember, Student};

    #[test]
    fn test_descriptor_paths() {
        assert_eq!(RecordDescriptor::<Student>::new().plural(), "students");
        assert_eq!(RecordDescriptor::<OrgMember>::new().kind(), EntityKind::OrgMember);
        assert_eq!(RecordDescriptor::<OrgMember>::new().plural(), "members");
    }
}
