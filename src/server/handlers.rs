//! HTTP handlers for registry records
//!
//! Every handler is generic over the entity type; the entity's query policy
//! and payload type come from its [`Entity`] implementation.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::dashboard::{DashboardCounts, compute_dashboard};
use crate::core::entity::{Entity, EntityKind};
use crate::core::error::{EntityError, RegistryError, ValidationError};
use crate::core::plan::{OrderSource, QueryPlan};
use crate::core::policy::query_config;
use crate::core::query::{AppliedQuery, ListQuery, PaginatedResponse, PaginationMeta};
use crate::core::service::RegistryStore;
use crate::core::validation::Validated;

/// Application state shared across handlers
#[derive(Clone)]
pub struct RegistryState {
    pub store: Arc<dyn RegistryStore>,
}

fn parse_id(raw: &str) -> Result<Uuid, RegistryError> {
    Uuid::parse_str(raw).map_err(|_| {
        ValidationError::InvalidUuid {
            value: raw.to_string(),
        }
        .into()
    })
}

/// Log a failed store call; storage faults are warnings, rejections are not
fn report(operation: &'static str, kind: EntityKind) -> impl Fn(&RegistryError) {
    move |error: &RegistryError| match error {
        RegistryError::Storage(_) | RegistryError::Internal(_) => {
            tracing::warn!(entity = %kind, operation, %error, "store call failed")
        }
        _ => tracing::debug!(entity = %kind, operation, %error, "request rejected"),
    }
}

async fn load<E: Entity>(store: &dyn RegistryStore, id: Uuid) -> Result<E, RegistryError> {
    store
        .get(E::KIND, id)
        .await
        .inspect_err(report("get", E::KIND))?
        .and_then(E::from_record)
        .ok_or_else(|| {
            EntityError::NotFound {
                entity_type: E::KIND,
                id,
            }
            .into()
        })
}

/// GET /{plural}?q=&sort_by=&page=
///
/// Never fails on bad parameters: blank searches are ignored, unknown sort
/// tokens fall back to the entity's default order, bad pages read as 1 and a
/// repeated key keeps its last value.
pub async fn list_records<E: Entity>(
    State(state): State<RegistryState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PaginatedResponse<E>>, RegistryError> {
    let query = ListQuery::from_pairs(pairs);
    let plan = QueryPlan::from_list_query(query_config(E::KIND), &query);
    let page = state
        .store
        .execute(&plan)
        .await
        .inspect_err(report("list", E::KIND))?;

    let sort_by = match plan.order_source {
        OrderSource::Requested => query.sort_by,
        OrderSource::Fallback | OrderSource::Base => None,
    };

    Ok(Json(PaginatedResponse {
        data: page.items.into_iter().filter_map(E::from_record).collect(),
        pagination: PaginationMeta::new(plan.page, plan.page_size, page.total),
        query: AppliedQuery {
            q: plan.predicate.as_ref().map(|p| p.term().to_string()),
            sort_by,
            order: plan.order,
            order_source: plan.order_source,
        },
    }))
}

/// GET /{plural}/{id}
pub async fn get_record<E: Entity>(
    State(state): State<RegistryState>,
    Path(id): Path<String>,
) -> Result<Json<E>, RegistryError> {
    let id = parse_id(&id)?;
    Ok(Json(load::<E>(state.store.as_ref(), id).await?))
}

/// POST /{plural}
pub async fn create_record<E: Entity>(
    State(state): State<RegistryState>,
    Validated(input): Validated<E::Input>,
) -> Result<(StatusCode, Json<E>), RegistryError> {
    let entity = E::from_input(input);
    state
        .store
        .insert(entity.clone().into_record())
        .await
        .inspect_err(report("create", E::KIND))?;

    tracing::info!(entity = %E::KIND, id = %entity.id(), "created record");
    Ok((StatusCode::CREATED, Json(entity)))
}

/// PUT /{plural}/{id}
pub async fn update_record<E: Entity>(
    State(state): State<RegistryState>,
    Path(id): Path<String>,
    Validated(input): Validated<E::Input>,
) -> Result<Json<E>, RegistryError> {
    let id = parse_id(&id)?;
    let mut entity = load::<E>(state.store.as_ref(), id).await?;
    entity.apply_input(input);

    state
        .store
        .update(entity.clone().into_record())
        .await
        .inspect_err(report("update", E::KIND))?;

    tracing::info!(entity = %E::KIND, %id, "updated record");
    Ok(Json(entity))
}

/// DELETE /{plural}/{id}
pub async fn delete_record<E: Entity>(
    State(state): State<RegistryState>,
    Path(id): Path<String>,
) -> Result<StatusCode, RegistryError> {
    let id = parse_id(&id)?;
    state
        .store
        .delete(E::KIND, id)
        .await
        .inspect_err(report("delete", E::KIND))?;

    tracing::info!(entity = %E::KIND, %id, "deleted record");
    Ok(StatusCode::NO_CONTENT)
}

/// GET / and GET /dashboard
pub async fn dashboard(
    State(state): State<RegistryState>,
) -> Result<Json<DashboardCounts>, RegistryError> {
    let counts = compute_dashboard(state.store.as_ref())
        .await
        .inspect_err(|error| tracing::warn!(%error, "dashboard query failed"))?;
    Ok(Json(counts))
}
