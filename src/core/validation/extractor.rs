//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that filters,
//! deserializes and validates request bodies before they reach handlers.

use super::filters;
use crate::core::error::{RegistryError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// Axum extractor that validates and filters a JSON payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_college(
///     Validated(input): Validated<CollegeInput>,
/// ) -> Result<Json<College>, RegistryError> {
///     // input is already trimmed and validated
/// }
/// ```
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = RegistryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            ValidationError::InvalidJson {
                message: e.body_text(),
            }
        })?;

        let payload = filters::apply_to_fields(payload, filters::trim());

        let input: T = serde_json::from_value(payload).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;

        input.validate()?;

        Ok(Validated(input))
    }
}
