//! Typed error handling for the registry
//!
//! # Error Categories
//!
//! - [`EntityError`]: record lookups and referential integrity (CRUD)
//! - [`ValidationError`]: rejected request payloads and ids
//! - [`StorageError`]: the store failed to execute a query or write
//! - [`ConfigError`]: configuration parsing and loading
//!
//! The query builder itself has no error type: every malformed list input
//! degrades to a documented default. Store failures pass through handlers
//! unchanged and surface as `STORAGE_ERROR`.
//!
//! # Example
//!
//! ```rust,ignore
//! match store.delete(EntityKind::College, id).await {
//!     Ok(()) => {}
//!     Err(RegistryError::Entity(EntityError::InUse { referenced_by, .. })) => {
//!         println!("still used by a {}", referenced_by);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::core::entity::EntityKind;

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// The main error type of the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Entity-related errors (CRUD operations)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RegistryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::Entity(e) => e.status_code(),
            RegistryError::Validation(e) => e.status_code(),
            RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::Entity(e) => e.error_code(),
            RegistryError::Validation(e) => e.error_code(),
            RegistryError::Storage(_) => "STORAGE_ERROR",
            RegistryError::Config(_) => "CONFIG_ERROR",
            RegistryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RegistryError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            RegistryError::Entity(EntityError::MissingReference {
                field,
                target_type,
                id,
                ..
            }) => Some(serde_json::json!({
                "field": field,
                "target_type": target_type,
                "id": id.to_string()
            })),
            RegistryError::Entity(EntityError::InUse { referenced_by, .. }) => {
                Some(serde_json::json!({ "referenced_by": referenced_by }))
            }
            RegistryError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: EntityKind, id: Uuid },

    /// Entity already exists (conflict)
    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: EntityKind, id: Uuid },

    /// A required reference points at a record that does not exist
    #[error("{entity_type}.{field} references missing {target_type} '{id}'")]
    MissingReference {
        entity_type: EntityKind,
        field: &'static str,
        target_type: EntityKind,
        id: Uuid,
    },

    /// Entity is still referenced and cannot be deleted
    #[error("{entity_type} with id '{id}' is still referenced by a {referenced_by}")]
    InUse {
        entity_type: EntityKind,
        id: Uuid,
        referenced_by: EntityKind,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
            EntityError::MissingReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            EntityError::InUse { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::MissingReference { .. } => "MISSING_REFERENCE",
            EntityError::InUse { .. } => "ENTITY_IN_USE",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON body
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Invalid UUID format
    #[error("Invalid UUID format: {value}")]
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::InvalidJson { .. } => StatusCode::BAD_REQUEST,
            ValidationError::InvalidUuid { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidUuid { .. } => "INVALID_UUID",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for RegistryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RegistryError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query execution failed
    #[error("query execution failed: {message}")]
    QueryFailed { message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration file exists but could not be read
    #[error("Failed to read config file '{path}': {message}")]
    ReadError { path: String, message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found_returns_404() {
        let err = RegistryError::from(EntityError::NotFound {
            entity_type: EntityKind::Student,
            id: Uuid::nil(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
        assert_eq!(
            err.to_string(),
            "student with id '00000000-0000-0000-0000-000000000000' not found"
        );
    }

    #[test]
    fn test_in_use_returns_409() {
        let err = RegistryError::from(EntityError::InUse {
            entity_type: EntityKind::College,
            id: Uuid::nil(),
            referenced_by: EntityKind::Program,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let response = err.to_response();
        assert_eq!(response.code, "ENTITY_IN_USE");
        assert_eq!(
            response.details,
            Some(serde_json::json!({ "referenced_by": "program" }))
        );
    }

    #[test]
    fn test_missing_reference_returns_422() {
        let err = RegistryError::from(EntityError::MissingReference {
            entity_type: EntityKind::Program,
            field: "college",
            target_type: EntityKind::College,
            id: Uuid::nil(),
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "MISSING_REFERENCE");
    }

    #[test]
    fn test_storage_error_is_500_and_keeps_message() {
        let err = RegistryError::from(StorageError::QueryFailed {
            message: "lock poisoned".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert_eq!(err.to_string(), "query execution failed: lock poisoned");
    }

    #[test]
    fn test_field_errors_display() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "college_name".to_string(),
                message: "length".to_string(),
            },
            FieldValidationError {
                field: "prog_name".to_string(),
                message: "required".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation errors: college_name: length, prog_name: required"
        );
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_config_parse_error_display() {
        let err = ConfigError::ParseError {
            file: Some("registry.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse config file 'registry.yaml': bad indent"
        );
        let err = ConfigError::ParseError {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse config: bad indent");
    }
}
