pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Product with id 42 not found"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Structured details, e.g. per-field validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Error type returned by every handler.
///
/// Domain errors convert into this through `From` impls in each domain crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query string error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Path error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status code and body this error renders as.
    pub fn to_parts(&self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::Database(e) => map_db_error(e),
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = ErrorCode::JsonExtraction.code(), error = %e, "JSON extraction error");
                (e.status(), ErrorResponse::new(ErrorCode::JsonExtraction, e.body_text()))
            }
            AppError::QueryRejection(e) => {
                tracing::info!(error_code = ErrorCode::InvalidQuery.code(), error = %e, "Query string rejected");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(ErrorCode::InvalidQuery, e.body_text()),
                )
            }
            AppError::PathRejection(e) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), error = %e, "Path rejected");
                (e.status(), ErrorResponse::new(ErrorCode::BadRequest, e.body_text()))
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        ErrorCode::ValidationError,
                        ErrorCode::ValidationError.default_message(),
                    )
                    .with_details(validation_details(e)),
                )
            }
            AppError::InvalidId(raw) => {
                tracing::info!(error_code = ErrorCode::InvalidId.code(), raw = %raw, "Invalid id in path");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(ErrorCode::InvalidId, format!("Invalid id: {raw}")),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(ErrorCode::BadRequest, msg))
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new(ErrorCode::NotFound, msg))
            }
            AppError::UnprocessableEntity(msg) => {
                tracing::info!("Unprocessable entity: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new(ErrorCode::UnprocessableEntity, msg),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::InternalError, ErrorCode::InternalError.default_message()),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();
        (status, Json(body)).into_response()
    }
}

/// Maps a SeaORM error to a response.
///
/// Internal details never reach the client; they are logged instead.
fn map_db_error(error: &DbErr) -> (StatusCode, ErrorResponse) {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::info!(error_code = ErrorCode::Conflict.code(), %detail, "Unique constraint violated");
            return (
                StatusCode::CONFLICT,
                ErrorResponse::new(ErrorCode::Conflict, ErrorCode::Conflict.default_message()),
            );
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::info!(error_code = ErrorCode::UnprocessableEntity.code(), %detail, "Foreign key violated");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(
                    ErrorCode::UnprocessableEntity,
                    "Referenced resource does not exist",
                ),
            );
        }
        _ => {}
    }

    match error {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            tracing::info!(error_code = ErrorCode::NotFound.code(), error = %error, "Database row not found");
            (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::NotFound, ErrorCode::NotFound.default_message()),
            )
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            tracing::error!(error_code = ErrorCode::DatabaseUnavailable.code(), error = %error, "Database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(
                    ErrorCode::DatabaseUnavailable,
                    ErrorCode::DatabaseUnavailable.default_message(),
                ),
            )
        }
        DbErr::Migration(_) => {
            tracing::error!(error_code = ErrorCode::MigrationError.code(), error = %error, "Migration error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(ErrorCode::MigrationError, ErrorCode::MigrationError.default_message()),
            )
        }
        _ => {
            tracing::error!(error_code = ErrorCode::DatabaseError.code(), error = %error, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(ErrorCode::DatabaseError, ErrorCode::DatabaseError.default_message()),
            )
        }
    }
}

/// `{ "field": [{ "code", "message", "params" }] }` for each failing field.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

/// Build a JSON error response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: impl Into<String>, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, body) = AppError::NotFound("Product with id 7 not found".into()).to_parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, 1004);
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.message, "Product with id 7 not found");
    }

    #[test]
    fn test_invalid_id_maps_to_400() {
        let (status, body) = AppError::InvalidId("abc".into()).to_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "INVALID_ID");
        assert!(body.message.contains("abc"));
    }

    #[test]
    fn test_validation_error_carries_field_details() {
        let errors = Sample { name: String::new() }.validate().unwrap_err();
        let (status, body) = AppError::from(errors).to_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "VALIDATION_ERROR");
        let details = body.details.unwrap();
        assert_eq!(details["name"][0]["code"], "length");
    }

    #[test]
    fn test_generic_db_error_is_500_and_hides_details() {
        let (status, body) = AppError::from(DbErr::Custom("relation does not exist".into())).to_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert!(!body.message.contains("relation"));
    }

    #[test]
    fn test_record_not_updated_is_404() {
        let (status, _) = AppError::from(DbErr::RecordNotUpdated).to_parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_error_hides_message() {
        let (status, body) = AppError::InternalServerError("pool poisoned".into()).to_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, ErrorCode::InternalError.default_message());
    }

    #[test]
    fn test_error_response_skips_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new(ErrorCode::Conflict, "dup")).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["code"], 1008);
    }
}
