use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors. Every body carries a `success` flag; validation
/// failures return a field-to-message map so callers can render per-field
/// feedback.
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(BTreeMap<String, String>),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Internal(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(errors) => write!(f, "Validation error: {} field(s)", errors.len()),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::Internal(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::InvalidReference(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "success": false,
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg))
            | Self::Storage(StorageError::InvalidReference(msg)) => {
                json!({
                    "success": false,
                    "error": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "success": false,
                    "error": "Database error occurred"
                })
            }
            Self::Validation(errors) => {
                json!({
                    "success": false,
                    "errors": errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "success": false,
                    "error": msg
                })
            }
            Self::Unauthorized(msg) => {
                tracing::warn!("Authentication failure: {}", msg);
                json!({
                    "success": false,
                    "error": msg
                })
            }
            Self::Forbidden(msg) => {
                json!({
                    "success": false,
                    "error": msg
                })
            }
            Self::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                json!({
                    "success": false,
                    "error": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(validation_map(&errors))
    }
}

/// Flatten validator output to one message per field.
pub fn validation_map(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 1, max = 100, message = "Points must be between 1 and 100"))]
        points: i32,
    }

    #[test]
    fn validation_map_keeps_field_names_and_messages() {
        let err = Probe { points: 0 }.validate().unwrap_err();
        let map = validation_map(&err);
        assert_eq!(
            map.get("points").map(String::as_str),
            Some("Points must be between 1 and 100")
        );
    }

    #[test]
    fn in_range_values_produce_no_errors() {
        assert!(Probe { points: 1 }.validate().is_ok());
        assert!(Probe { points: 100 }.validate().is_ok());
        assert!(Probe { points: 101 }.validate().is_err());
    }
}
