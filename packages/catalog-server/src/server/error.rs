//! HTTP mapping for the domain error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::common::errors::{DomainError, FieldViolation};

/// Wire shape for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
}

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    /// Malformed request input that never reached the domain layer
    /// (bad uuid in a path, unknown enum value in a body).
    pub fn bad_request(field: &str, message: impl std::fmt::Display) -> Self {
        ApiError(DomainError::parse(field, message.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Parse { .. } => (StatusCode::BAD_REQUEST, "parse_error"),
            DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            DomainError::InvalidTransition { .. } => (StatusCode::CONFLICT, "invalid_transition"),
            DomainError::InvalidState(_) => (StatusCode::CONFLICT, "invalid_state"),
            DomainError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            DomainError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable")
            }
        };

        let violations = self.0.violations().map(<[FieldViolation]>::to_vec);
        let body = ErrorBody {
            error: kind,
            message: self.0.to_string(),
            violations,
        };
        (status, Json(body)).into_response()
    }
}
