//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use careops_domain::error::{CareOpsError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CareOpsError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(CareOpsError);

impl From<CareOpsError> for ApiError {
    fn from(err: CareOpsError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CareOpsError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            CareOpsError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            CareOpsError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            CareOpsError::Delivery(err) => {
                tracing::error!(error = %err, "delivery error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
