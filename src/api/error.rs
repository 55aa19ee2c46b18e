//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::reshape::ReshapeError;
use crate::source::SourceError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Fetching or parsing the source dataset failed
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Aggregation rejected the request (empty selection)
    #[error("{0}")]
    Reshape(#[from] ReshapeError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Source(e) => match e {
                // The upstream source failed or was unreachable
                SourceError::Fetch { .. } | SourceError::Request(_) => {
                    (StatusCode::BAD_GATEWAY, "FETCH_ERROR")
                }
                SourceError::Parse(_) | SourceError::Csv(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "PARSE_ERROR")
                }
                SourceError::Schema(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SCHEMA_ERROR"),
            },
            // Recoverable: the user picked nothing, ask them to pick
            ApiError::Reshape(ReshapeError::EmptySelection) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_SELECTION")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_maps_to_422() {
        let response = ApiError::Reshape(ReshapeError::EmptySelection).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_fetch_error_maps_to_502() {
        let response = ApiError::Source(SourceError::Fetch { status: 404 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_schema_error_maps_to_500() {
        let response =
            ApiError::Source(SourceError::Schema("Lat".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
