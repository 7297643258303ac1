//! HTTP error responses
//!
//! Every failure is returned as `{"error": "<message>"}` with a status that
//! tells the client whether retrying the same request can help.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::routing::RouteError;
use crate::snapshot::ReadFailure;

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// An error response with its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: message.into(),
            },
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create an internal error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn message(&self) -> &str {
        &self.body.error
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl From<ReadFailure> for ApiError {
    fn from(err: ReadFailure) -> Self {
        Self::internal(format!("Error reading snapshot: {}", err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_client_route_errors_are_400() {
        let err: ApiError = RouteError::UnknownStrategy {
            strategy: "fastest".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Unknown strategy: fastest");

        let err: ApiError = RouteError::InvalidEndpoint {
            source_node: "A".to_string(),
            target_node: "Z".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid source or target");
    }

    #[test]
    fn test_snapshot_errors_are_500() {
        let err: ApiError =
            RouteError::Snapshot(ReadFailure::NotFound(PathBuf::from("/x.json"))).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Error reading snapshot"));
    }

    #[test]
    fn test_error_body_shape() {
        let json = serde_json::to_value(ApiError::bad_request("bad").body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "bad"}));
    }
}
