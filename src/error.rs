// Custom error types and conversions
// This keeps error responses consistent across the Axum handlers

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    // Request was understood but its values are unusable
    #[error(transparent)]
    Validation(#[from] ValidationError),
    // Axum could not bind the query string or body (missing field, bad enum, bad JSON)
    #[error("{0}")]
    Rejection(String),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejection(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejection(rejection.body_text())
    }
}

// Every AppError is a client error; nothing inside the search core can fail at runtime
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::warn!("Rejected request: {}", message);
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        let response = AppError::from(ValidationError::EmptyBatch).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_messages_pass_through() {
        let error = AppError::from(ValidationError::NonPositive { field: "pageSize" });
        assert_eq!(error.to_string(), "pageSize must be greater than zero");

        let error = AppError::Rejection("missing field `regionID`".to_string());
        assert_eq!(error.to_string(), "missing field `regionID`");
    }
}
