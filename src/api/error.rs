//! HTTP error mapping for API handlers

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::domain::{DomainError, ValidationErrors};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid model object: {0}")]
    Invalid(ValidationErrors),
    #[error("The HTTP resource does not support the API version '{0}'")]
    UnsupportedApiVersion(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            DomainError::Database(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid model object", "details": errors }),
            ),
            ApiError::UnsupportedApiVersion(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "UnsupportedApiVersion", "message": self.to_string() }),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error while handling request: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
