//! # Todo API Errors
//!
//! Every failure is turned into a response at the point it happens, with
//! the body `{ "error": <message> }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for todo operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Todo API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path id is not a canonical positive integer
    #[error("Invalid ID parameter")]
    InvalidIdentifier,

    /// Creation body lacks a usable title
    #[error("The \"title\" field is required and must be a non-empty string")]
    MissingOrInvalidTitle,

    /// Update body carries nothing that could be written
    #[error("No valid fields to update provided")]
    NoFieldsToUpdate,

    /// Strict updates only: title present but not a non-empty string
    #[error("The \"title\" field must be a non-empty string")]
    InvalidTitle,

    /// Strict updates only: completed present but not coercible
    #[error("The \"completed\" field must be a boolean")]
    InvalidCompleted,

    /// Targeted todo item does not exist
    #[error("To-do item not found")]
    NotFound,

    /// No route matches the request path
    #[error("Not found")]
    UnknownRoute,

    /// Body exceeds the configured ceiling
    #[error("Request body is too large")]
    PayloadTooLarge,

    /// Body could not be parsed as JSON
    #[error("{0}")]
    MalformedBody(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store reported a failure; carries the store's message
    #[error("{0}")]
    Store(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier
            | ApiError::MissingOrInvalidTitle
            | ApiError::NoFieldsToUpdate
            | ApiError::InvalidTitle
            | ApiError::InvalidCompleted
            | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,

            ApiError::NotFound | ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::MalformedBody(rejection.body_text())
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
