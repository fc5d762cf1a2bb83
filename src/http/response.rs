//! Error mapping and JSON body handling.
//!
//! # Responsibilities
//! - Map validation, not-found and store failures to HTTP status codes
//! - Render every failure as `{"message": ...}`
//! - Decode JSON bodies so malformed input is reported the same way
//!
//! # Design Decisions
//! - Messages are passed through unmodified; nothing is recovered locally

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Message returned when an id matches no task.
pub const TASK_NOT_FOUND: &str = "Task not found";

/// Confirmation returned by a successful delete.
pub const TASK_DELETED: &str = "Task deleted successfully";

/// `{"message": ...}` body used for errors and confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of an API operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid input.
    #[error("{0}")]
    BadRequest(String),

    /// Body exceeded the configured size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// No task (or route) matches.
    #[error("{0}")]
    NotFound(String),

    /// The path exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request outlived the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The store cannot serve requests at all.
    #[error("{0}")]
    Unavailable(String),

    /// The store failed while serving the request.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn task_not_found() -> Self {
        ApiError::NotFound(TASK_NOT_FOUND.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used for the request counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_)
            | ApiError::PayloadTooLarge(_)
            | ApiError::MethodNotAllowed => "invalid",
            ApiError::Timeout => "timeout",
            ApiError::NotFound(_) => "not_found",
            ApiError::Unavailable(_) | ApiError::Internal(_) => "error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_validation() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        (status, Json(Message::new(self.to_string()))).into_response()
    }
}

/// Replace the empty 408 produced by the timeout layer with a `{message}` body.
pub async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.into_response();
    }
    response
}

/// `Json` extractor whose rejections become `{"message"}` 400 responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
