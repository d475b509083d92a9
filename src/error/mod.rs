// Error types for grievance-relay
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    /// The request carried no `image` file field.
    #[error("No image file provided")]
    MissingInput,

    /// The upstream answered with a non-200 status; mirrored to the caller.
    #[error("Upstream returned HTTP {status}")]
    Upstream { status: StatusCode, details: Value },

    /// Catch-all for everything after the field presence check.
    #[error("{0}")]
    Unhandled(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for RelayError {
    fn from(e: image::ImageError) -> Self {
        RelayError::Unhandled(e.to_string())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter
        RelayError::Unhandled(e.without_url().to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        RelayError::Unhandled(e.to_string())
    }
}

impl From<tokio::task::JoinError> for RelayError {
    fn from(e: tokio::task::JoinError) -> Self {
        RelayError::Unhandled(e.to_string())
    }
}

impl From<config::ConfigError> for RelayError {
    fn from(e: config::ConfigError) -> Self {
        RelayError::Config(e.to_string())
    }
}

// Convert RelayError to HTTP responses for Axum
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RelayError::MissingInput => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No image file provided" }),
            ),
            RelayError::Upstream { status, details } => (
                status,
                json!({ "error": "Failed to process image", "details": details }),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "An error occurred", "details": other.to_string() }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
