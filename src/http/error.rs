//! HTTP error responses.
//!
//! Every failure is rendered as `{"error": "<message>"}`. Storage and startup
//! failures are logged in full and answered with a generic message.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::types::ErrorResponse;
use crate::error::Error;

/// Error type returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request (400).
    #[error("{0}")]
    BadRequest(String),

    /// Unknown item or no search match (404).
    #[error("{0}")]
    NotFound(String),

    /// Upload larger than the configured limit (413).
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Anything the caller cannot fix (500). Never shown to the client.
    #[error("{0:#}")]
    Internal(anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Internal(source) => {
                tracing::error!(error = %format!("{source:#}"), "Request failed");
                "Internal server error".to_string()
            },
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        let status = err.status_code();
        if status < 500 {
            tracing::debug!(status, error = %err, "Request rejected");
        }

        match err {
            Error::InvalidArgument(reason) => Self::BadRequest(reason),
            Error::NotFound(what) => Self::NotFound(what),
            Error::Storage(source) | Error::Startup(source) => Self::Internal(source),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(err.body_text())
        } else {
            Self::BadRequest(err.body_text())
        }
    }
}
