//! Error type for the HTTP layer.
//!
//! [`ApiError`] maps engine and request failures onto status codes and a
//! JSON `{error, status}` body via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::SimError;

/// Errors that can occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The engine rejected the request.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// The request body was not valid JSON of the expected shape.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The shared clock could not be locked.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Message returned for any rejected storm override.
pub const INTENSITY_MESSAGE: &str = "Intensity must be a number between 0 and 1";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Sim(SimError::InvalidIntensity(_)) => {
                (StatusCode::BAD_REQUEST, INTENSITY_MESSAGE.to_string())
            }
            Self::Sim(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
