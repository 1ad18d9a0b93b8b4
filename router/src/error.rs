use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use llm_client::RelayError;

use crate::ErrorResponse;

/// Failures of a `/chat` call, each converted into a status code and an `{"error": ...}` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Relay(RelayError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the caller. Upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(reason) => reason.clone(),
            ApiError::Relay(RelayError::Send(_)) => "Failed to send request to LLM".to_string(),
            ApiError::Relay(RelayError::Status { .. }) => "Error from LLM endpoint".to_string(),
            ApiError::Relay(RelayError::ReadBody(_) | RelayError::Decode(_)) => {
                "Invalid response from LLM endpoint".to_string()
            }
            ApiError::Relay(RelayError::EmptyResponse) => {
                "Invalid response structure from LLM endpoint".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Chat request failed: {} - {}", status, self);
        } else {
            tracing::warn!("Chat request failed: {} - {}", status, self);
        }
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
