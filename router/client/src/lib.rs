mod models;

pub use models::{Choice, ChoiceMessage, UpstreamMessage, UpstreamPayload, UpstreamResponse};
pub use reqwest::Url;

use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::fmt::Debug;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("bearer token is not a valid header value")]
    InvalidToken(#[source] InvalidHeaderValue),
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Ways a single relay call can fail. Every variant is terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("failed to send request to LLM endpoint: {0}")]
    Send(#[source] reqwest::Error),
    #[error("LLM endpoint returned status {status}")]
    Status { status: u16, body: String },
    #[error("failed to read LLM response body: {0}")]
    ReadBody(#[source] reqwest::Error),
    #[error("failed to decode LLM response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("LLM response has no content in its first choice")]
    EmptyResponse,
}

#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub token: String,
    /// Unset means the outbound call may wait indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: Url, token: impl Into<String>) -> Self {
        Self {
            endpoint,
            token: token.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
}

impl Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(ClientError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Build)?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `message` as a single user turn and returns the first choice's content.
    #[instrument(skip_all)]
    pub async fn generate_reply(&self, message: &str) -> Result<String, RelayError> {
        let payload = UpstreamPayload::user(message);
        if let Ok(encoded) = serde_json::to_string(&payload) {
            tracing::info!("Payload: {}", encoded);
        }

        tracing::info!("Sending request to LLM endpoint: {}", self.endpoint);
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to LLM: {:?}", e);
                RelayError::Send(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "HTTP error occurred. Status: {}, Body: {}",
                status.as_u16(),
                body
            );
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("Received response from LLM");

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response: {:?}", e);
            if e.is_timeout() {
                RelayError::Send(e)
            } else {
                RelayError::ReadBody(e)
            }
        })?;
        let decoded: UpstreamResponse = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("Failed to decode response: {}", e);
            RelayError::Decode(e)
        })?;

        decoded.into_reply().ok_or_else(|| {
            tracing::error!("Invalid response structure from LLM");
            RelayError::EmptyResponse
        })
    }
}
