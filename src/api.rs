// HTTP client for the Nexaur backend.
//
// The backend exposes four endpoints: `GET /health`, `POST /chat`,
// `GET /properties`, and `POST /host`. All four are fallible; callers
// convert failures into UI state per component policy, so every method
// returns a typed `ApiError` and nothing here panics or retries.
//
// The base URL is injected at construction (env override > config file
// > local default, resolved in `config`); no request site reads a
// global.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::chat::ChatMessage;
use crate::hosting::HostSubmission;
use crate::listings::PropertyRecord;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        source: reqwest::Error,
    },
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct HealthResponse {
    model_loaded: bool,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
    max_length: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct PropertiesResponse {
    properties: Vec<PropertyRecord>,
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Client for the backend HTTP API with an explicitly injected base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Build)?;
        Ok(ApiClient {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health` — returns whether the backend reports its model
    /// as loaded.
    pub async fn health(&self) -> Result<bool, ApiError> {
        const ENDPOINT: &str = "/health";
        let response = self
            .http
            .get(self.url(ENDPOINT))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: ENDPOINT,
                status,
            });
        }

        let body: HealthResponse =
            response.json().await.map_err(|source| ApiError::Decode {
                endpoint: ENDPOINT,
                source,
            })?;
        debug!(model_loaded = body.model_loaded, "health probe resolved");
        Ok(body.model_loaded)
    }

    /// `POST /chat` — sends the full conversation history plus the
    /// generation-length parameter, returns the assistant reply text.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        max_length: u32,
    ) -> Result<String, ApiError> {
        const ENDPOINT: &str = "/chat";
        let request = ChatRequest {
            messages,
            max_length,
        };

        let response = self
            .http
            .post(self.url(ENDPOINT))
            .json(&request)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: ENDPOINT,
                status,
            });
        }

        let body: ChatResponse =
            response.json().await.map_err(|source| ApiError::Decode {
                endpoint: ENDPOINT,
                source,
            })?;
        Ok(body.response)
    }

    /// `GET /properties` — fetches the full listing collection.
    pub async fn properties(&self) -> Result<Vec<PropertyRecord>, ApiError> {
        const ENDPOINT: &str = "/properties";
        let response = self
            .http
            .get(self.url(ENDPOINT))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: ENDPOINT,
                status,
            });
        }

        let body: PropertiesResponse =
            response.json().await.map_err(|source| ApiError::Decode {
                endpoint: ENDPOINT,
                source,
            })?;
        Ok(body.properties)
    }

    /// `POST /host` — submits a new listing. The success payload is
    /// arbitrary and ignored; only the status matters.
    pub async fn host(&self, submission: &HostSubmission) -> Result<(), ApiError> {
        const ENDPOINT: &str = "/host";
        let response = self
            .http
            .post(self.url(ENDPOINT))
            .json(submission)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: ENDPOINT,
                status,
            });
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
