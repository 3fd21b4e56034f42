//! Error taxonomy shared by the generator, the search engine, and the HTTP layer.
//!
//! Validation failures carry enough detail for the caller to fix the request.
//! [`BabelError::Internal`] is logged in full but rendered as a generic message.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BabelError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("unknown search mode: {0}")]
    InvalidMode(String),

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("invalid result limit: {0}")]
    InvalidLimit(String),

    /// Request body that is not the expected JSON shape.
    #[error("malformed request: {0}")]
    InvalidRequest(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("vocabulary error: {0}")]
    Vocabulary(String),

    /// The enhanced-mode collaborator failed. `SearchService` recovers from
    /// this by falling back to procedural search, so its 502 mapping is not
    /// reached from the HTTP API.
    #[error("external search unavailable: {0}")]
    Upstream(String),

    #[error("rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, BabelError>;

impl BabelError {
    /// Short machine-readable name used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "invalid_query",
            Self::InvalidMode(_) => "invalid_mode",
            Self::InvalidCoordinate(_) => "invalid_coordinate",
            Self::InvalidLimit(_) => "invalid_limit",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Template(_) => "template",
            Self::Vocabulary(_) => "vocabulary",
            Self::Upstream(_) => "upstream",
            Self::RateLimited { .. } => "rate_limited",
            Self::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuery(_)
            | Self::InvalidMode(_)
            | Self::InvalidCoordinate(_)
            | Self::InvalidLimit(_)
            | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Template(_) | Self::Vocabulary(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for BabelError {
    fn from(err: reqwest::Error) -> Self {
        BabelError::Upstream(err.to_string())
    }
}

impl From<tokio::task::JoinError> for BabelError {
    fn from(err: tokio::task::JoinError) -> Self {
        BabelError::Internal(format!("worker task failed: {err}"))
    }
}

impl IntoResponse for BabelError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "kind": self.kind(),
                "message": message,
            }
        }));

        let mut response = (status, body).into_response();
        if let Self::RateLimited { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
