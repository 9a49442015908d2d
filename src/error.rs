//! Error types for respace.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors raised while talking to the generation service.
///
/// These never reach the HTTP client: the design service turns every variant
/// into the same soft fallback and only uses [`GenerationError::kind`] for logs.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The API returned a non-success response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// No API key is configured.
    #[error("No API key for Gemini. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The environment variable name.
        env_var: String,
    },

    /// A replayed interaction failed or the cassette ran out.
    #[error("Replay error: {0}")]
    Replay(String),
}

impl GenerationError {
    /// Short classification used as a structured log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Api { status: 401 | 403, .. } => "auth",
            Self::Api { status: 429, .. } => "quota",
            Self::Api { status: 400 | 413 | 415, .. } => "invalid_input",
            Self::Api { .. } => "upstream",
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::MissingApiKey { .. } => "missing_api_key",
            Self::Replay(_) => "replay",
        }
    }
}

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rejected `/generate` request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A required form field was not sent, or was sent empty.
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// The multipart body could not be read.
    #[error("Malformed multipart body: {message}")]
    Multipart {
        /// Status reported by the multipart parser.
        status: StatusCode,
        /// Parser error message.
        message: String,
    },
}

impl RequestError {
    /// Status code sent back to the client.
    ///
    /// Oversized bodies keep the parser's `413`; every other multipart
    /// failure is a validation error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Multipart { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => *status,
            Self::MissingField(_) | Self::Multipart { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for RequestError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        Self::Multipart { status: e.status(), message: e.body_text() }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
